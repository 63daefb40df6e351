//! Element classification: cell marker or contour outline.
//!
//! The decision depends only on the element kind, its normalized stroke and
//! fill, and its vertex count. Rules live in one table per kind and are tried
//! top to bottom; the first match wins. Elements no rule matches fall back to
//! contours.

use crate::basics::PointD;
use crate::color::ColorClass;
use crate::element::ElementKind;

/// Stroke expected on ordinary contours. Any other stroke on a fallback
/// contour is reported.
pub const DEFAULT_CONTOUR_STROKE: &str = "#000000";

// ============================================================================
// Rule table
// ============================================================================

/// Which color attribute a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorAttr {
    Stroke,
    Fill,
    /// Stroke or fill.
    Either,
}

/// What a matching rule turns the element into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Cell(ColorClass),
    Contour,
    Drop,
}

/// One row of a classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRule {
    pub attr: ColorAttr,
    pub color: &'static str,
    /// The rule only applies to elements with at least this many vertices.
    pub min_vertices: usize,
    pub outcome: RuleOutcome,
}

impl ColorRule {
    const fn new(attr: ColorAttr, color: &'static str, outcome: RuleOutcome) -> Self {
        Self {
            attr,
            color,
            min_vertices: 0,
            outcome,
        }
    }

    const fn min_vertices(self, n: usize) -> Self {
        Self {
            min_vertices: n,
            ..self
        }
    }

    pub fn matches(&self, stroke: Option<&str>, fill: Option<&str>, vertex_count: usize) -> bool {
        if vertex_count < self.min_vertices {
            return false;
        }
        let hit = |v: Option<&str>| v == Some(self.color);
        match self.attr {
            ColorAttr::Stroke => hit(stroke),
            ColorAttr::Fill => hit(fill),
            ColorAttr::Either => hit(stroke) || hit(fill),
        }
    }
}

use ColorAttr::{Either, Fill, Stroke};
use ColorClass::{Blue, Red, Yellow};

const BLUE: RuleOutcome = RuleOutcome::Cell(Blue);
const RED: RuleOutcome = RuleOutcome::Cell(Red);
const YELLOW: RuleOutcome = RuleOutcome::Cell(Yellow);

const PATH_RULES: &[ColorRule] = &[
    ColorRule::new(Stroke, "#313185", BLUE),
    ColorRule::new(Fill, "#00aeef", BLUE),
    ColorRule::new(Either, "#0000ff", BLUE),
    ColorRule::new(Either, "#ed1c24", RED),
    ColorRule::new(Either, "#d52e2b", RED),
    ColorRule::new(Either, "#fff200", YELLOW),
    ColorRule::new(Either, "#808000", YELLOW),
    ColorRule::new(Fill, "#313185", RuleOutcome::Drop),
];

const POLYGON_RULES: &[ColorRule] = &[
    ColorRule::new(Either, "#313185", BLUE),
    ColorRule::new(Fill, "#00aeef", BLUE),
    ColorRule::new(Either, "#0000ff", BLUE),
    ColorRule::new(Either, "#ed1c24", RED),
    ColorRule::new(Either, "#d52e2b", RED),
    ColorRule::new(Fill, "#ff0000", RED),
    ColorRule::new(Either, "#fff200", YELLOW),
    ColorRule::new(Either, "#808000", YELLOW),
];

const POLYLINE_RULES: &[ColorRule] = &[
    ColorRule::new(Either, "#313185", BLUE),
    ColorRule::new(Fill, "#00aeef", BLUE),
    ColorRule::new(Either, "#0000ff", BLUE),
    ColorRule::new(Stroke, "#3a53a4", BLUE),
    ColorRule::new(Either, "#ed1c24", RED),
    ColorRule::new(Either, "#d52e2b", RED),
    ColorRule::new(Fill, "#ff0000", RED),
    ColorRule::new(Either, "#fff200", YELLOW),
    ColorRule::new(Either, "#808000", YELLOW),
    ColorRule::new(Stroke, "#00884b", RuleOutcome::Contour).min_vertices(6),
];

/// The ordered rule table for `kind`.
pub fn rules_for(kind: ElementKind) -> &'static [ColorRule] {
    match kind {
        ElementKind::Path => PATH_RULES,
        ElementKind::Polygon => POLYGON_RULES,
        ElementKind::Polyline => POLYLINE_RULES,
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Outcome of running an element through its rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Cell(ColorClass),
    /// A rule explicitly asked for a contour.
    Contour,
    /// No rule matched.
    FallbackContour,
    /// A rule discards the element.
    Drop,
}

/// Decide what an element is. `stroke` and `fill` must already be normalized.
pub fn decide(
    kind: ElementKind,
    stroke: Option<&str>,
    fill: Option<&str>,
    vertex_count: usize,
) -> Decision {
    rules_for(kind)
        .iter()
        .find(|r| r.matches(stroke, fill, vertex_count))
        .map(|r| match r.outcome {
            RuleOutcome::Cell(class) => Decision::Cell(class),
            RuleOutcome::Contour => Decision::Contour,
            RuleOutcome::Drop => Decision::Drop,
        })
        .unwrap_or(Decision::FallbackContour)
}

/// The stroke to report when `decision` is a fallback contour drawn with a
/// non-default stroke.
pub fn anomalous_stroke(decision: Decision, stroke: Option<&str>) -> Option<&str> {
    match (decision, stroke) {
        (Decision::FallbackContour, Some(s)) if s != DEFAULT_CONTOUR_STROKE => Some(s),
        _ => None,
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// A classified element as stored in a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedShape {
    Cell { class: ColorClass, centroid: PointD },
    Contour { vertices: Vec<PointD> },
}

impl ClassifiedShape {
    /// Build the shape for `decision`. Cells keep only their centroid.
    ///
    /// Returns `None` for dropped elements and for cells without vertices.
    pub fn from_decision(decision: Decision, vertices: Vec<PointD>) -> Option<Self> {
        match decision {
            Decision::Cell(class) => {
                centroid(&vertices).map(|centroid| ClassifiedShape::Cell { class, centroid })
            }
            Decision::Contour | Decision::FallbackContour => {
                Some(ClassifiedShape::Contour { vertices })
            }
            Decision::Drop => None,
        }
    }

    /// Points this shape contributes to the document bounds.
    pub fn points(&self) -> &[PointD] {
        match self {
            ClassifiedShape::Cell { centroid, .. } => std::slice::from_ref(centroid),
            ClassifiedShape::Contour { vertices } => vertices,
        }
    }
}

/// Arithmetic mean of `vertices`, `None` when empty.
pub fn centroid(vertices: &[PointD]) -> Option<PointD> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f64;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(PointD::new(sx / n, sy / n))
}
