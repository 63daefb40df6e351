//! Drawn elements and layer descriptors handed to the converter.

use crate::basics::{DrawCommand, PointD};

/// The markup shape an element came from. Classification rules differ per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Path,
    Polygon,
    Polyline,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Path => "path",
            ElementKind::Polygon => "polygon",
            ElementKind::Polyline => "polyline",
        }
    }
}

/// One drawn shape: its outline commands plus optional stroke and fill colors.
///
/// Colors are stored lower-cased and trimmed; comparison against the palette
/// is exact string equality.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub commands: Vec<DrawCommand>,
    pub stroke: Option<String>,
    pub fill: Option<String>,
}

impl Element {
    pub fn new(kind: ElementKind, commands: Vec<DrawCommand>) -> Self {
        Self {
            kind,
            commands,
            stroke: None,
            fill: None,
        }
    }

    pub fn path(commands: Vec<DrawCommand>) -> Self {
        Self::new(ElementKind::Path, commands)
    }

    /// Closed outline through `points`: move_to, line_to per vertex, close.
    pub fn polygon(points: &[PointD]) -> Self {
        Self::new(ElementKind::Polygon, point_commands(points, true))
    }

    /// Open outline through `points`.
    pub fn polyline(points: &[PointD]) -> Self {
        Self::new(ElementKind::Polyline, point_commands(points, false))
    }

    pub fn with_stroke(mut self, stroke: Option<&str>) -> Self {
        self.stroke = stroke.and_then(normalize_color);
        self
    }

    pub fn with_fill(mut self, fill: Option<&str>) -> Self {
        self.fill = fill.and_then(normalize_color);
        self
    }
}

/// A labeled layer and its elements in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerInput {
    pub label: String,
    pub elements: Vec<Element>,
}

impl LayerInput {
    pub fn new(label: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            label: label.into(),
            elements,
        }
    }
}

/// Lower-case and trim a color value. Empty values count as absent.
pub fn normalize_color(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_ascii_lowercase())
    }
}

fn point_commands(points: &[PointD], closed: bool) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(points.len() + 1);
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            commands.push(DrawCommand::MoveTo(*p));
        } else {
            commands.push(DrawCommand::LineTo(*p));
        }
    }
    if closed && !points.is_empty() {
        commands.push(DrawCommand::ClosePath);
    }
    commands
}
