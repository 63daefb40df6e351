//! Caret document aggregation.
//!
//! `CaretDocument` collects classified shapes per layer while a document is
//! walked. Every point a shape contributes is appended once to a flat list
//! that is read a single time, when the document is frozen, to compute the
//! centering offset. Freezing consumes the document, sorts its layers into
//! depth order and yields the read-only `FrozenDocument` the writers render.

use std::collections::HashMap;

use crate::basics::{PointD, RectD};
use crate::bounding_rect::{bounding_rect_points, center_offset};
use crate::classify::{anomalous_stroke, decide, ClassifiedShape};
use crate::color::ColorClass;
use crate::element::{Element, LayerInput};
use crate::error::{ConvertError, Warning};
use crate::layer_order::{sorted_order, LayerKey};
use crate::path_vertices::extract_vertices;

/// Default depth-to-Z scale factor.
pub const DEFAULT_SPACING: f64 = 6.0;

/// A point marker reduced to its centroid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub class: ColorClass,
    pub centroid: PointD,
}

/// One labeled layer and its shapes in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    label: String,
    cells: Vec<Cell>,
    contours: Vec<Vec<PointD>>,
}

impl Layer {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            cells: Vec::new(),
            contours: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contours(&self) -> &[Vec<PointD>] {
        &self.contours
    }
}

// ============================================================================
// CaretDocument
// ============================================================================

/// Accumulator for one input document.
#[derive(Debug, Clone)]
pub struct CaretDocument {
    layers: Vec<Layer>,
    index: HashMap<String, usize>,
    points: Vec<PointD>,
    spacing: f64,
    warnings: Vec<Warning>,
}

impl CaretDocument {
    pub fn new(spacing: f64) -> Self {
        Self {
            layers: Vec::new(),
            index: HashMap::new(),
            points: Vec::new(),
            spacing,
            warnings: Vec::new(),
        }
    }

    /// Index of the layer labeled `label`, creating it on first reference.
    pub fn layer_index(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        if !LayerKey::parse(label).is_parsed() {
            self.warn(Warning::UnparseableLayerLabel {
                label: label.to_string(),
            });
        }
        let i = self.layers.len();
        self.layers.push(Layer::new(label));
        self.index.insert(label.to_string(), i);
        i
    }

    /// Record every element of `input` under its label.
    ///
    /// The layer is created even when it has no elements, so it still takes
    /// a depth slot.
    pub fn add_layer(&mut self, input: &LayerInput) -> Result<(), ConvertError> {
        self.layer_index(&input.label);
        for element in &input.elements {
            self.add_element(&input.label, element)?;
        }
        Ok(())
    }

    /// Extract, classify and record one element.
    pub fn add_element(&mut self, label: &str, element: &Element) -> Result<(), ConvertError> {
        let vertices = extract_vertices(&element.commands)?;
        if vertices.is_empty() {
            log::debug!("skipping empty {} in layer '{}'", element.kind.name(), label);
            self.layer_index(label);
            return Ok(());
        }

        let stroke = element.stroke.as_deref();
        let decision = decide(element.kind, stroke, element.fill.as_deref(), vertices.len());
        if let Some(stroke) = anomalous_stroke(decision, stroke) {
            self.warn(Warning::AnomalousStrokeOnContour {
                layer: label.to_string(),
                stroke: stroke.to_string(),
            });
        }

        match ClassifiedShape::from_decision(decision, vertices) {
            Some(shape) => self.record(label, shape),
            None => {
                log::debug!("dropping {} in layer '{}'", element.kind.name(), label);
                self.layer_index(label);
            }
        }
        Ok(())
    }

    /// Store `shape` in its layer and append its points to the global list.
    pub fn record(&mut self, label: &str, shape: ClassifiedShape) {
        let i = self.layer_index(label);
        self.points.extend_from_slice(shape.points());
        let layer = &mut self.layers[i];
        match shape {
            ClassifiedShape::Cell { class, centroid } => layer.cells.push(Cell { class, centroid }),
            ClassifiedShape::Contour { vertices } => layer.contours.push(vertices),
        }
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Layers in first-reference order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Every point recorded so far.
    pub fn points(&self) -> &[PointD] {
        &self.points
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Compute offsets and depth order. The document cannot change afterwards.
    pub fn freeze(self) -> FrozenDocument {
        let bounds = bounding_rect_points(&self.points);
        let offset = center_offset(&self.points);
        if let Some(b) = bounds {
            log::debug!("bounds x {}..{} y {}..{}", b.x1, b.x2, b.y1, b.y2);
        }

        let labels: Vec<&str> = self.layers.iter().map(|l| l.label.as_str()).collect();
        let order = sorted_order(&labels);
        let mut slots: Vec<Option<Layer>> = self.layers.into_iter().map(Some).collect();
        let layers = order.into_iter().filter_map(|i| slots[i].take()).collect();

        FrozenDocument {
            layers,
            offset,
            bounds,
            spacing: self.spacing,
            warnings: self.warnings,
        }
    }
}

impl Default for CaretDocument {
    fn default() -> Self {
        Self::new(DEFAULT_SPACING)
    }
}

// ============================================================================
// FrozenDocument
// ============================================================================

/// A fully populated document with its layers in depth order.
#[derive(Debug, Clone)]
pub struct FrozenDocument {
    layers: Vec<Layer>,
    offset: PointD,
    bounds: Option<RectD>,
    spacing: f64,
    warnings: Vec<Warning>,
}

impl FrozenDocument {
    /// Layers sorted by depth; a layer's index is its depth.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Center of the bounding box of all recorded points, or the origin.
    pub fn offset(&self) -> PointD {
        self.offset
    }

    pub fn bounds(&self) -> Option<RectD> {
        self.bounds
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Centered, y-up coordinates: `(x - offset_x, offset_y - y)`.
    pub fn to_output(&self, p: PointD) -> PointD {
        PointD::new(p.x - self.offset.x, self.offset.y - p.y)
    }

    /// Z coordinate of a depth.
    pub fn depth_z(&self, depth: usize) -> f64 {
        depth as f64 * self.spacing
    }

    /// Every contour with its depth, in output order.
    pub fn contours(&self) -> impl Iterator<Item = (usize, &[PointD])> + '_ {
        self.layers.iter().enumerate().flat_map(|(depth, layer)| {
            layer.contours.iter().map(move |c| (depth, c.as_slice()))
        })
    }

    /// Every cell with its depth, in output order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Cell)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(depth, layer)| layer.cells.iter().map(move |c| (depth, c)))
    }
}
