//! Conversion entry points: layers or SVG text in, three Caret payloads out.

use std::fs;
use std::path::{Path, PathBuf};

use crate::caret::{CaretDocument, FrozenDocument, DEFAULT_SPACING};
use crate::caret_writer::{cells_payload, colors_payload, contours_payload};
use crate::element::LayerInput;
use crate::error::{ConvertError, Warning};
use crate::svg_document::read_layers;

/// Extension of the contour payload.
pub const CONTOURS_EXT: &str = "contours";
/// Extension of the cell table payload.
pub const CELLS_EXT: &str = "contour_cells";
/// Extension of the color legend payload.
pub const COLORS_EXT: &str = "contour_cell_color";

/// Tunables for one conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    /// Depth-to-Z scale factor, also written as the contour section spacing.
    pub spacing: f64,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            spacing: DEFAULT_SPACING,
        }
    }
}

/// The three rendered payloads of one document, plus its warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct CaretFiles {
    pub contours: String,
    pub cells: String,
    pub colors: String,
    pub warnings: Vec<Warning>,
}

impl CaretFiles {
    fn render(doc: &FrozenDocument) -> Self {
        Self {
            contours: contours_payload(doc),
            cells: cells_payload(doc),
            colors: colors_payload(),
            warnings: doc.warnings().to_vec(),
        }
    }

    /// Payloads paired with their file extensions.
    pub fn payloads(&self) -> [(&'static str, &str); 3] {
        [
            (CONTOURS_EXT, self.contours.as_str()),
            (CELLS_EXT, self.cells.as_str()),
            (COLORS_EXT, self.colors.as_str()),
        ]
    }

    /// Write `<stem>.<ext>` for each payload into `dir`.
    ///
    /// Files are written independently: one failure does not stop or undo
    /// the others. Returns each target path with its outcome.
    pub fn write_to(&self, dir: &Path, stem: &str) -> Vec<(PathBuf, Result<(), ConvertError>)> {
        self.payloads()
            .iter()
            .map(|&(ext, payload)| {
                let path = dir.join(format!("{}.{}", stem, ext));
                let result = fs::write(&path, payload).map_err(|source| ConvertError::Write {
                    path: path.clone(),
                    source,
                });
                (path, result)
            })
            .collect()
    }
}

/// Aggregate `layers` into a document, freeze it and render every payload.
///
/// A fatal error in any element aborts the whole document.
pub fn convert_layers(
    layers: &[LayerInput],
    options: &ConvertOptions,
) -> Result<CaretFiles, ConvertError> {
    let frozen = build_document(layers, options)?;
    log::info!(
        "converted {} layers: {} contours, {} cells",
        frozen.layers().len(),
        frozen.contours().count(),
        frozen.cells().count()
    );
    Ok(CaretFiles::render(&frozen))
}

/// Aggregate and freeze without rendering.
pub fn build_document(
    layers: &[LayerInput],
    options: &ConvertOptions,
) -> Result<FrozenDocument, ConvertError> {
    let mut doc = CaretDocument::new(options.spacing);
    for layer in layers {
        doc.add_layer(layer)?;
    }
    Ok(doc.freeze())
}

/// Convert SVG text.
pub fn convert_svg(text: &str, options: &ConvertOptions) -> Result<CaretFiles, ConvertError> {
    let layers = read_layers(text)?;
    convert_layers(&layers, options)
}

/// Read and convert an SVG file.
pub fn convert_svg_file(path: &Path, options: &ConvertOptions) -> Result<CaretFiles, ConvertError> {
    let text = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    convert_svg(&text, options)
}
