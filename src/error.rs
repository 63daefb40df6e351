//! Fatal errors and non-fatal warnings raised while converting a document.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the conversion of a whole document.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unsupported path command '{tag}'")]
    UnsupportedCommand { tag: char },

    #[error("malformed path data: {source}")]
    PathData {
        #[source]
        source: svgtypes::Error,
    },

    #[error("malformed point list '{data}'")]
    Points { data: String },

    #[error("failed to parse SVG document: {source}")]
    Xml {
        #[from]
        source: roxmltree::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Conditions worth reporting that do not stop the conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Warning {
    #[error("cannot parse layer label '{label}'; ordering falls back to the raw label")]
    UnparseableLayerLabel { label: String },

    #[error("contour in layer '{layer}' has non-default stroke {stroke}")]
    AnomalousStrokeOnContour { layer: String, stroke: String },
}
