//! # svg-caret
//!
//! Converts annotated histology slide drawings (SVG, one layer per physical
//! section) into the three text files the Caret neuroanatomy viewer loads:
//!
//! - `.contours`: outlines of each section, one block per contour
//! - `.contour_cells`: point markers reduced to centroids, one row per cell
//! - `.contour_cell_color`: the fixed four-color legend
//!
//! ## Pipeline
//!
//! 1. **SVG reader**: layers and their path/polygon/polyline shapes
//! 2. **Path vertex extraction**: drawing commands flattened to vertices,
//!    cubic curves sampled at six fixed parameters
//! 3. **Classification**: stroke/fill colors decide cell, contour or drop
//! 4. **Aggregation**: shapes collected per layer; layers ordered by label
//!    and centered on the bounding box of every recorded point
//! 5. **Serialization**: the three payloads rendered from the frozen document
//!
//! ```no_run
//! use std::path::Path;
//! use svg_caret::{convert_svg_file, ConvertOptions};
//!
//! let files = convert_svg_file(Path::new("slide.svg"), &ConvertOptions::default())?;
//! for (path, result) in files.write_to(Path::new("."), "slide") {
//!     if let Err(e) = result {
//!         eprintln!("{}: {}", path.display(), e);
//!     }
//! }
//! # Ok::<(), svg_caret::ConvertError>(())
//! ```

// Geometry primitives
pub mod basics;
pub mod bounding_rect;
pub mod curves;
pub mod path_vertices;

// Input
pub mod element;
pub mod path_data;
pub mod svg_document;

// Classification and ordering
pub mod classify;
pub mod color;
pub mod layer_order;

// Aggregation and output
pub mod caret;
pub mod caret_writer;
pub mod convert;
pub mod error;

pub use basics::{DrawCommand, PointD, RectD};
pub use caret::{CaretDocument, FrozenDocument};
pub use convert::{
    build_document, convert_layers, convert_svg, convert_svg_file, CaretFiles, ConvertOptions,
};
pub use element::{Element, ElementKind, LayerInput};
pub use error::{ConvertError, Warning};
