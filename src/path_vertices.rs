//! Path vertex extraction: flattens an element's drawing commands into the
//! ordered vertex sequence used for classification and output.
//!
//! `PathVertices` is the vertex container; it records every move/line point
//! literally, expands each cubic into exactly six samples (the first one
//! repeating the current point) and closes a path by repeating its first
//! vertex rather than by setting a flag.

use crate::basics::{
    is_stop, is_vertex, DrawCommand, PointD, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO,
    PATH_CMD_STOP,
};
use crate::curves::CubicSampler;
use crate::error::ConvertError;

/// Flatten `commands` into vertices.
///
/// Fails with [`ConvertError::UnsupportedCommand`] on the first command the
/// tessellator cannot handle; no partial result is returned.
pub fn extract_vertices(commands: &[DrawCommand]) -> Result<Vec<PointD>, ConvertError> {
    let mut path = PathVertices::new();
    for cmd in commands {
        match *cmd {
            DrawCommand::MoveTo(p) => path.move_to(p),
            DrawCommand::LineTo(p) => path.line_to(p),
            DrawCommand::CurveTo(c1, c2, to) => path.curve4(c1, c2, to),
            DrawCommand::ClosePath => path.close_polygon(),
            DrawCommand::Unsupported(tag) => return Err(ConvertError::UnsupportedCommand { tag }),
        }
    }
    Ok(path.into_vertices())
}

/// Ordered vertex container for a single element.
#[derive(Debug, Clone, Default)]
pub struct PathVertices {
    vertices: Vec<PointD>,
}

impl PathVertices {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    pub fn move_to(&mut self, p: PointD) {
        self.vertices.push(p);
    }

    pub fn line_to(&mut self, p: PointD) {
        self.vertices.push(p);
    }

    /// Append the six samples of the cubic from the current point.
    ///
    /// With no current point the curve starts at the origin.
    pub fn curve4(&mut self, ctrl1: PointD, ctrl2: PointD, to: PointD) {
        let from = self.last_vertex().unwrap_or_default();
        let mut sampler = CubicSampler::new(from, ctrl1, ctrl2, to);
        self.concat_path(&mut sampler, 0);
    }

    /// Repeat the first vertex. Does nothing on an empty path.
    pub fn close_polygon(&mut self) {
        if let Some(first) = self.vertices.first().copied() {
            self.vertices.push(first);
        }
    }

    /// Append every vertex of `vs` as-is.
    pub fn concat_path(&mut self, vs: &mut dyn VertexSource, path_id: u32) {
        let mut x = 0.0;
        let mut y = 0.0;
        vs.rewind(path_id);
        loop {
            let cmd = vs.vertex(&mut x, &mut y);
            if is_stop(cmd) {
                break;
            }
            if is_vertex(cmd) {
                self.vertices.push(PointD::new(x, y));
            }
        }
    }

    pub fn last_vertex(&self) -> Option<PointD> {
        self.vertices.last().copied()
    }

    pub fn into_vertices(self) -> Vec<PointD> {
        self.vertices
    }
}

// ===================================================================
// Adaptors
// ===================================================================

/// Wraps a borrowed point slice as an open `VertexSource`.
pub struct PointsAdaptor<'a> {
    points: &'a [PointD],
    index: usize,
}

impl<'a> PointsAdaptor<'a> {
    pub fn new(points: &'a [PointD]) -> Self {
        Self { points, index: 0 }
    }
}

impl VertexSource for PointsAdaptor<'_> {
    fn rewind(&mut self, _path_id: u32) {
        self.index = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        match self.points.get(self.index) {
            Some(p) => {
                *x = p.x;
                *y = p.y;
                self.index += 1;
                if self.index == 1 {
                    PATH_CMD_MOVE_TO
                } else {
                    PATH_CMD_LINE_TO
                }
            }
            None => {
                *x = 0.0;
                *y = 0.0;
                PATH_CMD_STOP
            }
        }
    }
}
