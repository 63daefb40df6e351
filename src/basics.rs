//! Foundation types, constants, and path command utilities.
//!
//! Everything else in the crate depends on the point and rectangle types,
//! the vertex-stream command codes and the `VertexSource` trait defined here.

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two corner points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
}

impl Rect<f64> {
    /// Midpoint of the rectangle.
    pub fn center(&self) -> PointD {
        PointD::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }
}

/// Rectangle with `f64` coordinates.
pub type RectD = Rect<f64>;

// ============================================================================
// Vertex stream commands
// ============================================================================

pub const PATH_CMD_STOP: u32 = 0;
pub const PATH_CMD_MOVE_TO: u32 = 1;
pub const PATH_CMD_LINE_TO: u32 = 2;
pub const PATH_CMD_END_POLY: u32 = 0x0F;

/// Returns `true` if `c` carries a coordinate (move_to or line_to).
#[inline]
pub fn is_vertex(c: u32) -> bool {
    (PATH_CMD_MOVE_TO..PATH_CMD_END_POLY).contains(&c)
}

/// Returns `true` if `c` is the stop command.
#[inline]
pub fn is_stop(c: u32) -> bool {
    c == PATH_CMD_STOP
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

/// Document-space point. Every coordinate in the pipeline is an `f64`.
pub type PointD = PointBase<f64>;

impl From<(f64, f64)> for PointD {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// ============================================================================
// Drawing commands
// ============================================================================

/// One absolute drawing command of an element's outline.
///
/// Relative SVG forms are resolved before a `DrawCommand` is built, so every
/// coordinate here is in document space. `Unsupported` keeps the tag of a
/// command the tessellator cannot flatten (arcs, quadratic curves) so the
/// vertex extractor can reject the whole document instead of silently
/// dropping geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    MoveTo(PointD),
    LineTo(PointD),
    /// Cubic segment from the current point: two control points, then the end point.
    CurveTo(PointD, PointD, PointD),
    ClosePath,
    Unsupported(char),
}

impl DrawCommand {
    /// The SVG letter this command corresponds to.
    pub fn tag(&self) -> char {
        match self {
            DrawCommand::MoveTo(_) => 'M',
            DrawCommand::LineTo(_) => 'L',
            DrawCommand::CurveTo(..) => 'C',
            DrawCommand::ClosePath => 'Z',
            DrawCommand::Unsupported(tag) => *tag,
        }
    }
}

// ============================================================================
// VertexSource trait
// ============================================================================

/// Pull-style vertex stream. Curve samplers and point adaptors implement it
/// so consumers can drain vertices without knowing where they come from.
pub trait VertexSource {
    /// Reset the source to the beginning of the given path.
    fn rewind(&mut self, path_id: u32);

    /// Return the next vertex. Writes coordinates to `x` and `y`, returns a
    /// path command. Returns `PATH_CMD_STOP` when iteration is complete.
    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new_and_is_valid() {
        let r = RectD::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.is_valid());
        assert_eq!(r.x1, 10.0);
        assert_eq!(r.y2, 40.0);

        let r_invalid = RectD::new(30.0, 40.0, 10.0, 20.0);
        assert!(!r_invalid.is_valid());
    }

    #[test]
    fn test_rect_center() {
        let r = RectD::new(-10.0, 0.0, 30.0, 8.0);
        let c = r.center();
        assert!((c.x - 10.0).abs() < 1e-12);
        assert!((c.y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_command_queries() {
        assert!(is_stop(PATH_CMD_STOP));
        assert!(is_vertex(PATH_CMD_MOVE_TO));
        assert!(is_vertex(PATH_CMD_LINE_TO));
        assert!(!is_vertex(PATH_CMD_STOP));
        assert!(!is_vertex(PATH_CMD_END_POLY));
    }

    #[test]
    fn test_draw_command_tags() {
        let p = PointD::new(1.0, 2.0);
        assert_eq!(DrawCommand::MoveTo(p).tag(), 'M');
        assert_eq!(DrawCommand::LineTo(p).tag(), 'L');
        assert_eq!(DrawCommand::CurveTo(p, p, p).tag(), 'C');
        assert_eq!(DrawCommand::ClosePath.tag(), 'Z');
        assert_eq!(DrawCommand::Unsupported('A').tag(), 'A');
    }

    #[test]
    fn test_point_from_tuple() {
        let p: PointD = (3.5, -1.0).into();
        assert_eq!(p, PointD::new(3.5, -1.0));
    }
}
