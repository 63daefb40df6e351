//! Bounding rectangle calculation.
//!
//! Computes the axis-aligned bounding box of a vertex source; the aggregator
//! uses its center as the coordinate offset for every output file.

use crate::basics::{is_stop, is_vertex, PointD, RectD, VertexSource};
use crate::path_vertices::PointsAdaptor;

/// Compute the bounding rectangle of a single path from a vertex source.
///
/// Rewinds the vertex source to `path_id`, iterates all vertices, and
/// returns the axis-aligned bounding box. Returns `None` if no vertices
/// are found.
pub fn bounding_rect_single(vs: &mut dyn VertexSource, path_id: u32) -> Option<RectD> {
    let mut x = 0.0;
    let mut y = 0.0;
    let mut first = true;
    let mut x1 = 1.0_f64;
    let mut y1 = 1.0_f64;
    let mut x2 = 0.0_f64;
    let mut y2 = 0.0_f64;

    vs.rewind(path_id);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_vertex(cmd) {
            if first {
                x1 = x;
                y1 = y;
                x2 = x;
                y2 = y;
                first = false;
            } else {
                if x < x1 {
                    x1 = x;
                }
                if y < y1 {
                    y1 = y;
                }
                if x > x2 {
                    x2 = x;
                }
                if y > y2 {
                    y2 = y;
                }
            }
        }
    }

    if x1 <= x2 && y1 <= y2 {
        Some(RectD::new(x1, y1, x2, y2))
    } else {
        None
    }
}

/// Bounding box of a point list, `None` when the list is empty.
pub fn bounding_rect_points(points: &[PointD]) -> Option<RectD> {
    bounding_rect_single(&mut PointsAdaptor::new(points), 0)
}

/// Center of the bounding box of `points`, or the origin for an empty list.
pub fn center_offset(points: &[PointD]) -> PointD {
    bounding_rect_points(points)
        .map(|r| r.center())
        .unwrap_or_default()
}
