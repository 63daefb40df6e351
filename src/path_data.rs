//! Raw SVG geometry strings to absolute drawing commands.
//!
//! `d` attributes are tokenized by `svgtypes`; relative coordinates are
//! resolved against the current point, horizontal/vertical lines become plain
//! line_to commands and smooth cubics get their reflected first control point.
//! Commands the tessellator does not flatten are kept as
//! `DrawCommand::Unsupported` so the vertex extractor rejects the document.

use svgtypes::{NumberListParser, PathParser, PathSegment};

use crate::basics::{DrawCommand, PointD};
use crate::error::ConvertError;

/// Tracks the pen while converting one path.
#[derive(Debug, Default)]
struct PenState {
    current: PointD,
    subpath_start: PointD,
    last_ctrl2: Option<PointD>,
}

impl PenState {
    fn resolve(&self, abs: bool, x: f64, y: f64) -> PointD {
        if abs {
            PointD::new(x, y)
        } else {
            PointD::new(self.current.x + x, self.current.y + y)
        }
    }

    fn reflected_ctrl(&self) -> PointD {
        match self.last_ctrl2 {
            Some(c) => PointD::new(2.0 * self.current.x - c.x, 2.0 * self.current.y - c.y),
            None => self.current,
        }
    }
}

fn tag(abs: bool, letter: char) -> char {
    if abs {
        letter
    } else {
        letter.to_ascii_lowercase()
    }
}

/// Convert SVG path data into absolute drawing commands.
pub fn parse_path_data(d: &str) -> Result<Vec<DrawCommand>, ConvertError> {
    let mut pen = PenState::default();
    let mut commands = Vec::new();

    for segment in PathParser::from(d) {
        let segment = segment.map_err(|source| ConvertError::PathData { source })?;
        let cmd = match segment {
            PathSegment::MoveTo { abs, x, y } => {
                let p = pen.resolve(abs, x, y);
                pen.subpath_start = p;
                pen.current = p;
                pen.last_ctrl2 = None;
                DrawCommand::MoveTo(p)
            }
            PathSegment::LineTo { abs, x, y } => {
                let p = pen.resolve(abs, x, y);
                pen.current = p;
                pen.last_ctrl2 = None;
                DrawCommand::LineTo(p)
            }
            PathSegment::HorizontalLineTo { abs, x } => {
                let p = if abs {
                    PointD::new(x, pen.current.y)
                } else {
                    PointD::new(pen.current.x + x, pen.current.y)
                };
                pen.current = p;
                pen.last_ctrl2 = None;
                DrawCommand::LineTo(p)
            }
            PathSegment::VerticalLineTo { abs, y } => {
                let p = if abs {
                    PointD::new(pen.current.x, y)
                } else {
                    PointD::new(pen.current.x, pen.current.y + y)
                };
                pen.current = p;
                pen.last_ctrl2 = None;
                DrawCommand::LineTo(p)
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = pen.resolve(abs, x1, y1);
                let c2 = pen.resolve(abs, x2, y2);
                let to = pen.resolve(abs, x, y);
                pen.current = to;
                pen.last_ctrl2 = Some(c2);
                DrawCommand::CurveTo(c1, c2, to)
            }
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                let c1 = pen.reflected_ctrl();
                let c2 = pen.resolve(abs, x2, y2);
                let to = pen.resolve(abs, x, y);
                pen.current = to;
                pen.last_ctrl2 = Some(c2);
                DrawCommand::CurveTo(c1, c2, to)
            }
            PathSegment::ClosePath { .. } => {
                pen.current = pen.subpath_start;
                pen.last_ctrl2 = None;
                DrawCommand::ClosePath
            }
            PathSegment::Quadratic { abs, .. } => DrawCommand::Unsupported(tag(abs, 'Q')),
            PathSegment::SmoothQuadratic { abs, .. } => DrawCommand::Unsupported(tag(abs, 'T')),
            PathSegment::EllipticalArc { abs, .. } => DrawCommand::Unsupported(tag(abs, 'A')),
        };
        commands.push(cmd);
    }
    Ok(commands)
}

/// Parse a `points` attribute (`"x1,y1 x2,y2 ..."`) into points.
pub fn parse_points(points: &str) -> Result<Vec<PointD>, ConvertError> {
    let malformed = || ConvertError::Points {
        data: points.to_string(),
    };
    let trimmed = points.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let numbers = NumberListParser::from(trimmed)
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| malformed())?;
    if numbers.len() % 2 != 0 {
        return Err(malformed());
    }
    Ok(numbers
        .chunks_exact(2)
        .map(|xy| PointD::new(xy[0], xy[1]))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> PointD {
        PointD::new(x, y)
    }

    #[test]
    fn test_absolute_commands() {
        let cmds = parse_path_data("M0,0 L10,0 C10,5 5,10 0,10 Z").unwrap();
        assert_eq!(
            cmds,
            vec![
                DrawCommand::MoveTo(p(0.0, 0.0)),
                DrawCommand::LineTo(p(10.0, 0.0)),
                DrawCommand::CurveTo(p(10.0, 5.0), p(5.0, 10.0), p(0.0, 10.0)),
                DrawCommand::ClosePath,
            ]
        );
    }

    #[test]
    fn test_relative_commands_resolve() {
        let cmds = parse_path_data("m10,10 l5,0 h5 v-5 c0,1 1,2 3,3").unwrap();
        assert_eq!(cmds[0], DrawCommand::MoveTo(p(10.0, 10.0)));
        assert_eq!(cmds[1], DrawCommand::LineTo(p(15.0, 10.0)));
        assert_eq!(cmds[2], DrawCommand::LineTo(p(20.0, 10.0)));
        assert_eq!(cmds[3], DrawCommand::LineTo(p(20.0, 5.0)));
        assert_eq!(
            cmds[4],
            DrawCommand::CurveTo(p(20.0, 6.0), p(21.0, 7.0), p(23.0, 8.0))
        );
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let cmds = parse_path_data("M1 1 2 2 3 3").unwrap();
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[2], DrawCommand::LineTo(p(3.0, 3.0)));
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let cmds = parse_path_data("M5,5 l10,0 z l0,10").unwrap();
        assert_eq!(cmds[3], DrawCommand::LineTo(p(5.0, 15.0)));
    }

    #[test]
    fn test_smooth_curve_reflects_control() {
        let cmds = parse_path_data("M0,0 C0,10 10,10 10,0 S20,-10 20,0").unwrap();
        assert_eq!(
            cmds[2],
            DrawCommand::CurveTo(p(10.0, -10.0), p(20.0, -10.0), p(20.0, 0.0))
        );
    }

    #[test]
    fn test_smooth_curve_without_previous_cubic() {
        let cmds = parse_path_data("M0,0 S10,10 20,0").unwrap();
        assert_eq!(
            cmds[1],
            DrawCommand::CurveTo(p(0.0, 0.0), p(10.0, 10.0), p(20.0, 0.0))
        );
    }

    #[test]
    fn test_arc_and_quadratic_are_unsupported() {
        let cmds = parse_path_data("M0,0 a5,5 0 0 1 10,0 Q5,5 10,10").unwrap();
        assert_eq!(cmds[1], DrawCommand::Unsupported('a'));
        assert_eq!(cmds[2], DrawCommand::Unsupported('Q'));
    }

    #[test]
    fn test_malformed_path_data() {
        assert!(matches!(
            parse_path_data("M0,0 L"),
            Err(ConvertError::PathData { .. })
        ));
    }

    #[test]
    fn test_parse_points() {
        let pts = parse_points("0,0 10,0 5,10").unwrap();
        assert_eq!(pts, vec![p(0.0, 0.0), p(10.0, 0.0), p(5.0, 10.0)]);
        assert_eq!(parse_points("  ").unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_points_blank_variants() {
        assert_eq!(parse_points("").unwrap(), Vec::new());
        assert_eq!(parse_points(" \t\n ").unwrap(), Vec::new());
        assert_eq!(parse_points(" 1,2 3,4 ").unwrap(), vec![p(1.0, 2.0), p(3.0, 4.0)]);
    }

    #[test]
    fn test_parse_points_odd_count() {
        assert!(matches!(
            parse_points("0,0 10"),
            Err(ConvertError::Points { .. })
        ));
    }
}
