//! Bezier curve tessellation at fixed parameter samples.
//!
//! Curves are flattened by evaluating the Bernstein form at a fixed set of
//! parameter values instead of adaptively subdividing. Downstream vertex
//! counts depend on every curve command producing exactly
//! [`CURVE_SAMPLE_COUNT`] points, so the sampling density is a constant and
//! not an approximation-scale knob.
//!
//! - `pascal_row`: exact binomial coefficients for one degree.
//! - `bezier_point` / `tessellate`: generalized Bezier evaluation.
//! - `CubicSampler`: the same evaluation exposed as a `VertexSource`.

use crate::basics::{PointD, VertexSource, PATH_CMD_LINE_TO, PATH_CMD_MOVE_TO, PATH_CMD_STOP};

// ============================================================================
// Constants
// ============================================================================

/// Number of equal steps the unit parameter interval is divided into.
const CURVE_SAMPLE_STEPS: u32 = 5;

/// Points produced per curve command (both endpoints included).
pub const CURVE_SAMPLE_COUNT: usize = CURVE_SAMPLE_STEPS as usize + 1;

/// The fixed parameter values `{0, 0.2, 0.4, 0.6, 0.8, 1.0}`.
pub fn sample_parameters() -> [f64; CURVE_SAMPLE_COUNT] {
    let mut ts = [0.0; CURVE_SAMPLE_COUNT];
    for (i, t) in ts.iter_mut().enumerate() {
        *t = i as f64 / CURVE_SAMPLE_STEPS as f64;
    }
    ts
}

// ============================================================================
// Binomial coefficients
// ============================================================================

/// Row `n` of Pascal's triangle: `C(n, 0) ..= C(n, n)`.
///
/// Only the first half is computed multiplicatively; the rest is mirrored.
/// Every intermediate `x * numerator` is divisible by `denominator`, so the
/// integer division is exact. Rows above 60 overflow `u64`.
pub fn pascal_row(n: u32) -> Vec<u64> {
    let mut result = Vec::with_capacity(n as usize + 1);
    result.push(1u64);
    let mut x = 1u64;
    let mut numerator = n as u64;
    for denominator in 1..=(n as u64 / 2) {
        x = x * numerator / denominator;
        result.push(x);
        numerator -= 1;
    }
    let half = result.len();
    let mirrored = if n % 2 == 0 { half - 1 } else { half };
    for i in (0..mirrored).rev() {
        result.push(result[i]);
    }
    result
}

// ============================================================================
// Bezier evaluation
// ============================================================================

/// Evaluate the Bezier curve with control polygon `ctrl` at parameter `t`.
///
/// `B(t) = sum C(n-1, i) * t^i * (1-t)^(n-1-i) * P_i`. An empty control
/// polygon evaluates to the origin.
pub fn bezier_point(ctrl: &[PointD], t: f64) -> PointD {
    if ctrl.is_empty() {
        return PointD::default();
    }
    let degree = (ctrl.len() - 1) as u32;
    let combinations = pascal_row(degree);
    let u = 1.0 - t;
    let mut x = 0.0;
    let mut y = 0.0;
    for (i, (p, c)) in ctrl.iter().zip(combinations.iter()).enumerate() {
        let i = i as i32;
        let coef = *c as f64 * t.powi(i) * u.powi(degree as i32 - i);
        x += coef * p.x;
        y += coef * p.y;
    }
    PointD::new(x, y)
}

/// Evaluate `ctrl` at every parameter in `ts`, in order.
pub fn tessellate(ctrl: &[PointD], ts: &[f64]) -> Vec<PointD> {
    ts.iter().map(|&t| bezier_point(ctrl, t)).collect()
}

/// Flatten the cubic `p0 -> (p1, p2) -> p3` at the fixed samples.
pub fn tessellate_cubic(p0: PointD, p1: PointD, p2: PointD, p3: PointD) -> Vec<PointD> {
    tessellate(&[p0, p1, p2, p3], &sample_parameters())
}

// ============================================================================
// CubicSampler
// ============================================================================

/// A cubic Bezier segment emitted as a vertex stream: one `move_to` at
/// `t = 0` followed by `line_to` commands for the remaining samples.
#[derive(Debug, Clone)]
pub struct CubicSampler {
    ctrl: [PointD; 4],
    ts: [f64; CURVE_SAMPLE_COUNT],
    step: usize,
}

impl CubicSampler {
    pub fn new(p0: PointD, p1: PointD, p2: PointD, p3: PointD) -> Self {
        Self {
            ctrl: [p0, p1, p2, p3],
            ts: sample_parameters(),
            step: 0,
        }
    }
}

impl VertexSource for CubicSampler {
    fn rewind(&mut self, _path_id: u32) {
        self.step = 0;
    }

    fn vertex(&mut self, x: &mut f64, y: &mut f64) -> u32 {
        if self.step >= self.ts.len() {
            return PATH_CMD_STOP;
        }
        let p = bezier_point(&self.ctrl, self.ts[self.step]);
        *x = p.x;
        *y = p.y;
        self.step += 1;
        if self.step == 1 {
            PATH_CMD_MOVE_TO
        } else {
            PATH_CMD_LINE_TO
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
