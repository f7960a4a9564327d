//! Path builders for series geometry.
//!
//! The monotone cubic interpolation follows Fritsch–Carlson so smoothed
//! lines never overshoot their data (the classic monotone-X curve).

use std::fmt::Write as _;

use crate::render::fmt_num;

/// Straight path through the points in given order.
#[must_use]
pub fn polyline_path(points: &[(f64, f64)]) -> String {
    let mut out = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        let command = if i == 0 { 'M' } else { 'L' };
        let _ = write!(out, "{command}{},{}", fmt_num(*x), fmt_num(*y));
    }
    out
}

/// Monotone-smoothed path through the points in given order.
#[must_use]
pub fn monotone_path(points: &[(f64, f64)]) -> String {
    let Some((x0, y0)) = points.first() else {
        return String::new();
    };
    let mut out = format!("M{},{}", fmt_num(*x0), fmt_num(*y0));
    out.push_str(&monotone_segments(points));
    out
}

/// Curve segments only, assuming the pen already sits at `points[0]`.
/// Lets area fills stitch a forward top edge and a reversed bottom edge
/// into one closed path.
#[must_use]
pub fn monotone_segments(points: &[(f64, f64)]) -> String {
    match points.len() {
        0 | 1 => String::new(),
        2 => format!("L{},{}", fmt_num(points[1].0), fmt_num(points[1].1)),
        n => {
            let mut out = String::new();
            let mut t0 = 0.0;
            for i in 1..n - 1 {
                let t1 = slope3(points[i - 1], points[i], points[i + 1]);
                let start = if i == 1 {
                    slope2(points[0], points[1], t1)
                } else {
                    t0
                };
                push_bezier(&mut out, points[i - 1], points[i], start, t1);
                t0 = t1;
            }
            let t1 = slope2(points[n - 2], points[n - 1], t0);
            push_bezier(&mut out, points[n - 2], points[n - 1], t0, t1);
            out
        }
    }
}

fn push_bezier(out: &mut String, from: (f64, f64), to: (f64, f64), t0: f64, t1: f64) {
    let dx = (to.0 - from.0) / 3.0;
    let _ = write!(
        out,
        "C{},{},{},{},{},{}",
        fmt_num(from.0 + dx),
        fmt_num(from.1 + dx * t0),
        fmt_num(to.0 - dx),
        fmt_num(to.1 - dx * t1),
        fmt_num(to.0),
        fmt_num(to.1),
    );
}

fn js_sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Three-point slope with the Fritsch–Carlson limiter.
fn slope3(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let h0 = p1.0 - p0.0;
    let h1 = p2.0 - p1.0;
    let s0 = (p1.1 - p0.1) / if h0 != 0.0 { h0 } else { f64::copysign(0.0, h1) };
    let s1 = (p2.1 - p1.1) / if h1 != 0.0 { h1 } else { f64::copysign(0.0, h0) };
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let limited = (js_sign(s0) + js_sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if limited.is_finite() { limited } else { 0.0 }
}

/// Endpoint slope preserving monotonicity at the boundary.
fn slope2(from: (f64, f64), to: (f64, f64), t: f64) -> f64 {
    let h = to.0 - from.0;
    if h != 0.0 {
        (3.0 * (to.1 - from.1) / h - t) / 2.0
    } else {
        t
    }
}
