//! Stateless path builders.
//!
//! Every builder takes explicit parameters and returns a fresh [`BezPath`].
//! Degenerate input (zero-length segments, non-positive radii) produces an
//! empty or degenerate path, never a panic.

use kurbo::{BezPath, Point, Rect, Vec2};
use std::f64::consts::{FRAC_PI_2, PI};

/// Lower bound for segment lengths when normalizing direction vectors.
const MIN_SEGMENT_LENGTH: f64 = 1.0;

/// Samples per wave period in [`wavy_path`].
const WAVE_SAMPLES: u32 = 20;

/// Shortest dash [`dashed_path`] will draw.
pub const MIN_DASH_LENGTH: f64 = 0.5;

/// Most wave periods [`wavy_path`] will draw.
pub const MAX_WAVE_COUNT: u32 = 200;

/// Half-angle between the arrowhead strokes and the shaft.
const ARROW_HEAD_ANGLE: f64 = PI / 7.0;

/// Single line segment from `a` to `b`.
pub fn straight_path(a: Point, b: Point) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(a);
    path.line_to(b);
    path
}

/// Alternating draw/skip runs from `a` toward `b`.
///
/// Each dash starts at a multiple of `dash_len + gap_len` and is clipped to
/// the segment end. Zero-length input or a non-positive dash yields an empty path.
/// Positive dashes shorter than [`MIN_DASH_LENGTH`] are lengthened to it.
pub fn dashed_path(a: Point, b: Point, dash_len: f64, gap_len: f64) -> BezPath {
    let mut path = BezPath::new();
    if !(dash_len > 0.0) {
        return path;
    }
    let dash_len = dash_len.max(MIN_DASH_LENGTH);
    let delta = b - a;
    let total = delta.hypot();
    let dir = delta / total.max(MIN_SEGMENT_LENGTH);
    let step = dash_len + gap_len.max(0.0);

    let mut dist = 0.0;
    while dist < total {
        let end = (dist + dash_len).min(total);
        path.move_to(a + dir * dist);
        path.line_to(a + dir * end);
        dist += step;
    }
    path
}

/// Sinusoidal ribbon from `a` to `b`.
///
/// Samples `wave_count * 20` intervals, offsetting each sample perpendicular to
/// the segment by `amplitude * sin(2π * wave_count * t)`. `wave_count` is capped
/// at [`MAX_WAVE_COUNT`].
pub fn wavy_path(a: Point, b: Point, wave_count: u32, amplitude: f64) -> BezPath {
    let wave_count = wave_count.min(MAX_WAVE_COUNT);
    let delta = b - a;
    let dir = delta / delta.hypot().max(MIN_SEGMENT_LENGTH);
    let normal = Vec2::new(-dir.y, dir.x);
    let samples = (wave_count * WAVE_SAMPLES).max(1);
    let frequency = 2.0 * PI * f64::from(wave_count);

    let mut path = BezPath::new();
    path.move_to(a);
    for i in 1..=samples {
        let t = f64::from(i) / f64::from(samples);
        let offset = amplitude * (frequency * t).sin();
        path.line_to(a + delta * t + normal * offset);
    }
    path
}

/// Two strokes from `tip` back toward `from`, each rotated ±π/7 off the bearing.
pub fn arrow_head(tip: Point, from: Point, size: f64) -> BezPath {
    let bearing = (tip.y - from.y).atan2(tip.x - from.x);
    let mut path = BezPath::new();
    for angle in [bearing - ARROW_HEAD_ANGLE, bearing + ARROW_HEAD_ANGLE] {
        path.move_to(tip);
        path.line_to(tip - Vec2::new(angle.cos(), angle.sin()) * size);
    }
    path
}

/// Append a circular arc whose start point is the path's current point.
///
/// Angles are in degrees, measured clockwise on screen (y grows downward).
/// The arc is split into cubic segments of at most 90° each, so the number of
/// segments depends only on the sweep, never on the radius.
pub fn append_arc(path: &mut BezPath, center: Point, radius: f64, start_deg: f64, sweep_deg: f64) {
    let start = start_deg.to_radians();
    let sweep = sweep_deg.to_radians();
    let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0);
    let step = sweep / segments;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let on_circle = |angle: f64| center + Vec2::new(angle.cos(), angle.sin()) * radius;
    let tangent = |angle: f64| Vec2::new(-angle.sin(), angle.cos()) * (radius * k);

    for i in 0..segments as usize {
        let a0 = start + step * i as f64;
        let a1 = a0 + step;
        let p0 = on_circle(a0);
        let p1 = on_circle(a1);
        path.curve_to(p0 + tangent(a0), p1 - tangent(a1), p1);
    }
}

/// Point on a circle at `deg` degrees.
pub fn point_on_circle(center: Point, radius: f64, deg: f64) -> Point {
    let a = deg.to_radians();
    center + Vec2::new(a.cos(), a.sin()) * radius
}

/// Open circular arc. Non-positive radius yields an empty path.
pub fn arc(center: Point, radius: f64, start_deg: f64, sweep_deg: f64) -> BezPath {
    let mut path = BezPath::new();
    if radius <= 0.0 {
        return path;
    }
    path.move_to(point_on_circle(center, radius, start_deg));
    append_arc(&mut path, center, radius, start_deg, sweep_deg);
    path
}

/// Closed circle. Non-positive radius yields an empty path.
pub fn circle(center: Point, radius: f64) -> BezPath {
    let mut path = arc(center, radius, 0.0, 360.0);
    if !path.elements().is_empty() {
        path.close_path();
    }
    path
}

/// Axis-aligned rectangle outline.
pub fn rect(rect: Rect) -> BezPath {
    rounded_rect(rect, 0.0)
}

/// Rectangle with circular corners; the radius is clamped to half the shorter side.
pub fn rounded_rect(rect: Rect, radius: f64) -> BezPath {
    let rect = rect.abs();
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);

    let mut path = BezPath::new();
    path.move_to((x0 + r, y0));
    path.line_to((x1 - r, y0));
    if r > 0.0 {
        append_arc(&mut path, Point::new(x1 - r, y0 + r), r, 270.0, 90.0);
    }
    path.line_to((x1, y1 - r));
    if r > 0.0 {
        append_arc(&mut path, Point::new(x1 - r, y1 - r), r, 0.0, 90.0);
    }
    path.line_to((x0 + r, y1));
    if r > 0.0 {
        append_arc(&mut path, Point::new(x0 + r, y1 - r), r, 90.0, 90.0);
    }
    path.line_to((x0, y0 + r));
    if r > 0.0 {
        append_arc(&mut path, Point::new(x0 + r, y0 + r), r, 180.0, 90.0);
    }
    path.close_path();
    path
}

/// Open polyline through `points`. No points yields an empty path.
pub fn polyline(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for p in iter {
            path.line_to(*p);
        }
    }
    path
}

/// Closed polygon through `points`. Fewer than two points yields an empty path.
pub fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if points.len() < 2 {
        return path;
    }
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    path.close_path();
    path
}

/// All points (end points and control points) of a path, in order.
#[cfg(test)]
pub(crate) fn path_points(path: &BezPath) -> Vec<Point> {
    use kurbo::PathEl;
    path.elements()
        .iter()
        .flat_map(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
            PathEl::QuadTo(c, p) => vec![c, p],
            PathEl::CurveTo(c1, c2, p) => vec![c1, c2, p],
            PathEl::ClosePath => vec![],
        })
        .collect()
}
