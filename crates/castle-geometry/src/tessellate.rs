//! Tessellation utilities for converting curves to polylines.

use castle_math::Point3;

use crate::curve::Curve;

/// Convert a curve to a polyline using adaptive subdivision.
///
/// The domain is first cut into unit-length pieces (one per spline segment),
/// then each piece is recursively subdivided where the midpoint deviation
/// from the chord exceeds `tolerance`. For a closed curve the last point
/// repeats the first.
///
/// # Arguments
/// * `curve` - The curve to tessellate
/// * `tolerance` - Maximum allowed deviation from the true curve
pub fn curve_to_polyline(curve: &dyn Curve, tolerance: f64) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    let pieces = ((t_max - t_min).ceil() as usize).max(1);
    let step = (t_max - t_min) / pieces as f64;

    let mut points = vec![curve.point_at(t_min)];
    for i in 0..pieces {
        let t0 = t_min + step * i as f64;
        let t1 = if i + 1 == pieces { t_max } else { t0 + step };
        subdivide_curve(curve, t0, t1, tolerance, &mut points, 0);
    }
    points
}

/// Sum of the segment lengths of a polyline.
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).length()).sum()
}

/// Maximum recursion depth for adaptive subdivision.
const MAX_DEPTH: u32 = 12;

fn subdivide_curve(
    curve: &dyn Curve,
    t0: f64,
    t1: f64,
    tolerance: f64,
    points: &mut Vec<Point3>,
    depth: u32,
) {
    if depth >= MAX_DEPTH {
        points.push(curve.point_at(t1));
        return;
    }

    let t_mid = (t0 + t1) * 0.5;
    let p0 = curve.point_at(t0);
    let p1 = curve.point_at(t1);
    let p_mid = curve.point_at(t_mid);

    let chord_mid = (p0 + p1) * 0.5;
    let deviation = (p_mid - chord_mid).length();

    if deviation > tolerance {
        subdivide_curve(curve, t0, t_mid, tolerance, points, depth + 1);
        subdivide_curve(curve, t_mid, t1, tolerance, points, depth + 1);
    } else {
        points.push(p1);
    }
}
