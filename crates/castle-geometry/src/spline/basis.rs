//! Cubic blending basis for one spline segment.

use castle_math::{Point3, Vector3, DVec3};

/// Blending coefficients, one row per control point `P0..P3`, columns are
/// the coefficients of `t^3`, `t^2`, `t` and `1`.
///
/// This is the uniform Catmull-Rom matrix scaled by 2; segment results are
/// divided by 2 afterwards.
pub const BASIS: [[f64; 4]; 4] = [
    [-1.0, 2.0, -1.0, 0.0],
    [3.0, -5.0, 0.0, 2.0],
    [-3.0, 4.0, 1.0, 0.0],
    [1.0, -1.0, 0.0, 0.0],
];

const NORMALIZATION: f64 = 2.0;

/// Blending weights of `P0..P3` at local parameter `t`.
pub fn blend_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    BASIS.map(|[c3, c2, c1, c0]| c3 * t3 + c2 * t2 + c1 * t + c0)
}

/// Derivatives of [`blend_weights`] with respect to `t`.
pub fn blend_weight_derivatives(t: f64) -> [f64; 4] {
    let t2 = t * t;
    BASIS.map(|[c3, c2, c1, _]| 3.0 * c3 * t2 + 2.0 * c2 * t + c1)
}

fn blend(weights: [f64; 4], points: [Point3; 4]) -> DVec3 {
    let mut sum = DVec3::ZERO;
    for (w, p) in weights.iter().zip(points.iter()) {
        sum += *w * *p;
    }
    sum / NORMALIZATION
}

/// Evaluate the segment between `p1` and `p2` at local parameter `t`.
///
/// `t = 0` yields `p1` and `t = 1` yields `p2`; `p0` and `p3` only shape
/// the tangents.
pub fn evaluate_segment_position(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    t: f64,
) -> Point3 {
    blend(blend_weights(t), [p0, p1, p2, p3])
}

/// First derivative of [`evaluate_segment_position`] with respect to `t`.
///
/// The result is not normalized.
pub fn evaluate_segment_tangent(
    p0: Point3,
    p1: Point3,
    p2: Point3,
    p3: Point3,
    t: f64,
) -> Vector3 {
    blend(blend_weight_derivatives(t), [p0, p1, p2, p3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    const P: [Point3; 4] = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 2.0, 0.0),
        DVec3::new(3.0, 2.0, 1.0),
        DVec3::new(4.0, 0.0, 1.0),
    ];

    #[test]
    fn test_weights_partition_of_unity() {
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let sum: f64 = blend_weights(t).iter().sum();
            assert_abs_diff_eq!(sum, NORMALIZATION, epsilon = 1e-12);
            let dsum: f64 = blend_weight_derivatives(t).iter().sum();
            assert_abs_diff_eq!(dsum, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_weights_at_ends() {
        assert_eq!(blend_weights(0.0), [0.0, 2.0, 0.0, 0.0]);
        assert_eq!(blend_weights(1.0), [0.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_segment_interpolates_inner_points() {
        let [p0, p1, p2, p3] = P;
        assert!((evaluate_segment_position(p0, p1, p2, p3, 0.0) - p1).length() < 1e-12);
        assert!((evaluate_segment_position(p0, p1, p2, p3, 1.0) - p2).length() < 1e-12);
    }

    #[test]
    fn test_segment_end_tangents_are_central_differences() {
        let [p0, p1, p2, p3] = P;
        let start = evaluate_segment_tangent(p0, p1, p2, p3, 0.0);
        let end = evaluate_segment_tangent(p0, p1, p2, p3, 1.0);
        assert!((start - (p2 - p0) * 0.5).length() < 1e-12);
        assert!((end - (p3 - p1) * 0.5).length() < 1e-12);
    }

    #[test]
    fn test_tangent_matches_finite_difference() {
        let [p0, p1, p2, p3] = P;
        let h = 1e-6;
        for &t in &[0.1, 0.37, 0.5, 0.82] {
            let fd = (evaluate_segment_position(p0, p1, p2, p3, t + h)
                - evaluate_segment_position(p0, p1, p2, p3, t - h))
                / (2.0 * h);
            let analytic = evaluate_segment_tangent(p0, p1, p2, p3, t);
            assert!(
                (fd - analytic).length() < 1e-6,
                "t={}: fd={:?} analytic={:?}",
                t,
                fd,
                analytic
            );
        }
    }

    #[test]
    fn test_midpoint_value() {
        // weights at t = 0.5 are (-1/16, 9/16, 9/16, -1/16) after normalization
        let p = evaluate_segment_position(
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(2.0, 0.0, 0.0),
            dvec3(3.0, 0.0, 0.0),
            0.5,
        );
        assert!((p - dvec3(1.5, 0.0, 0.0)).length() < 1e-12);
    }
}
