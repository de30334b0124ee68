//! Evaluation of a closed spline through a cyclic list of control points.
//!
//! The global parameter `t` runs over `[0, n)` for `n` control points and is
//! periodic beyond that: segment `i = floor(t) mod n` spans control points
//! `i` and `i + 1`, with `i - 1` and `i + 2` shaping its tangents.

use castle_core::{Result, SceneError};
use castle_math::{Point3, Vector3};

use super::basis::{evaluate_segment_position, evaluate_segment_tangent};

/// Four points are needed to evaluate any segment.
pub const MIN_CONTROL_POINTS: usize = 4;

/// Check that `points` can define a closed spline.
pub fn check_control_points(points: &[Point3]) -> Result<()> {
    if points.len() < MIN_CONTROL_POINTS {
        return Err(SceneError::InvalidArgument(format!(
            "closed spline needs at least {} control points, got {}",
            MIN_CONTROL_POINTS,
            points.len()
        )));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(SceneError::InvalidArgument(format!(
            "control point {} is not finite: {:?}",
            i, points[i]
        )));
    }
    Ok(())
}

/// Split a global parameter into `(segment index, local parameter)`.
///
/// Uses floor semantics, so negative parameters select segments counting
/// back from the end of the loop and the local parameter is always in `[0, 1)`.
pub fn segment_for(count: usize, t: f64) -> (usize, f64) {
    let whole = t.floor();
    let local = t - whole;
    let index = (whole.rem_euclid(count as f64) as usize).min(count - 1);
    // A tiny negative `t` rounds `local` up to 1.0: that is the next segment's start.
    if local >= 1.0 {
        return ((index + 1) % count, 0.0);
    }
    (index, local)
}

/// Control points of the segment containing `t`, plus the local parameter.
///
/// `points` must hold at least [`MIN_CONTROL_POINTS`] entries.
pub(crate) fn segment_window(points: &[Point3], t: f64) -> ([Point3; 4], f64) {
    let n = points.len();
    let (i, local) = segment_for(n, t);
    let window = [
        points[(i + n - 1) % n],
        points[i],
        points[(i + 1) % n],
        points[(i + 2) % n],
    ];
    (window, local)
}

fn check_parameter(t: f64) -> Result<()> {
    if !t.is_finite() {
        return Err(SceneError::InvalidArgument(format!(
            "curve parameter must be finite, got {}",
            t
        )));
    }
    Ok(())
}

/// Position on the closed curve through `points` at global parameter `t`.
///
/// # Errors
/// `InvalidArgument` for fewer than four control points or a non-finite `t`.
pub fn evaluate_closed_curve(points: &[Point3], t: f64) -> Result<Point3> {
    check_control_points(points)?;
    check_parameter(t)?;
    let ([p0, p1, p2, p3], local) = segment_window(points, t);
    Ok(evaluate_segment_position(p0, p1, p2, p3, local))
}

/// First derivative of [`evaluate_closed_curve`] with respect to `t`.
///
/// Not normalized; callers wanting a heading normalize it themselves.
pub fn evaluate_closed_curve_1st_derivative(points: &[Point3], t: f64) -> Result<Vector3> {
    check_control_points(points)?;
    check_parameter(t)?;
    let ([p0, p1, p2, p3], local) = segment_window(points, t);
    Ok(evaluate_segment_tangent(p0, p1, p2, p3, local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::dvec3;

    fn square() -> Vec<Point3> {
        vec![
            dvec3(0.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 0.0),
            dvec3(1.0, 0.0, 1.0),
            dvec3(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn test_segment_for_positive() {
        assert_eq!(segment_for(7, 0.0), (0, 0.0));
        let (i, local) = segment_for(7, 3.25);
        assert_eq!(i, 3);
        assert_abs_diff_eq!(local, 0.25);
        let (i, local) = segment_for(7, 9.5);
        assert_eq!(i, 2);
        assert_abs_diff_eq!(local, 0.5);
    }

    #[test]
    fn test_segment_for_negative_uses_floor() {
        let (i, local) = segment_for(7, -0.25);
        assert_eq!(i, 6);
        assert_abs_diff_eq!(local, 0.75);
        let (i, local) = segment_for(7, -7.0);
        assert_eq!(i, 0);
        assert_abs_diff_eq!(local, 0.0);
    }

    #[test]
    fn test_segment_for_tiny_negative_stays_in_unit_range() {
        // -1e-20 - floor(-1e-20) rounds to exactly 1.0
        assert_eq!(segment_for(7, -1e-20), (0, 0.0));
        let (i, local) = segment_for(7, -1e-12);
        assert_eq!(i, 6);
        assert!(local < 1.0);

        let pts = square();
        let p = evaluate_closed_curve(&pts, -1e-20).unwrap();
        assert!((p - pts[0]).length() < 1e-12);
    }

    #[test]
    fn test_window_wraps_both_ends() {
        let pts = square();
        let (w, _) = segment_window(&pts, 0.5);
        assert_eq!(w, [pts[3], pts[0], pts[1], pts[2]]);
        let (w, _) = segment_window(&pts, 3.5);
        assert_eq!(w, [pts[2], pts[3], pts[0], pts[1]]);
    }

    #[test]
    fn test_passes_through_control_points() {
        let pts = square();
        for (i, p) in pts.iter().enumerate() {
            let q = evaluate_closed_curve(&pts, i as f64).unwrap();
            assert!((q - *p).length() < 1e-12);
        }
    }

    #[test]
    fn test_too_few_points_rejected() {
        let pts = &square()[..3];
        assert!(matches!(
            evaluate_closed_curve(pts, 0.5),
            Err(SceneError::InvalidArgument(_))
        ));
        assert!(matches!(
            evaluate_closed_curve_1st_derivative(pts, 0.5),
            Err(SceneError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let pts = square();
        assert!(evaluate_closed_curve(&pts, f64::NAN).is_err());
        assert!(evaluate_closed_curve_1st_derivative(&pts, f64::INFINITY).is_err());

        let mut bad = square();
        bad[2].y = f64::NAN;
        assert!(check_control_points(&bad).is_err());
    }

    #[test]
    fn test_negative_parameter_continues_loop() {
        let pts = square();
        let behind = evaluate_closed_curve(&pts, -0.5).unwrap();
        let ahead = evaluate_closed_curve(&pts, 3.5).unwrap();
        assert!((behind - ahead).length() < 1e-12);
    }
}
