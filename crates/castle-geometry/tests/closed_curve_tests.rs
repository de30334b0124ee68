use castle_geometry::spline::{evaluate_segment_position, segment_for};
use castle_geometry::{evaluate_closed_curve, evaluate_closed_curve_1st_derivative, ClosedSpline, Curve};
use castle_math::{DVec3, Point3};

fn dvec3(x: f64, y: f64, z: f64) -> Point3 {
    DVec3::new(x, y, z)
}

/// The broom's flight loop.
fn broom_points() -> Vec<Point3> {
    vec![
        dvec3(-5.6, 3.0, -6.3),
        dvec3(-6.8, 2.0, -8.7),
        dvec3(-8.7, 3.0, -9.3),
        dvec3(-9.2, 3.0, -7.0),
        dvec3(-9.7, 2.0, -5.1),
        dvec3(-7.4, 1.0, -4.7),
        dvec3(-5.1, 2.0, -2.0),
    ]
}

fn samples() -> impl Iterator<Item = f64> {
    (-40..=80).map(|i| i as f64 * 0.173)
}

#[test]
fn test_start_of_loop_is_first_control_point() {
    let pts = broom_points();
    let p = evaluate_closed_curve(&pts, 0.0).unwrap();

    // Segment 0 uses points [6, 0, 1, 2]; at local t = 0 the weights are
    // (0, 2, 0, 0) / 2, leaving exactly P0.
    let expected = evaluate_segment_position(pts[6], pts[0], pts[1], pts[2], 0.0);
    assert!((p - expected).length() < 1e-5);
    assert!((p - dvec3(-5.6, 3.0, -6.3)).length() < 1e-5);
}

#[test]
fn test_periodic_in_control_point_count() {
    let pts = broom_points();
    let n = pts.len() as f64;
    for t in samples() {
        let a = evaluate_closed_curve(&pts, t).unwrap();
        let b = evaluate_closed_curve(&pts, t + n).unwrap();
        assert!((a - b).length() < 1e-9, "position not periodic at t={}", t);

        let da = evaluate_closed_curve_1st_derivative(&pts, t).unwrap();
        let db = evaluate_closed_curve_1st_derivative(&pts, t + n).unwrap();
        assert!((da - db).length() < 1e-9, "tangent not periodic at t={}", t);
    }
}

#[test]
fn test_continuous_across_segment_boundaries() {
    let pts = broom_points();
    let eps = 1e-9;
    for k in -7..=14 {
        let k = k as f64;
        let before = evaluate_closed_curve(&pts, k - eps).unwrap();
        let at = evaluate_closed_curve(&pts, k).unwrap();
        assert!(
            (before - at).length() < 1e-6,
            "position jumps at boundary {}: {:?} vs {:?}",
            k,
            before,
            at
        );

        let d_before = evaluate_closed_curve_1st_derivative(&pts, k - eps).unwrap();
        let d_at = evaluate_closed_curve_1st_derivative(&pts, k).unwrap();
        assert!(
            (d_before - d_at).length() < 1e-6,
            "tangent jumps at boundary {}",
            k
        );
    }
}

#[test]
fn test_derivative_matches_numeric_differentiation() {
    let pts = broom_points();
    let h = 1e-6;
    for t in samples() {
        // stay inside one segment so the finite difference is smooth
        let (_, local) = segment_for(pts.len(), t);
        if !(0.01..0.99).contains(&local) {
            continue;
        }
        let fd = (evaluate_closed_curve(&pts, t + h).unwrap()
            - evaluate_closed_curve(&pts, t - h).unwrap())
            / (2.0 * h);
        let analytic = evaluate_closed_curve_1st_derivative(&pts, t).unwrap();
        assert!(
            (fd - analytic).length() < 1e-5,
            "t={}: numeric {:?} vs analytic {:?}",
            t,
            fd,
            analytic
        );
    }
}

#[test]
fn test_negative_parameter_selects_segment_by_floor() {
    let pts = broom_points();
    // -0.5 lies in the last segment (6 -> 0), halfway along
    let p = evaluate_closed_curve(&pts, -0.5).unwrap();
    let expected = evaluate_segment_position(pts[5], pts[6], pts[0], pts[1], 0.5);
    assert!((p - expected).length() < 1e-12);
}

#[test]
fn test_spline_deserializes_and_validates() {
    let spline: ClosedSpline =
        serde_json::from_str("[[0,0,0],[1,0,0],[1,0,1],[0,0,1]]").unwrap();
    assert_eq!(spline.len(), 4);
    assert!(spline.is_closed());

    let short: Result<ClosedSpline, _> = serde_json::from_str("[[0,0,0],[1,0,0],[1,0,1]]");
    assert!(short.is_err());
}
