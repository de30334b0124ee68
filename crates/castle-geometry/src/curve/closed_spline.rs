//! Closed cubic spline curve.

use castle_core::{Result, SceneError, Validate};
use castle_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::spline::basis::{evaluate_segment_position, evaluate_segment_tangent};
use crate::spline::closed::{check_control_points, segment_window};

/// A closed loop through at least four control points, parameterized over
/// `[0, n)` and periodic outside it.
///
/// The control points are checked once on construction, so evaluation
/// through the [`Curve`] trait cannot fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point3>", into = "Vec<Point3>")]
pub struct ClosedSpline {
    control_points: Vec<Point3>,
}

impl ClosedSpline {
    pub fn new(control_points: Vec<Point3>) -> Result<Self> {
        let spline = Self { control_points };
        spline.validate()?;
        Ok(spline)
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Number of control points, which is also the parameter period.
    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    /// Always false: a validated spline has at least four points.
    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Unit heading at `t`, or `None` where the derivative vanishes.
    pub fn direction_at(&self, t: f64) -> Option<Vector3> {
        self.tangent_at(t).try_normalize()
    }
}

impl Validate for ClosedSpline {
    fn validate(&self) -> Result<()> {
        check_control_points(&self.control_points)
    }
}

impl TryFrom<Vec<Point3>> for ClosedSpline {
    type Error = SceneError;

    fn try_from(points: Vec<Point3>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<ClosedSpline> for Vec<Point3> {
    fn from(spline: ClosedSpline) -> Self {
        spline.control_points
    }
}

impl Curve for ClosedSpline {
    fn point_at(&self, t: f64) -> Point3 {
        let ([p0, p1, p2, p3], local) = segment_window(&self.control_points, t);
        evaluate_segment_position(p0, p1, p2, p3, local)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let ([p0, p1, p2, p3], local) = segment_window(&self.control_points, t);
        evaluate_segment_tangent(p0, p1, p2, p3, local)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, self.control_points.len() as f64)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
