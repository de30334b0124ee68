//! Castle scene geometry: closed splines and curve tessellation.

pub mod curve;
pub mod spline;
pub mod tessellate;

pub use curve::{ClosedSpline, Curve};
pub use spline::{evaluate_closed_curve, evaluate_closed_curve_1st_derivative};
