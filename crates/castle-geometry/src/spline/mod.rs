//! Closed cubic splines through cyclic control points.

pub mod basis;
pub mod closed;

pub use basis::{evaluate_segment_position, evaluate_segment_tangent};
pub use closed::{
    evaluate_closed_curve, evaluate_closed_curve_1st_derivative, segment_for,
    MIN_CONTROL_POINTS,
};
