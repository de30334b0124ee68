//! Object alignment: build a rigid model transform from a position and a
//! facing direction.

use castle_core::Tolerance;

use crate::scalar::is_vector_near_null;
use crate::{DMat4, Point3, Vector3};

/// Align (rotate and move) an object's local frame to the given parameters.
///
/// Works like a look-at, but for the model transform instead of the view:
/// the local origin is moved to `position`, local -Z is rotated onto `front`,
/// and local +Y is chosen to deviate from `up` as little as possible.
///
/// Degenerate input never yields NaN:
/// * a null `front` is replaced by a backward axis of `(0, 0, 1)`;
/// * an `up` parallel to `front` falls back to `(1, 0, 0)` for local X,
///   made perpendicular to the backward axis when it is not already.
///
/// The result is column-major with the translation in the fourth column.
pub fn align_object(position: Point3, front: Vector3, up: Vector3) -> DMat4 {
    let tol = Tolerance::default();

    let z = if is_vector_near_null(front, tol) {
        Vector3::Z
    } else {
        -front.normalize()
    };

    let side = up.cross(z);
    let x = if is_vector_near_null(side, tol) {
        fallback_side_axis(z)
    } else {
        side.normalize()
    };

    // x and z are unit and perpendicular, so y needs no normalization
    let y = z.cross(x);

    DMat4::from_cols(
        x.extend(0.0),
        y.extend(0.0),
        z.extend(0.0),
        position.extend(1.0),
    )
}

/// Canonical X axis, projected off `z` (a unit vector).
fn fallback_side_axis(z: Vector3) -> Vector3 {
    let reference = if z.x.abs() < 0.9 { Vector3::X } else { Vector3::Y };
    (reference - z * reference.dot(z)).normalize()
}
