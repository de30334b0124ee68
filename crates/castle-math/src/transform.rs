use crate::align::align_object;
use crate::{DMat4, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Model transform handed to the renderer: rotation, translation and an
/// optional uniform scale, stored column-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    /// Translate to `position` and scale uniformly by `size`.
    pub fn placed(position: Point3, size: f64) -> Self {
        Self::from_mat4(DMat4::from_translation(position) * DMat4::from_scale(Vector3::splat(size)))
    }

    /// Align to `position`/`front`/`up` (see [`align_object`]) then scale by `size`.
    pub fn aligned(position: Point3, front: Vector3, up: Vector3, size: f64) -> Self {
        Self::from_mat4(align_object(position, front, up) * DMat4::from_scale(Vector3::splat(size)))
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn translation(&self) -> Vector3 {
        self.to_mat4().w_axis.truncate()
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    /// Whether the upper 3x3 block is a proper rotation (orthonormal,
    /// right-handed) and the bottom row is `[0, 0, 0, 1]`.
    pub fn is_rigid(&self, tolerance: f64) -> bool {
        let m = self.to_mat4();
        let x = m.x_axis.truncate();
        let y = m.y_axis.truncate();
        let z = m.z_axis.truncate();

        let unit = [x, y, z]
            .iter()
            .all(|a| (a.length() - 1.0).abs() < tolerance);
        let orthogonal = x.dot(y).abs() < tolerance
            && y.dot(z).abs() < tolerance
            && z.dot(x).abs() < tolerance;
        let right_handed = (x.cross(y) - z).length() < tolerance;
        let affine = m.x_axis.w == 0.0 && m.y_axis.w == 0.0 && m.z_axis.w == 0.0 && m.w_axis.w == 1.0;

        unit && orthogonal && right_handed && affine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_unit_placement_is_rigid() {
        let t = Transform::placed(Point3::ZERO, 1.0);
        let p = dvec3(1.0, 2.0, 3.0);
        let result = t.transform_point(p);
        assert!((result - p).length() < 1e-10);
        assert!(t.is_rigid(1e-12));
    }

    #[test]
    fn test_placed_scales_then_translates() {
        let t = Transform::placed(dvec3(10.0, 20.0, 30.0), 2.0);
        let result = t.transform_point(dvec3(1.0, 2.0, 3.0));
        assert!((result - dvec3(12.0, 24.0, 36.0)).length() < 1e-10);
        assert!(!t.is_rigid(1e-6));
    }

    #[test]
    fn test_aligned_unit_size_is_rigid() {
        let t = Transform::aligned(dvec3(-7.0, 1.5, -7.0), dvec3(3.0, -1.0, 1.5), Vector3::Y, 1.0);
        assert!(t.is_rigid(1e-10));
        assert!((t.translation() - dvec3(-7.0, 1.5, -7.0)).length() < 1e-12);
    }

    #[test]
    fn test_then_composes_in_order() {
        let scale = Transform::placed(Point3::ZERO, 3.0);
        let move_x = Transform::placed(Vector3::X, 1.0);
        let p = scale.then(&move_x).transform_point(Vector3::ONE);
        assert!((p - dvec3(4.0, 3.0, 3.0)).length() < 1e-10);
    }
}
