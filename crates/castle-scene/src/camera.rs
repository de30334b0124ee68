//! First-person camera: presets, mouse look and the view/projection matrices.

use castle_core::Result;
use castle_math::{cyclic_clamp, DMat3, DMat4, Point3, Ray, Vector3, DVec3};

use crate::config::CameraConfig;

/// Fixed viewpoints selectable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPreset {
    /// Overlooks the cauldron and table
    StaticFirst,
    /// Looks along the castle wall
    StaticSecond,
    /// Walkable first-person camera
    Free,
}

impl CameraPreset {
    fn pose(self) -> (Point3, Vector3, bool) {
        match self {
            CameraPreset::StaticFirst => (DVec3::new(5.0, 5.0, -9.0), DVec3::new(1.0, -1.0, -1.0), false),
            CameraPreset::StaticSecond => (DVec3::new(-3.0, 5.0, -12.0), DVec3::new(-1.0, 0.0, -1.0), false),
            CameraPreset::Free => (DVec3::new(-1.0, 0.0, 2.0), DVec3::new(1.0, 0.0, 1.0), true),
        }
    }
}

/// A first-person camera steered by yaw/pitch angles (degrees).
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3,
    /// Horizontal heading; pitch is applied on top in free mode
    pub direction: Vector3,
    /// Horizontal angle in degrees, kept in `[0, 360)`
    pub yaw: f64,
    /// Vertical angle in degrees, positive looks down
    pub pitch: f64,
    pub spotlight_on: bool,
    pub free_movement: bool,
    /// Time stamp of the last reset
    pub time: f64,
    pub settings: CameraConfig,
}

impl Camera {
    /// The camera the scene starts with.
    pub fn new(settings: CameraConfig, now: f64) -> Self {
        Self {
            position: DVec3::new(-1.0, 0.0, 2.0),
            direction: DVec3::new(-0.9, -0.3, 0.5),
            yaw: 170.0,
            pitch: 0.0,
            spotlight_on: false,
            free_movement: true,
            time: now,
            settings,
        }
    }

    pub fn apply_preset(&mut self, preset: CameraPreset) {
        let (position, direction, free) = preset.pose();
        self.position = position;
        self.direction = direction;
        self.free_movement = free;
    }

    /// Turn by a mouse motion of `(dx, dy)` pixels. Ignored unless free.
    ///
    /// Pitch changes are dropped when they would reach the vertical limit;
    /// yaw wraps around the full turn.
    pub fn look(&mut self, dx: f64, dy: f64) -> Result<()> {
        if !self.free_movement {
            return Ok(());
        }

        if dy != 0.0 {
            let delta = self.settings.mouse_sensitivity * dy;
            if (self.pitch + delta).abs() < self.settings.vertical_max {
                self.pitch += delta;
            }
        }

        if dx != 0.0 {
            self.yaw = cyclic_clamp(self.yaw + self.settings.mouse_sensitivity * dx, 0.0, 360.0)?;
            self.direction = DVec3::new(
                (-self.yaw).to_radians().sin(),
                0.0,
                self.yaw.to_radians().cos(),
            );
        }

        Ok(())
    }

    /// Sideways axis used for strafing.
    pub fn right(&self) -> Vector3 {
        self.direction.cross(Vector3::Y)
    }

    /// Viewing direction and up vector, with pitch applied in free mode.
    pub fn view_basis(&self) -> (Vector3, Vector3) {
        if !self.free_movement {
            return (self.direction, Vector3::Y);
        }
        match self.right().try_normalize() {
            Some(axis) => {
                let rotation = DMat3::from_axis_angle(axis, (-self.pitch).to_radians());
                (rotation * self.direction, rotation * Vector3::Y)
            }
            None => (self.direction, Vector3::Y),
        }
    }

    /// Point the camera looks at.
    pub fn center(&self) -> Point3 {
        self.position + self.view_basis().0
    }

    pub fn view_matrix(&self) -> DMat4 {
        let (forward, up) = self.view_basis();
        DMat4::look_at_rh(self.position, self.position + forward, up)
    }

    /// OpenGL-style perspective projection (-1 to 1 depth range).
    pub fn projection_matrix(&self, aspect: f64) -> DMat4 {
        DMat4::perspective_rh_gl(
            self.settings.fov_y.to_radians(),
            aspect,
            self.settings.near,
            self.settings.far,
        )
    }

    /// Ray through the crosshair.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.view_basis().0)
    }

    /// Reflector position and direction when the spotlight is on.
    pub fn spotlight(&self) -> Option<(Point3, Vector3)> {
        self.spotlight_on
            .then(|| (self.position, self.center() - self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec4;

    fn camera() -> Camera {
        Camera::new(CameraConfig::default(), 0.0)
    }

    #[test]
    fn test_initial_camera() {
        let cam = camera();
        assert_eq!(cam.position, Point3::new(-1.0, 0.0, 2.0));
        assert_eq!(cam.yaw, 170.0);
        assert!(cam.free_movement);
        assert!(!cam.spotlight_on);
    }

    #[test]
    fn test_presets() {
        let mut cam = camera();
        cam.apply_preset(CameraPreset::StaticFirst);
        assert_eq!(cam.position, Point3::new(5.0, 5.0, -9.0));
        assert!(!cam.free_movement);
        cam.apply_preset(CameraPreset::StaticSecond);
        assert_eq!(cam.direction, Vector3::new(-1.0, 0.0, -1.0));
        cam.apply_preset(CameraPreset::Free);
        assert!(cam.free_movement);
        assert_eq!(cam.position, Point3::new(-1.0, 0.0, 2.0));
    }

    #[test]
    fn test_look_wraps_yaw() {
        let mut cam = camera();
        cam.look(400.0, 0.0).unwrap(); // 170 + 200 = 370
        assert!((cam.yaw - 10.0).abs() < 1e-10);
        cam.look(-40.0, 0.0).unwrap(); // 10 - 20 = -10
        assert!((cam.yaw - 350.0).abs() < 1e-10);
        assert_eq!(cam.direction.y, 0.0);
        assert!((cam.direction.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_look_limits_pitch() {
        let mut cam = camera();
        cam.look(0.0, 100.0).unwrap();
        assert_eq!(cam.pitch, 50.0);
        // would reach 100 degrees: dropped
        cam.look(0.0, 100.0).unwrap();
        assert_eq!(cam.pitch, 50.0);
        cam.look(0.0, -60.0).unwrap();
        assert_eq!(cam.pitch, 20.0);
    }

    #[test]
    fn test_look_ignored_for_static_camera() {
        let mut cam = camera();
        cam.apply_preset(CameraPreset::StaticFirst);
        let before = cam.direction;
        cam.look(50.0, 50.0).unwrap();
        assert_eq!(cam.direction, before);
        assert_eq!(cam.pitch, 0.0);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut cam = camera();
        cam.look(2.0, 0.0).unwrap();
        cam.look(0.0, 60.0).unwrap();
        let (forward, up) = cam.view_basis();
        assert!(forward.y < 0.0);
        assert!(up.y > 0.0);
        assert!(forward.dot(up).abs() < 1e-10);
    }

    #[test]
    fn test_view_matrix_moves_eye_to_origin() {
        let cam = camera();
        let view = cam.view_matrix();
        let eye = view * cam.position.extend(1.0);
        assert!((eye - DVec4::new(0.0, 0.0, 0.0, 1.0)).length() < 1e-10);
        // the look-at center lies straight ahead on -Z
        let ahead = view.transform_point3(cam.center());
        assert!(ahead.x.abs() < 1e-10 && ahead.y.abs() < 1e-10 && ahead.z < 0.0);
    }

    #[test]
    fn test_projection_matrix() {
        let cam = camera();
        let proj = cam.projection_matrix(16.0 / 9.0);
        assert!(proj.x_axis.x > 0.0);
        assert!(proj.y_axis.y > 0.0);
        assert!(proj.z_axis.z < 0.0);
        assert!((proj.z_axis.w + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_spotlight_only_when_on() {
        let mut cam = camera();
        assert!(cam.spotlight().is_none());
        cam.spotlight_on = true;
        let (pos, dir) = cam.spotlight().unwrap();
        assert_eq!(pos, cam.position);
        assert!(dir.length() > 0.0);
    }
}
