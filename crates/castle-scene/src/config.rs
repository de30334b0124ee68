//! Scene configuration: window, movement tuning, object placements and the
//! broom's flight loop.
//!
//! Every field has a default matching the stock castle scene, so a JSON file
//! only needs to list what it changes.

use std::path::Path;

use castle_core::{Result, SceneError, Validate};
use castle_geometry::spline::MIN_CONTROL_POINTS;
use castle_math::{Aabb3, Point3, Vector3, DVec3};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Delay between simulation ticks, in milliseconds
    pub refresh_ms: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Castle".to_string(),
            refresh_ms: 33,
        }
    }
}

/// Initial position, facing and uniform size of a static prop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropConfig {
    pub position: Point3,
    #[serde(default)]
    pub direction: Vector3,
    pub size: f64,
}

impl PropConfig {
    pub fn new(position: Point3, direction: Vector3, size: f64) -> Self {
        Self {
            position,
            direction,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroomConfig {
    /// Loop origin; control points are offsets from it
    pub position: Point3,
    pub direction: Vector3,
    pub size: f64,
    /// Curve parameter units per second
    pub speed: f64,
    pub control_points: Vec<Point3>,
}

impl Default for BroomConfig {
    fn default() -> Self {
        Self {
            position: DVec3::new(-7.0, 1.5, -7.0),
            direction: DVec3::new(3.0, -1.0, 1.5),
            size: 1.0,
            speed: 2.0,
            control_points: vec![
                DVec3::new(-5.6, 3.0, -6.3),
                DVec3::new(-6.8, 2.0, -8.7),
                DVec3::new(-8.7, 3.0, -9.3),
                DVec3::new(-9.2, 3.0, -7.0),
                DVec3::new(-9.7, 2.0, -5.1),
                DVec3::new(-7.4, 1.0, -4.7),
                DVec3::new(-5.1, 2.0, -2.0),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlameConfig {
    pub position: Point3,
    pub direction: Vector3,
    pub size: f64,
    /// Frames in the texture atlas (4 x 4)
    pub frames: u32,
    /// Seconds each frame is shown
    pub frame_duration: f64,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            position: DVec3::new(-2.0, 3.0, -16.5),
            direction: Vector3::Z,
            size: 1.0,
            frames: 16,
            frame_duration: 0.06,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropsConfig {
    pub cauldron: PropConfig,
    pub castle: PropConfig,
    pub wand: PropConfig,
    pub table: PropConfig,
    pub door: PropConfig,
    pub opened_door: PropConfig,
    pub ground: PropConfig,
    pub tree: PropConfig,
    pub banner: PropConfig,
    pub animated_banner: PropConfig,
}

impl Default for PropsConfig {
    fn default() -> Self {
        Self {
            cauldron: PropConfig::new(DVec3::new(11.5, 0.0, -11.3), Vector3::X, 0.5),
            castle: PropConfig::new(DVec3::new(-2.0, 16.6, -23.0), Vector3::ZERO, 20.0),
            wand: PropConfig::new(DVec3::new(8.3, 0.1, -11.0), Vector3::ZERO, 0.2),
            table: PropConfig::new(DVec3::new(8.3, -0.1, -11.0), Vector3::ZERO, 0.6),
            door: PropConfig::new(DVec3::new(6.5, 0.7, -23.0), Vector3::ZERO, 2.2),
            opened_door: PropConfig::new(DVec3::new(5.35, 0.7, -21.2), Vector3::ZERO, 2.2),
            ground: PropConfig::new(DVec3::new(-70.0, -0.4, -70.0), Vector3::ZERO, 100.0),
            tree: PropConfig::new(DVec3::new(1.5, -0.4, -15.0), Vector3::ZERO, 2.0),
            banner: PropConfig::new(Point3::ZERO, Vector3::Y, 1.0),
            animated_banner: PropConfig::new(Point3::ZERO, Vector3::Y, 1.0),
        }
    }
}

/// Walkable area and the keep-out radii around props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub walk_area: Aabb3,
    pub table_radius: f64,
    pub cauldron_radius: f64,
    /// Horizontal keep-out once the cauldron has been enlarged
    pub enlarged_cauldron_radius: f64,
    pub tree_radius: f64,
    pub door_radius: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            walk_area: Aabb3::new(DVec3::new(-22.0, 0.0, -40.0), DVec3::new(22.0, 0.0, 10.0)),
            table_radius: 0.5,
            cauldron_radius: 0.6,
            enlarged_cauldron_radius: 1.0,
            tree_radius: 0.6,
            door_radius: 1.0,
        }
    }
}

/// Reach distances for the scripted interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub wand_reach: f64,
    pub spell_reach: f64,
    /// Cauldron size multiplier for the growth spell
    pub growth_factor: f64,
    /// Added to every coordinate of the cauldron position when it grows
    pub growth_offset: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            wand_reach: 1.5,
            spell_reach: 5.0,
            growth_factor: 5.0,
            growth_offset: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Walking speed in scene units per second
    pub walk_speed: f64,
    /// Degrees of rotation per pixel of mouse motion
    pub mouse_sensitivity: f64,
    /// Largest pitch (degrees) the free camera may reach
    pub vertical_max: f64,
    /// Vertical field of view in degrees
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            walk_speed: 20.0,
            mouse_sensitivity: 0.5,
            vertical_max: 90.0,
            fov_y: 70.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub broom: BroomConfig,
    pub flame: FlameConfig,
    pub props: PropsConfig,
    pub collision: CollisionConfig,
    pub interaction: InteractionConfig,
}

impl SceneConfig {
    /// Read and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Time step matching the configured refresh interval, in seconds.
    pub fn tick_seconds(&self) -> f64 {
        self.window.refresh_ms as f64 / 1000.0
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::Config(format!("{} must be positive, got {}", name, value)))
    }
}

impl Validate for SceneConfig {
    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(SceneError::Config(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.window.refresh_ms == 0 {
            return Err(SceneError::Config("refresh_ms must be non-zero".into()));
        }

        if self.broom.control_points.len() < MIN_CONTROL_POINTS {
            return Err(SceneError::Config(format!(
                "broom loop needs at least {} control points, got {}",
                MIN_CONTROL_POINTS,
                self.broom.control_points.len()
            )));
        }
        require_positive("broom.speed", self.broom.speed)?;
        require_positive("broom.size", self.broom.size)?;

        require_positive("flame.size", self.flame.size)?;
        require_positive("flame.frame_duration", self.flame.frame_duration)?;
        if self.flame.frames == 0 {
            return Err(SceneError::Config("flame.frames must be non-zero".into()));
        }

        let props = &self.props;
        for (name, prop) in [
            ("cauldron", &props.cauldron),
            ("castle", &props.castle),
            ("wand", &props.wand),
            ("table", &props.table),
            ("door", &props.door),
            ("opened_door", &props.opened_door),
            ("ground", &props.ground),
            ("tree", &props.tree),
            ("banner", &props.banner),
            ("animated_banner", &props.animated_banner),
        ] {
            require_positive(&format!("props.{}.size", name), prop.size)?;
        }

        require_positive("camera.walk_speed", self.camera.walk_speed)?;
        require_positive("camera.vertical_max", self.camera.vertical_max)?;
        require_positive("camera.fov_y", self.camera.fov_y)?;
        require_positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(SceneError::Config(format!(
                "camera.far ({}) must exceed camera.near ({})",
                self.camera.far, self.camera.near
            )));
        }

        let area = &self.collision.walk_area;
        if area.min.x > area.max.x || area.min.z > area.max.z {
            return Err(SceneError::Config("collision.walk_area is inverted".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.broom.control_points.len(), 7);
        assert_eq!(config.window.title, "Castle");
        assert!((config.tick_seconds() - 0.033).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json_str(r#"{ "broom": { "speed": 0.5 } }"#).unwrap();
        assert_eq!(config.broom.speed, 0.5);
        assert_eq!(config.broom.control_points.len(), 7);
        assert_eq!(config.camera.walk_speed, 20.0);
    }

    #[test]
    fn test_short_loop_rejected() {
        let err = SceneConfig::from_json_str(
            r#"{ "broom": { "control_points": [[0,0,0],[1,0,0],[0,0,1]] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::Config(_)));
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut config = SceneConfig::default();
        config.flame.frames = 0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.props.wand.size = -1.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.camera.far = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = SceneConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SceneError::Json(_)));
    }
}
