//! Scene objects: a placement and timing record plus optional capabilities.

use castle_geometry::{ClosedSpline, Curve};
use castle_math::{DMat3, DMat4, Point3, Transform, Vector3};
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::config::PropConfig;

new_key_type! {
    /// Arena handle of a [`SceneObject`].
    pub struct ObjectKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Broom,
    Cauldron,
    Castle,
    Wand,
    Table,
    Door,
    OpenedDoor,
    Ground,
    Tree,
    Banner,
    AnimatedBanner,
    Flame,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 12] = [
        ObjectKind::Broom,
        ObjectKind::Cauldron,
        ObjectKind::Castle,
        ObjectKind::Wand,
        ObjectKind::Table,
        ObjectKind::Door,
        ObjectKind::OpenedDoor,
        ObjectKind::Ground,
        ObjectKind::Tree,
        ObjectKind::Banner,
        ObjectKind::AnimatedBanner,
        ObjectKind::Flame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Broom => "broom",
            ObjectKind::Cauldron => "cauldron",
            ObjectKind::Castle => "castle",
            ObjectKind::Wand => "wand",
            ObjectKind::Table => "table",
            ObjectKind::Door => "door",
            ObjectKind::OpenedDoor => "opened door",
            ObjectKind::Ground => "ground",
            ObjectKind::Tree => "tree",
            ObjectKind::Banner => "banner",
            ObjectKind::AnimatedBanner => "animated banner",
            ObjectKind::Flame => "flame",
        }
    }
}

/// Where an object is, which way it faces and how big it is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point3,
    pub direction: Vector3,
    pub size: f64,
}

impl Placement {
    pub fn model_matrix(&self) -> Transform {
        Transform::placed(self.position, self.size)
    }
}

impl From<&PropConfig> for Placement {
    fn from(prop: &PropConfig) -> Self {
        Self {
            position: prop.position,
            direction: prop.direction,
            size: prop.size,
        }
    }
}

/// Start and latest update time stamps, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Timing {
    pub start: f64,
    pub current: f64,
}

impl Timing {
    pub fn starting_at(now: f64) -> Self {
        Self {
            start: now,
            current: now,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.current - self.start
    }
}

/// Moves an object along a closed spline, offset from a base position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFollower {
    pub base_position: Point3,
    /// Curve parameter units per second
    pub speed: f64,
}

impl CurveFollower {
    /// Curve parameter reached after `elapsed` seconds.
    pub fn parameter(&self, elapsed: f64) -> f64 {
        self.speed * elapsed
    }

    /// Advance to time `now`, writing the new position and heading.
    ///
    /// The heading is left unchanged where the curve is stationary.
    /// Returns the curve parameter used.
    pub fn advance(
        &self,
        spline: &ClosedSpline,
        placement: &mut Placement,
        timing: &mut Timing,
        now: f64,
    ) -> f64 {
        timing.current = now;
        let t = self.parameter(timing.elapsed());
        placement.position = self.base_position + spline.point_at(t);
        if let Some(direction) = spline.direction_at(t) {
            placement.direction = direction;
        }
        t
    }
}

/// Sprite-sheet animation played on a loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameAnimation {
    pub frames: u32,
    /// Seconds per frame
    pub frame_duration: f64,
}

impl FrameAnimation {
    /// Frame shown `elapsed` seconds after the animation started.
    pub fn frame_at(&self, elapsed: f64) -> u32 {
        if self.frames == 0 || self.frame_duration <= 0.0 {
            return 0;
        }
        let ticks = (elapsed / self.frame_duration).floor();
        ticks.rem_euclid(self.frames as f64) as u32 % self.frames
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub placement: Placement,
    pub timing: Timing,
    pub follower: Option<CurveFollower>,
    pub animation: Option<FrameAnimation>,
}

impl SceneObject {
    pub fn new(kind: ObjectKind, placement: Placement, now: f64) -> Self {
        Self {
            kind,
            placement,
            timing: Timing::starting_at(now),
            follower: None,
            animation: None,
        }
    }

    pub fn with_follower(mut self, follower: CurveFollower) -> Self {
        self.follower = Some(follower);
        self
    }

    pub fn with_animation(mut self, animation: FrameAnimation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Restart the object's clock.
    pub fn restart_timing(&mut self, now: f64) {
        self.timing = Timing::starting_at(now);
    }

    /// Model transform: curve followers face their heading with +Y up,
    /// everything else is translated and scaled only.
    pub fn model_matrix(&self) -> Transform {
        match self.follower {
            Some(_) => Transform::aligned(
                self.placement.position,
                self.placement.direction,
                Vector3::Y,
                self.placement.size,
            ),
            None => self.placement.model_matrix(),
        }
    }

    /// Model transform that keeps the quad facing the camera.
    pub fn billboard_matrix(&self, view: &DMat4) -> Transform {
        let inverse_rotation = DMat3::from_mat4(*view).transpose();
        let facing = Transform::from_mat4(DMat4::from_mat3(inverse_rotation));
        facing.then(&self.placement.model_matrix())
    }

    pub fn current_frame(&self) -> Option<u32> {
        self.animation.map(|a| a.frame_at(self.timing.elapsed()))
    }
}
