//! Per-frame snapshot handed to a renderer.

use castle_math::{DMat4, Point3, Transform, Vector3};
use serde::Serialize;

use crate::object::ObjectKind;
use crate::picking::Interactable;
use crate::state::SimulationState;

/// One object to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderItem {
    pub kind: ObjectKind,
    pub model: Transform,
    /// Stencil id to write, for clickable objects
    pub pick: Option<Interactable>,
    /// Sprite-sheet frame, for animated objects
    pub frame: Option<u32>,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub view: Transform,
    pub projection: Transform,
    pub items: Vec<RenderItem>,
    pub fog: bool,
    /// Reflector position and direction
    pub spotlight: Option<(Point3, Vector3)>,
    pub elapsed: f64,
}

impl RenderFrame {
    pub fn item(&self, kind: ObjectKind) -> Option<&RenderItem> {
        self.items.iter().find(|item| item.kind == kind)
    }

    pub fn contains(&self, kind: ObjectKind) -> bool {
        self.item(kind).is_some()
    }
}

impl SimulationState {
    fn is_visible(&self, kind: ObjectKind) -> bool {
        let game = &self.game;
        match kind {
            ObjectKind::Wand => !game.wand_grabbed,
            ObjectKind::Door => !game.alohomora,
            ObjectKind::OpenedDoor => game.alohomora,
            ObjectKind::Banner => game.banner_on,
            ObjectKind::AnimatedBanner => game.game_over,
            _ => true,
        }
    }

    fn render_item(&self, kind: ObjectKind, view: &DMat4) -> RenderItem {
        let object = self.object(kind);
        let model = match kind {
            ObjectKind::Flame => object.billboard_matrix(view),
            _ => object.model_matrix(),
        };
        let pick = match kind {
            ObjectKind::Wand => Some(Interactable::Wand),
            ObjectKind::Cauldron => Some(Interactable::Cauldron),
            ObjectKind::Door | ObjectKind::OpenedDoor => Some(Interactable::Door),
            _ => None,
        };
        RenderItem {
            kind,
            model,
            pick,
            frame: object.current_frame(),
        }
    }

    /// Snapshot of the visible scene from the current camera.
    pub fn render_frame(&self) -> RenderFrame {
        let view = self.camera.view_matrix();
        let items = ObjectKind::ALL
            .into_iter()
            .filter(|&kind| self.is_visible(kind))
            .map(|kind| self.render_item(kind, &view))
            .collect();

        RenderFrame {
            view: Transform::from_mat4(view),
            projection: Transform::from_mat4(self.camera.projection_matrix(self.game.aspect_ratio())),
            items,
            fog: self.game.fog,
            spotlight: self.camera.spotlight(),
            elapsed: self.game.elapsed_time,
        }
    }
}
