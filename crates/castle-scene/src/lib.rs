//! Castle scene simulation: objects, camera, input, collision, picking and
//! the tick loop a renderer drives.

pub mod camera;
pub mod collision;
pub mod config;
pub mod input;
pub mod object;
pub mod picking;
pub mod render;
pub mod state;

// Re-export main types
pub use camera::{Camera, CameraPreset};
pub use collision::{check_collision, Obstacles};
pub use config::SceneConfig;
pub use input::{Control, InputEvent, Key, Keyboard};
pub use object::{ObjectKey, ObjectKind, Placement, SceneObject};
pub use picking::{pick_along_ray, Interactable, PickTarget};
pub use render::{RenderFrame, RenderItem};
pub use state::{GameState, SceneHandles, SimulationState};
