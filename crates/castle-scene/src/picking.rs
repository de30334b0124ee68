//! Interactive objects and how a click finds them.

use castle_math::{Point3, Ray};
use serde::{Deserialize, Serialize};

/// Objects the player can click on, with the ids the renderer writes into
/// its stencil buffer for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interactable {
    Wand,
    Cauldron,
    Door,
}

impl Interactable {
    pub const ALL: [Interactable; 3] = [Interactable::Wand, Interactable::Cauldron, Interactable::Door];

    pub fn stencil_id(self) -> u8 {
        match self {
            Interactable::Wand => 1,
            Interactable::Cauldron => 2,
            Interactable::Door => 3,
        }
    }

    /// Map a stencil read-back to an object; 0 is the background.
    pub fn from_stencil_id(id: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.stencil_id() == id)
    }
}

/// A pickable bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub target: Interactable,
    pub center: Point3,
    pub radius: f64,
}

/// Nearest target hit by `ray`, if any.
pub fn pick_along_ray(ray: &Ray, targets: &[PickTarget]) -> Option<Interactable> {
    targets
        .iter()
        .filter_map(|t| ray.intersect_sphere(t.center, t.radius).map(|hit| (hit, t.target)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, target)| target)
}
