use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Parameter of the first hit with a sphere, or `None` on a miss.
    ///
    /// An origin inside the sphere hits at `t = 0`.
    pub fn intersect_sphere(&self, center: Point3, radius: f64) -> Option<f64> {
        let to_center = center - self.origin;
        if to_center.length_squared() <= radius * radius {
            return Some(0.0);
        }
        let along = to_center.dot(self.direction);
        if along < 0.0 {
            return None;
        }
        let miss_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;
        if miss_sq > radius_sq {
            return None;
        }
        Some(along - (radius_sq - miss_sq).sqrt())
    }
}
