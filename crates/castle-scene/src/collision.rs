//! Keeps the walking camera inside the courtyard and out of the props.

use castle_math::{Point3, DVec3};

use crate::config::CollisionConfig;

/// Obstacle positions and the flags that change their footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacles {
    pub table: Point3,
    pub cauldron: Point3,
    pub tree: Point3,
    pub door: Point3,
    pub cauldron_enlarged: bool,
    pub door_open: bool,
}

/// True when `pos` would collide with the scene.
pub fn check_collision(config: &CollisionConfig, obstacles: &Obstacles, pos: Point3) -> bool {
    if !config.walk_area.contains_xz(pos) {
        return true;
    }

    if obstacles.table.distance(pos) < config.table_radius {
        return true;
    }

    if obstacles.cauldron_enlarged {
        let level = DVec3::new(obstacles.cauldron.x, pos.y, obstacles.cauldron.z);
        if level.distance(pos) < config.enlarged_cauldron_radius {
            return true;
        }
    }
    if obstacles.cauldron.distance(pos) < config.cauldron_radius {
        return true;
    }

    if obstacles.tree.distance(pos) < config.tree_radius {
        return true;
    }

    !obstacles.door_open && obstacles.door.distance(pos) < config.door_radius
}
