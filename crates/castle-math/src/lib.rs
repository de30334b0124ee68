pub mod aabb;
pub mod align;
pub mod ray;
pub mod scalar;
pub mod transform;

pub use glam::{DVec2, DVec3, DVec4, DMat3, DMat4};
pub use aabb::Aabb3;
pub use align::align_object;
pub use ray::Ray;
pub use scalar::{cyclic_clamp, is_vector_near_null, is_vector_null, CyclicScalar};
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
