pub mod error;
pub mod tolerance;
pub mod traits;

pub use error::{Result, SceneError};
pub use tolerance::Tolerance;
pub use traits::Validate;
