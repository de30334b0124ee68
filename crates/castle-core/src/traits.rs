use crate::error::Result;

/// Validate the invariants of a configuration or geometric entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
