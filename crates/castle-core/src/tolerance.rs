/// Numeric thresholds shared by the scene math.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for lengths and distances (in scene units)
    pub linear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;

    pub fn new(linear: f64) -> Self {
        Self { linear }
    }

    /// Check if a length is zero within linear tolerance
    pub fn is_zero(self, v: f64) -> bool {
        v.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_precise() {
        let tol = Tolerance::default();
        assert_eq!(tol.linear, Tolerance::DEFAULT_LINEAR);
        assert!(tol.is_zero(1e-9));
        assert!(!tol.is_zero(1e-3));
    }

    #[test]
    fn test_custom_threshold() {
        let tol = Tolerance::new(1e-3);
        assert!(tol.is_zero(-5e-4));
        assert!(!tol.is_zero(2e-3));
    }
}
