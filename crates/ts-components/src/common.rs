//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use ts_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive};

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Ensure a material or schedule parameter is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_positive(value, what).map_err(|_| ComponentError::NonPhysical { what })
}

/// Ensure a parameter is finite and not negative.
pub fn check_non_negative(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_non_negative(value, what).map_err(|_| ComponentError::InvalidArg { what })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_positive() {
        assert_eq!(check_positive(2.0, "test"), Ok(2.0));
        assert!(matches!(
            check_positive(0.0, "test"),
            Err(ComponentError::NonPhysical { what: "test" })
        ));
    }

    #[test]
    fn test_check_non_negative() {
        assert_eq!(check_non_negative(0.0, "test"), Ok(0.0));
        assert!(matches!(
            check_non_negative(-1.0, "test"),
            Err(ComponentError::InvalidArg { what: "test" })
        ));
    }
}
