//! Error types for component operations.

use thiserror::Error;
use ts_core::error::TsError;

/// Errors that can occur while building or evaluating components.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ComponentError> for TsError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::InvalidGeometry { what } => TsError::InvalidArg { what },
            ComponentError::NonPhysical { what } => TsError::InvalidArg { what },
            ComponentError::InvalidArg { what } => TsError::InvalidArg { what },
        }
    }
}
