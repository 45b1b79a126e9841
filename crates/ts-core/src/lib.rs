//! ts-core: stable foundation for thermosurge.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + finiteness and sign guards)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TsError, TsResult};
pub use numeric::*;
pub use units::*;
