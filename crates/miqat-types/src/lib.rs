//! Core types for miqat - Islamic prayer times engine.
//!
//! This crate contains pure type definitions with no astronomy or rule logic.

mod error;
mod geo;
mod prayer;

pub use error::MiqatError;
pub use geo::Location;
pub use prayer::Prayer;
