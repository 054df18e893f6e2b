//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types that form the
//! vocabulary of the decision engine.

mod confidence;
mod errors;
mod ids;
mod timestamp;

pub use confidence::{clamp_unit, Confidence};
pub use errors::ValidationError;
pub use ids::SessionId;
pub use timestamp::Timestamp;
