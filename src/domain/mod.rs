//! Domain layer containing the decision logic and its value types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, confidence, errors)
//! - `analysis` - Independent signal analyzers (sentiment, temporal, complexity, pattern)
//! - `decision` - Requests, results, scoring branches, narrative and fallback
//! - `profile` - Per-session preference profile and personal alignment

pub mod analysis;
pub mod decision;
pub mod foundation;
pub mod profile;
