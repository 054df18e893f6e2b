//! Decision module - request, result and the pure stages between them.
//!
//! # Components
//!
//! - `DecisionRequest` / `DecisionResult` - what callers send and receive
//! - `DecisionRecord` / `DecisionHistory` - capped log of past results
//! - `scoring` - open-ended, binary and multi-choice branches plus refinement
//! - `narrative` - guidance templates, reasoning and follow-ups
//! - `fallback` - the default decision when anything upstream fails
//! - `RandomSource` - injectable randomness for the stochastic branches

pub mod fallback;
mod history;
pub mod narrative;
pub mod random;
mod record;
mod request;
mod result;
pub mod scoring;
mod signals;

pub use fallback::fallback_decision;
pub use history::{DecisionHistory, HistoryLimits, DEFAULT_HISTORY_CAP, DEFAULT_HISTORY_TRIM_TO};
pub use narrative::{generate_follow_ups, generate_reasoning};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use record::DecisionRecord;
pub use request::{DecisionContext, DecisionRequest, OptionShape};
pub use result::{Algorithm, DecisionFactors, DecisionResult};
pub use scoring::{refine_confidence, ScoredDecision};
pub use signals::DecisionSignals;

#[cfg(test)]
pub(crate) use signals::fixtures;
