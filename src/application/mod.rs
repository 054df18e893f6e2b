//! Application layer - orchestration over the domain and the ports.
//!
//! - `DecisionEngine` - end-to-end decision pipeline with fallback
//! - `UserProfileStore` - lazy per-session profiles
//! - `EngineState` - injected history sink and profile repository

mod engine;
mod profile_store;
mod state;

pub use engine::{DecisionEngine, EngineError};
pub use profile_store::UserProfileStore;
pub use state::EngineState;
