//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the engine and its storage. Adapters implement these ports.
//!
//! - `HistorySink` - Bounded log of recorded decisions
//! - `ProfileRepository` - Session to preference profile map

mod history_sink;
mod profile_repository;

pub use history_sink::{HistorySink, PersistenceError};
pub use profile_repository::ProfileRepository;
