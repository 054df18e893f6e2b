//! Adapters - Implementations of port interfaces.
//!
//! - `storage` - Decision history sinks (in-memory, YAML file)
//! - `profile` - Profile repositories (in-memory, YAML files)

pub mod profile;
pub mod storage;

pub use profile::{FileProfileRepository, InMemoryProfileRepository};
pub use storage::{FileHistorySink, InMemoryHistorySink};
