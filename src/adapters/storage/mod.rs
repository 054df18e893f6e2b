//! Storage Adapters
//!
//! Implementations of the HistorySink port.
//!
//! ## Available Adapters
//!
//! - **FileHistorySink** - Stores the history as a YAML file on disk
//! - **InMemoryHistorySink** - Keeps the history in memory (default, tests)

mod file_history;
mod in_memory_history;

pub use file_history::FileHistorySink;
pub use in_memory_history::InMemoryHistorySink;
