//! Profile adapters implementing the ProfileRepository port

mod filesystem;
mod in_memory;

pub use filesystem::FileProfileRepository;
pub use in_memory::InMemoryProfileRepository;
