//! State store adapters.

mod file_store;
mod memory_store;

pub use file_store::FileStateStore;
pub use memory_store::MemoryStateStore;
