//! Task catalogue
//!
//! Tasks are named units of work with a fixed routing policy. The catalogue
//! is built once at startup and never mutated afterwards.

pub mod definition;
pub mod registry;

pub use definition::{Complexity, TaskDefinition};
pub use registry::TaskRegistry;
