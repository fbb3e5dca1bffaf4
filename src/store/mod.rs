//! Blob store implementations.

mod azure;
mod memory;
mod sink;

pub use azure::*;
pub use memory::*;
pub use sink::*;
