//! Error types for the launcher protocol layer.

mod storage;
mod tabs;

pub use storage::*;
pub use tabs::*;
