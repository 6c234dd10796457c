//! Infrastructure adapters for Kinstall.
//!
//! This crate implements the ports defined in `kinstall-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod layout;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use layout::StandardLayout;
