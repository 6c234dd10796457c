//! Namespace layout adapters.

mod standard;

pub use standard::StandardLayout;
