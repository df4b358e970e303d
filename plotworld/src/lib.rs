//! Meta-crate re-exporting all libraries of plotworld.

pub use plotworld_core;
pub use plotworld_engine;
