//! Contains the core types needed for most APIs.

mod block_id;
mod grid;
mod plot;

pub use block_id::*;
pub use grid::*;
pub use plot::*;
