//! Star runner: platform hopping for crystals under late-enabled gravity.

pub mod logic;
pub mod types;

pub use logic::{advance, process_intent};
pub use types::SpaceGame;
