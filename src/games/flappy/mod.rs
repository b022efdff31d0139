//! Flappy glider: gravity bird versus scrolling pipe columns.

pub mod logic;
pub mod types;

pub use logic::{advance, process_intent};
pub use types::FlappyGame;
