//! Blockfall: falling tetrominoes, row sweeps, and a phase state machine.

pub mod logic;
pub mod types;

pub use logic::{advance, process_intent};
pub use types::BlocksGame;
