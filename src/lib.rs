//! Arcade - a terminal arcade cabinet.
//!
//! Four small games behind one menu, built on a shared simulation core.
//! This library exposes the game logic for testing; the binary owns the
//! terminal.

// Allow dead code in the library build - some functions are only used by
// the binary
#![allow(dead_code)]

pub mod build_info;
pub mod core;
pub mod games;
pub mod input;
pub mod scores;
pub mod utils;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;
