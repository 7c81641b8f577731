//! LED Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as `led_tetris::{types, core, driver}`
//! so binaries, integration tests and benches depend on a single package.

pub use led_tetris_core as core;
pub use led_tetris_driver as driver;
pub use led_tetris_types as types;
