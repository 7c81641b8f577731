//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the rules of the lighting-fixture block game: the
//! catalog, the object-based board, placement legality, line clearing with
//! whole-block deletion and gravity, scoring and the game loop state machine.
//! It has **no dependencies** on rendering, terminals or sockets, making it:
//!
//! - **Deterministic**: Same seed (or the same scripted sequence) replays the same game
//! - **Testable**: Every rule is exercised by unit tests against hand-built boards
//! - **Portable**: Any driver can host it by forwarding commands and elapsed time
//!
//! # Module Structure
//!
//! - [`catalog`]: Block kinds with their shape, color and artwork size class
//! - [`board`]: Placed-block arena plus the per-cell occupancy index
//! - [`collision`]: `can_place` and committing a falling block
//! - [`resolve`]: Full-row removal, whole-block deletion and settling
//! - [`scoring`]: Points, level and fall speed
//! - [`rng`]: Seeded and scripted block sources
//! - [`timer`]: Fall scheduler with stale-deadline detection
//! - [`game_state`]: Phases, commands, spawning and game over
//! - [`events`] / [`snapshot`]: What the outside world observes
//!
//! # Game Rules
//!
//! - **Whole blocks**: Once committed, a block stays one object. If a clear
//!   touches any of its cells the whole block disappears.
//! - **Gravity**: After a clear (and by default after every commit) blocks
//!   fall as rigid bodies, lowest first, until they rest on the floor or on
//!   another block. New full rows cascade into further clears.
//! - **Scoring**: `lines * 100 * level` per commit; level is `score / 1000 + 1`.
//! - **Speed**: The fall interval starts at 1000ms and drops 100ms per level
//!   down to 500ms.
//!
//! # Example
//!
//! ```
//! use led_tetris_core::{Game, GameConfig, GamePhase, SequenceSource};
//! use led_tetris_types::{BlockKind, GameCommand};
//!
//! let mut game = Game::new(GameConfig::default(), SequenceSource::repeat(BlockKind::SquareLight));
//! game.start_game();
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.handle_command(GameCommand::MoveLeft);
//! game.tick(1000); // one automatic descent
//!
//! let active = game.active().unwrap();
//! assert_eq!((active.x, active.y), (4, 1));
//! ```

pub mod board;
pub mod catalog;
pub mod collision;
pub mod config;
pub mod events;
pub mod game_state;
pub mod resolve;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timer;

pub use led_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{BlockId, Board, PlacedBlock};
pub use catalog::{get_shape, lookup, BlockSpec, Shape};
pub use collision::{can_place, commit, CommitOutcome};
pub use config::{ConfigError, GameConfig, RotationPolicy};
pub use events::{GameEvent, GameListener};
pub use game_state::{FallingBlock, Game, GamePhase, PhaseEvent, StepOutcome};
pub use resolve::{resolve, GravityPolicy, Resolution};
pub use rng::{BlockSource, RandomBlockSource, SequenceSource, SimpleRng};
pub use scoring::GameStats;
pub use snapshot::{ActiveSnapshot, GameSnapshot, PlacedSnapshot};
pub use timer::FallTimer;
