//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, state management and simulation logic.
//! It has no dependencies on the terminal or on I/O, so the same engine runs
//! under the interactive driver, in tests, and in benchmarks.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with placement checks and line clearing
//! - [`game_state`]: the engine: current/next piece, gravity, lock cycle, scoring
//! - [`pieces`]: static shape tables and the falling piece value
//! - [`rng`]: seeded piece randomizer (uniform or 7-bag)
//! - [`scoring`]: line clear points, levels and gravity speed
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at column 4, one row above the visible grid
//! - Rotation is clockwise only, with no wall kicks
//! - A piece locks when gravity cannot move it down, or on hard drop
//! - Clearing 1/2/3/4 lines scores 100/300/500/800 times the level
//! - The level is `lines / 10 + 1`; gravity speeds up by 100ms per level down to 50ms
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! // A single piece cannot complete a row.
//! assert_eq!(game.score(), 0);
//! assert!(!game.board().cells().iter().all(|c| c.is_none()));
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity moves the piece at most one row per call.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{get_shape, shape_matrix, shape_rotations, ShapeMatrix, Tetromino, SPAWN_POSITION};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use scoring::{calculate_level, fall_interval_ms, line_clear_score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
