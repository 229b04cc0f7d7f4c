//! Terminal rendering for the game.
//!
//! A small game-oriented layer: `GameView` draws a `GameSnapshot` into a
//! framebuffer of styled glyphs, and `TerminalRenderer` flushes it through
//! crossterm, sending only what changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
