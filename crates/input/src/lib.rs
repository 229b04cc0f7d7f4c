//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! a DAS/ARR handler for held movement keys, including terminals that do not
//! report key releases.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, held_key, should_quit, HeldKey};
