//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and adds the driver
//! configuration used by the `blockfall` binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
