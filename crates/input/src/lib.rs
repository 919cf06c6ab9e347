//! Terminal input (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events into
//! [`crate::types::GameAction`] presses and releases, and synthesizes
//! releases for terminals that never report them.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::KeyRouter;
pub use map::{handle_key_press, handle_key_release, held_key, should_quit, HeldKey};
