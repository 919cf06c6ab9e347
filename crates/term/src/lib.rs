//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: the view draws a
//! [`core::GameSnapshot`] into a plain framebuffer, and the renderer flushes
//! only the cells that changed since the previous frame.
//!
//! Board cells are drawn two columns wide to offset the usual terminal glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
