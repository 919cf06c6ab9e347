//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof as
//! `blockfall::{core, input, term, types}` and adds the on-disk leaderboard.

pub mod scores;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
