//! Caller-owned game sessions on top of `memorizer-core`.
//!
//! A [`GameSession`] deals boards, forwards selections to the turn resolver, runs the
//! mismatch delay on the ambient tokio runtime and publishes a [`game::GameSnapshot`]
//! after every transition.

pub use memorizer_core as game;

pub use config::*;
pub use error::*;
pub use session::*;

mod config;
mod error;
mod session;
