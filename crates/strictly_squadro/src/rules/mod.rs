//! Game-ending rules for Squadro.
//!
//! Pure functions over a [`GameState`](crate::GameState), kept apart from
//! the move engine so they can be checked on any snapshot.

pub mod win;

pub use win::{WIN_THRESHOLD, winner};
