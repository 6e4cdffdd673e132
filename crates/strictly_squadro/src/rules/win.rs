//! Win detection logic for Squadro.

use super::super::types::{GameState, Side};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Completed pieces a side needs to win. One of the five may stay in play.
pub const WIN_THRESHOLD: usize = 4;

/// Returns the side with at least four completed pieces, if any.
///
/// Yellow is checked first.
#[instrument(skip(state))]
pub fn winner(state: &GameState) -> Option<Side> {
    Side::iter().find(|&side| state.completed_count(side) >= WIN_THRESHOLD)
}
