//! Bounded positions invariant: every piece is on the board, in its own lane.

use super::super::types::{GameState, Side};
use super::Invariant;

/// Invariant: every piece lies within `0..=6` on both axes and keeps the
/// cross-axis coordinate of its lane.
///
/// Yellow piece `n` stays in column `n`, red piece `n` stays in row `n`.
/// A piece off its lane would have its speed silently clamped.
pub struct BoundedPositionsInvariant;

impl Invariant<GameState> for BoundedPositionsInvariant {
    fn holds(state: &GameState) -> bool {
        state.all_pieces().all(|piece| {
            let lane = match piece.side() {
                Side::Yellow => piece.position().x,
                Side::Red => piece.position().y,
            };
            piece.position().in_bounds() && lane == piece.id().number()
        })
    }

    fn description() -> &'static str {
        "Every piece is on the board and in its own lane"
    }
}
