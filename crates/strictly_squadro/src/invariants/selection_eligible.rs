//! Selection invariant: only the mover's pieces in play can be selected.

use super::super::types::GameState;
use super::Invariant;

/// Invariant: the selected piece, if any, belongs to the current player and
/// is not completed.
pub struct SelectionEligibleInvariant;

impl Invariant<GameState> for SelectionEligibleInvariant {
    fn holds(state: &GameState) -> bool {
        state.selected().is_none_or(|id| state.is_selectable(id))
    }

    fn description() -> &'static str {
        "Selection belongs to the current player and is still in play"
    }
}
