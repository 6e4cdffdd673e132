//! Game engine for Squadro: live state, rules and undo history.

use super::action::Move;
use super::movement::{calculate_move, resolve_move};
use super::rules::winner;
use super::speed::Rules;
use super::types::{Coord, GameState, PIECES_PER_SIDE, Piece, PieceId, Side};
use tracing::{debug, instrument};

/// Squadro game engine.
///
/// Owns the live [`GameState`] exclusively. Every commit pushes an owned
/// snapshot of the prior state, so history entries never alias live state.
/// Invalid input (ineligible selection, commit without selection, undo with
/// no history) is ignored rather than reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    rules: Rules,
    state: GameState,
    history: Vec<GameState>,
}

impl Game {
    /// Creates a new game with the standard rules.
    #[instrument]
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// Creates a new game with custom rules.
    #[instrument(skip(rules))]
    pub fn with_rules(rules: Rules) -> Self {
        Self::from_state(rules, GameState::new())
    }

    /// Creates a game from an existing state, with empty history.
    #[instrument(skip(rules, state))]
    pub fn from_state(rules: Rules, state: GameState) -> Self {
        Self {
            rules,
            state,
            history: Vec::new(),
        }
    }

    /// Returns the live state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the rules in force.
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Player to move.
    pub fn current_player(&self) -> Side {
        self.state.current_player()
    }

    /// Pieces of a side.
    pub fn pieces(&self, side: Side) -> &[Piece; PIECES_PER_SIDE] {
        self.state.pieces(side)
    }

    /// Number of completed pieces of a side.
    pub fn completed_count(&self, side: Side) -> usize {
        self.state.completed_count(side)
    }

    /// Piece on a cell, if any.
    pub fn piece_at(&self, cell: Coord) -> Option<&Piece> {
        self.state.piece_at(cell)
    }

    /// Number of snapshots on the undo stack.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// True if there is a move to undo.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Toggles selection of a piece; see [`GameState::select`].
    pub fn select_piece(&mut self, id: PieceId) {
        self.state.select(id);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.state.clear_selection();
    }

    /// Where the selected piece would end up, if a piece is selected.
    #[instrument(skip(self))]
    pub fn preview_destination(&self) -> Option<Coord> {
        let id = self.state.selected()?;
        Some(calculate_move(&self.state, &self.rules, id).final_position)
    }

    /// True if `cell` should be highlighted as the selected piece's target.
    ///
    /// Cells holding any piece are never highlighted, including the cell of
    /// an opponent that would be bumped.
    pub fn is_destination(&self, cell: Coord) -> bool {
        self.preview_destination() == Some(cell) && self.state.piece_at(cell).is_none()
    }

    /// Commits the selected piece's move.
    ///
    /// Returns a record of the move, or `None` without touching anything if
    /// no piece is selected. The new state is available from [`Game::state`].
    #[instrument(skip(self), fields(player = %self.state.current_player()))]
    pub fn commit_move(&mut self) -> Option<Move> {
        let Some((next, record)) = resolve_move(&self.state, &self.rules) else {
            debug!("No piece selected, ignoring commit");
            return None;
        };

        #[cfg(debug_assertions)]
        check_invariants(&next, &record);

        self.history.push(std::mem::replace(&mut self.state, next));
        debug!(%record, history = self.history.len(), "Move committed");
        Some(record)
    }

    /// Restores the state from before the last commit.
    ///
    /// Returns the restored state, or `None` if there is nothing to undo.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Option<&GameState> {
        let Some(previous) = self.history.pop() else {
            debug!("History empty, ignoring undo");
            return None;
        };
        self.state = previous;
        debug!(history = self.history.len(), "Move undone");
        Some(&self.state)
    }

    /// Side with at least four completed pieces, if any.
    pub fn winner(&self) -> Option<Side> {
        winner(&self.state)
    }

    /// Restores the starting layout and clears history. Rules are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
        self.history.clear();
    }
}

/// Logs any invariant broken by a committed move.
#[cfg(debug_assertions)]
fn check_invariants(state: &GameState, record: &Move) {
    use super::invariants::{InvariantSet, SquadroInvariants};
    use tracing::warn;

    if let Err(violations) = SquadroInvariants::check_all(state) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%record, descriptions = %descriptions, "Invariant violated after move");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
