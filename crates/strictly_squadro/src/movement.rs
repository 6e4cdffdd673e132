//! Move engine: distance lookup, trajectory simulation and move resolution.
//!
//! Everything here is a pure function of a [`GameState`] and the [`Rules`].
//! [`resolve_move`] never touches its input; it returns a new owned state.

use super::action::{Bump, Move};
use super::speed::{CompletionRule, Rules};
use super::types::{Coord, GameState, PIECES_PER_SIDE, Piece, PieceId};
use tracing::{debug, instrument, warn};

/// Maps a piece's cross-axis coordinate to a lane index in `0..5`.
///
/// Lanes 1-5 map to indices 0-4. Anything else is clamped, which cannot
/// happen in a reachable state and is logged when it does.
#[instrument(skip(piece), fields(piece = %piece.id()))]
pub fn lane_index(piece: &Piece) -> usize {
    let raw = i16::from(piece.lane_coord()) - 1;
    let clamped = raw.clamp(0, PIECES_PER_SIDE as i16 - 1);
    if raw != clamped {
        warn!(lane_coord = piece.lane_coord(), "Lane coordinate out of range, clamping");
    }
    clamped as usize
}

/// Number of cells a piece travels this turn.
pub fn distance(rules: &Rules, piece: &Piece) -> u8 {
    rules
        .table(piece.side())
        .distance(piece.heading(), lane_index(piece))
}

/// Outcome of simulating a piece's trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovePlan {
    /// Cell the piece ends on.
    pub final_position: Coord,
    /// Opponent occupying the final cell, to be sent back.
    ///
    /// Simulation stops at the first opponent, so there is never more than one.
    pub bumped: Option<PieceId>,
}

/// Steps a piece one cell at a time along its direction.
///
/// Stops early at the board edge (no overshoot) or on the first cell held by
/// an opponent still in play, which the piece lands on.
#[instrument(skip(state, rules), fields(piece = %id))]
pub fn calculate_move(state: &GameState, rules: &Rules, id: PieceId) -> MovePlan {
    let piece = state.piece(id);
    let start = piece.position();
    let (dx, dy) = piece.direction().delta();
    let opponent = piece.side().opponent();

    let mut final_position = start;
    for step in 1..=i16::from(distance(rules, piece)) {
        let Some(next) = start.offset(dx * step, dy * step) else {
            break;
        };
        if let Some(hit) = state.active_piece_at(opponent, next) {
            return MovePlan {
                final_position: next,
                bumped: Some(hit.id()),
            };
        }
        final_position = next;
    }

    MovePlan {
        final_position,
        bumped: None,
    }
}

/// Applies the selected piece's move, returning the next state and a record.
///
/// Returns `None` when nothing is selected. The returned state has the
/// selection cleared and the turn passed to the other side.
#[instrument(skip(state, rules), fields(player = %state.current_player()))]
pub fn resolve_move(state: &GameState, rules: &Rules) -> Option<(GameState, Move)> {
    let id = state.selected()?;
    let plan = calculate_move(state, rules, id);
    let mut next = state.clone();

    let bump = plan.bumped.map(|victim_id| {
        let victim = next.piece_mut(victim_id);
        let from = victim.position();
        let to = victim.reset_cell();
        victim.set_position(to);
        debug!(victim = %victim_id, %from, %to, "Bumped opponent back");
        Bump {
            piece: victim_id,
            from,
            to,
        }
    });

    let mover = next.piece_mut(id);
    let from = mover.position();
    mover.set_position(plan.final_position);

    let was_returning = mover.is_returning();
    let reversed = mover.direction().is_terminal(plan.final_position);
    let mut completed = false;
    if reversed {
        mover.turn_around();
        completed = match rules.completion() {
            CompletionRule::Literal => mover.is_returning() && mover.on_home_edge(),
            CompletionRule::HomeArrival => was_returning && mover.on_home_edge(),
        };
        if completed {
            mover.complete();
        }
    }

    next.pass_turn();

    let record = Move {
        piece: id,
        from,
        to: plan.final_position,
        bump,
        reversed,
        completed,
    };
    debug!(%record, "Move resolved");
    Some((next, record))
}
