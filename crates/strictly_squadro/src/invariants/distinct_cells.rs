//! Distinct cells invariant: no two pieces in play share a cell.

use super::super::types::GameState;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: at most one non-completed piece per cell.
///
/// Completed pieces are inert and ignored.
pub struct DistinctCellsInvariant;

impl Invariant<GameState> for DistinctCellsInvariant {
    fn holds(state: &GameState) -> bool {
        let mut seen = HashSet::new();
        state
            .all_pieces()
            .filter(|p| !p.is_completed())
            .all(|p| seen.insert(p.position()))
    }

    fn description() -> &'static str {
        "No two pieces in play share a cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Piece, PieceId, Side};

    #[test]
    fn test_start_holds() {
        assert!(DistinctCellsInvariant::holds(&GameState::new()));
    }

    #[test]
    fn test_shared_cell_violates() {
        let y2 = PieceId::new(Side::Yellow, 2).unwrap();
        let r2 = PieceId::new(Side::Red, 2).unwrap();
        let state = GameState::new()
            .with_piece(Piece::new(y2).with_position(Coord::new(2, 2)))
            .with_piece(Piece::new(r2).with_position(Coord::new(2, 2)));
        assert!(!DistinctCellsInvariant::holds(&state));
    }

    #[test]
    fn test_completed_piece_does_not_count() {
        let y2 = PieceId::new(Side::Yellow, 2).unwrap();
        let r2 = PieceId::new(Side::Red, 2).unwrap();
        let state = GameState::new()
            .with_piece(Piece::new(y2).with_position(Coord::new(2, 2)).with_completed(true))
            .with_piece(Piece::new(r2).with_position(Coord::new(2, 2)));
        assert!(DistinctCellsInvariant::holds(&state));
    }
}
