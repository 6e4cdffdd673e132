//! Formal verification of the move engine using the Kani model checker.
//!
//! These harnesses check bounded properties for every piece placement,
//! not just the ones reachable from the starting layout.

#[cfg(kani)]
mod proofs {
    use crate::{GameState, Piece, Rules, calculate_move, lane_index};

    /// Lane lookup never indexes outside the speed table.
    #[kani::proof]
    fn verify_lane_index_in_range() {
        let piece: Piece = kani::any();
        assert!(lane_index(&piece) < 5);
    }

    /// A single moved piece never leaves the board and bumps at most one
    /// opponent of the other side.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_no_overshoot() {
        let piece: Piece = kani::any();
        let state = GameState::new().with_piece(piece);
        let plan = calculate_move(&state, &Rules::default(), piece.id());

        assert!(plan.final_position.in_bounds());
        if let Some(bumped) = plan.bumped {
            assert!(bumped.side() != piece.side());
            assert!(state.piece(bumped).position() == plan.final_position);
        }
    }
}
