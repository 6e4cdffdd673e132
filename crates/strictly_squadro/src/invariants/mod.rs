//! First-class invariants for Squadro.
//!
//! Invariants are logical properties that must hold for every reachable
//! game state. The engine checks them after each committed move in debug
//! builds; they are also testable on hand-built states.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(A, B);
impl_invariant_set!(A, B, C);
impl_invariant_set!(A, B, C, D);

pub mod bounded_positions;
pub mod distinct_cells;
pub mod selection_eligible;

pub use bounded_positions::BoundedPositionsInvariant;
pub use distinct_cells::DistinctCellsInvariant;
pub use selection_eligible::SelectionEligibleInvariant;

/// All Squadro invariants as a composable set.
pub type SquadroInvariants = (
    BoundedPositionsInvariant,
    DistinctCellsInvariant,
    SelectionEligibleInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, GameState, Piece, PieceId, Side};

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(SquadroInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_collects_violations() {
        let y1 = PieceId::new(Side::Yellow, 1).unwrap();
        let y2 = PieceId::new(Side::Yellow, 2).unwrap();
        // y2 moved off its lane onto y1's cell.
        let state = GameState::new().with_piece(Piece::new(y2).with_position(Coord::new(1, 0)));
        assert_eq!(state.piece(y1).position(), Coord::new(1, 0));

        let violations = SquadroInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (BoundedPositionsInvariant, DistinctCellsInvariant);
        assert!(TwoInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_violations_reported_in_tuple_order() {
        type TwoInvariants = (DistinctCellsInvariant, BoundedPositionsInvariant);
        let y2 = PieceId::new(Side::Yellow, 2).unwrap();
        let state = GameState::new().with_piece(Piece::new(y2).with_position(Coord::new(1, 0)));

        let descriptions: Vec<_> = TwoInvariants::check_all(&state)
            .unwrap_err()
            .into_iter()
            .map(|v| v.description)
            .collect();
        assert_eq!(
            descriptions,
            [
                DistinctCellsInvariant::description(),
                BoundedPositionsInvariant::description(),
            ]
        );
    }

    #[test]
    fn test_four_invariant_set_checks_each_member() {
        type FourInvariants = (
            BoundedPositionsInvariant,
            DistinctCellsInvariant,
            SelectionEligibleInvariant,
            BoundedPositionsInvariant,
        );
        let y2 = PieceId::new(Side::Yellow, 2).unwrap();
        let state = GameState::new().with_piece(Piece::new(y2).with_position(Coord::new(1, 0)));
        assert!(FourInvariants::check_all(&GameState::new()).is_ok());
        assert_eq!(FourInvariants::check_all(&state).unwrap_err().len(), 3);
    }
}
