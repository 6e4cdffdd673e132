//! Strictly Squadro - pure rules engine for the Squadro board game
//!
//! Two sides of five pieces race across a 7×7 grid at lane-dependent
//! speeds, turn around at the far edge, and knock opposing pieces back to
//! their start when landing on them.
//!
//! # Architecture
//!
//! - **Types**: board/piece model ([`GameState`], [`Piece`], [`Side`])
//! - **Speed**: per-lane distance tables and rule configuration ([`Rules`])
//! - **Movement**: trajectory simulation and move resolution
//! - **Rules**: win detection
//! - **Invariants**: first-class state properties checked after each move
//! - **Game**: the engine owning live state and undo history ([`Game`])
//!
//! # Example
//!
//! ```
//! use strictly_squadro::{Coord, Game, PieceId, Side};
//!
//! let mut game = Game::new();
//! let y2 = PieceId::new(Side::Yellow, 2).unwrap();
//!
//! game.select_piece(y2);
//! assert_eq!(game.preview_destination(), Some(Coord::new(2, 3)));
//!
//! let record = game.commit_move().unwrap();
//! assert_eq!(record.to, Coord::new(2, 3));
//! assert_eq!(game.current_player(), Side::Red);
//!
//! game.undo();
//! assert_eq!(game.current_player(), Side::Yellow);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod invariants;
mod kani_support;
mod movement;
mod rules;
mod speed;
mod types;
mod verification;

pub use action::{Bump, Move};
pub use game::Game;
pub use invariants::{
    BoundedPositionsInvariant, DistinctCellsInvariant, Invariant, InvariantSet,
    InvariantViolation, SelectionEligibleInvariant, SquadroInvariants,
};
pub use movement::{MovePlan, calculate_move, distance, lane_index, resolve_move};
pub use rules::{WIN_THRESHOLD, winner};
pub use speed::{CompletionRule, Rules, RulesError, SpeedTable};
pub use types::{
    Coord, Direction, EDGE, GameState, GameStateError, Heading, PIECES_PER_SIDE, Piece, PieceId,
    PieceIdError, Side,
};
