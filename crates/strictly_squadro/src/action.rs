//! First-class record of a committed move.

use super::types::{Coord, PieceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opponent sent back by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bump {
    /// The bumped piece.
    pub piece: PieceId,
    /// Where it stood when it was hit.
    pub from: Coord,
    /// The start cell it was sent back to.
    pub to: Coord,
}

/// What a committed move did.
///
/// Produced by the engine after the fact; the new state is the source of
/// truth, this is a summary for callers that animate or log moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The piece that moved.
    pub piece: PieceId,
    /// Cell before the move.
    pub from: Coord,
    /// Cell after the move.
    pub to: Coord,
    /// Opponent sent back, if any.
    pub bump: Option<Bump>,
    /// True if the piece turned around at an edge.
    pub reversed: bool,
    /// True if the piece completed on this move.
    pub completed: bool,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)?;
        if let Some(bump) = &self.bump {
            write!(f, ", bumps {} back to {}", bump.piece, bump.to)?;
        }
        if self.completed {
            write!(f, ", completed")?;
        } else if self.reversed {
            write!(f, ", turns around")?;
        }
        Ok(())
    }
}
