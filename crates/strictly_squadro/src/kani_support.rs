//! Kani arbitrary implementations for Squadro types.
//!
//! These let Kani explore every value of the small domain types during
//! model checking, including states normal play cannot reach.

#[cfg(kani)]
use super::types::{Coord, EDGE, Heading, Piece, PieceId, Side};

#[cfg(kani)]
impl kani::Arbitrary for Side {
    fn any() -> Self {
        if kani::any() { Side::Yellow } else { Side::Red }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Heading {
    fn any() -> Self {
        if kani::any() {
            Heading::Outbound
        } else {
            Heading::Homebound
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Coord {
    fn any() -> Self {
        let x: u8 = kani::any();
        let y: u8 = kani::any();
        kani::assume(x <= EDGE && y <= EDGE);
        Coord::new(x, y)
    }
}

#[cfg(kani)]
impl kani::Arbitrary for PieceId {
    fn any() -> Self {
        let number: u8 = kani::any();
        kani::assume((1..=5).contains(&number));
        match PieceId::new(kani::any(), number) {
            Some(id) => id,
            None => unreachable!(),
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Piece {
    fn any() -> Self {
        Piece::new(kani::any())
            .with_position(kani::any())
            .with_heading(kani::any())
            .with_returning(kani::any())
    }
}
