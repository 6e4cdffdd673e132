//! Core domain types for Squadro.
//!
//! The board is a 7×7 grid. Yellow pieces travel vertically along columns
//! 1-5, red pieces travel horizontally along rows 1-5. A piece's movement
//! axis is fixed by its side; only the sense along that axis changes.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Highest coordinate on either axis.
pub const EDGE: u8 = 6;

/// Number of pieces per side.
pub const PIECES_PER_SIDE: usize = 5;

// ─────────────────────────────────────────────────────────────
//  Sides
// ─────────────────────────────────────────────────────────────

/// One of the two players.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// Moves vertically, starts on the top edge, moves first.
    Yellow,
    /// Moves horizontally, starts on the right edge.
    Red,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Yellow => Side::Red,
            Side::Red => Side::Yellow,
        }
    }

    /// Concrete direction of travel for a heading on this side's axis.
    pub fn direction(self, heading: Heading) -> Direction {
        match (self, heading) {
            (Side::Yellow, Heading::Outbound) => Direction::Down,
            (Side::Yellow, Heading::Homebound) => Direction::Up,
            (Side::Red, Heading::Outbound) => Direction::Left,
            (Side::Red, Heading::Homebound) => Direction::Right,
        }
    }

    fn prefix(self) -> char {
        match self {
            Side::Yellow => 'y',
            Side::Red => 'r',
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Coordinates and directions
// ─────────────────────────────────────────────────────────────

/// A cell on the grid. Valid cells have both coordinates in `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({x}, {y})")]
pub struct Coord {
    /// Column, growing rightwards.
    pub x: u8,
    /// Row, growing downwards.
    pub y: u8,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// True if the cell lies on the board.
    pub fn in_bounds(self) -> bool {
        self.x <= EDGE && self.y <= EDGE
    }

    /// Offsets the cell, returning `None` if the result leaves the board.
    pub fn offset(self, dx: i16, dy: i16) -> Option<Coord> {
        let x = i16::from(self.x) + dx;
        let y = i16::from(self.y) + dy;
        let range = 0..=i16::from(EDGE);
        if range.contains(&x) && range.contains(&y) {
            Some(Coord::new(x as u8, y as u8))
        } else {
            None
        }
    }
}

/// Sense of travel along a side's fixed axis.
///
/// Outbound points away from the starting edge, homebound points back at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Heading {
    /// Away from the starting edge.
    Outbound,
    /// Back towards the starting edge.
    Homebound,
}

impl Heading {
    /// Returns the opposite sense.
    pub fn reversed(self) -> Self {
        match self {
            Heading::Outbound => Heading::Homebound,
            Heading::Homebound => Heading::Outbound,
        }
    }
}

/// Absolute direction on the grid.
///
/// Derived from a [`Side`] and a [`Heading`]; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// Increasing y.
    Down,
    /// Decreasing y.
    Up,
    /// Decreasing x.
    Left,
    /// Increasing x.
    Right,
}

impl Direction {
    /// Unit step `(dx, dy)` for this direction.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// True if `cell` is on the edge this direction runs into.
    pub fn is_terminal(self, cell: Coord) -> bool {
        match self {
            Direction::Down => cell.y == EDGE,
            Direction::Up => cell.y == 0,
            Direction::Left => cell.x == 0,
            Direction::Right => cell.x == EDGE,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Piece identity
// ─────────────────────────────────────────────────────────────

/// Stable identifier of a piece: its side plus a number in `1..=5`.
///
/// Written as `y1`..`y5` and `r1`..`r5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PieceId {
    side: Side,
    slot: u8,
}

impl PieceId {
    /// Creates an id from a side and a piece number in `1..=5`.
    pub fn new(side: Side, number: u8) -> Option<Self> {
        (1..=PIECES_PER_SIDE as u8)
            .contains(&number)
            .then(|| Self {
                side,
                slot: number - 1,
            })
    }

    /// All five ids of a side, in order.
    pub fn all(side: Side) -> impl Iterator<Item = PieceId> {
        (0..PIECES_PER_SIDE as u8).map(move |slot| PieceId { side, slot })
    }

    /// The side this piece belongs to.
    pub fn side(self) -> Side {
        self.side
    }

    /// Piece number in `1..=5`.
    pub fn number(self) -> u8 {
        self.slot + 1
    }

    pub(crate) fn slot(self) -> usize {
        usize::from(self.slot)
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.side.prefix(), self.number())
    }
}

/// Failure to parse a [`PieceId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid piece id: {:?}", input)]
pub struct PieceIdError {
    /// Text that failed to parse.
    pub input: String,
}

impl FromStr for PieceId {
    type Err = PieceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PieceIdError {
            input: s.to_string(),
        };
        let mut chars = s.chars();
        let side = match chars.next() {
            Some('y') => Side::Yellow,
            Some('r') => Side::Red,
            _ => return Err(err()),
        };
        let number = chars.as_str().parse::<u8>().map_err(|_| err())?;
        PieceId::new(side, number).ok_or_else(err)
    }
}

impl TryFrom<String> for PieceId {
    type Error = PieceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PieceId> for String {
    fn from(id: PieceId) -> Self {
        id.to_string()
    }
}

// ─────────────────────────────────────────────────────────────
//  Pieces
// ─────────────────────────────────────────────────────────────

/// A single piece and its travel state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    position: Coord,
    heading: Heading,
    returning: bool,
    completed: bool,
}

impl Piece {
    /// Creates a piece at its starting cell, outbound and not yet returning.
    pub fn new(id: PieceId) -> Self {
        let lane = id.number();
        let position = match id.side() {
            Side::Yellow => Coord::new(lane, 0),
            Side::Red => Coord::new(EDGE, lane),
        };
        Self {
            id,
            position,
            heading: Heading::Outbound,
            returning: false,
            completed: false,
        }
    }

    /// Returns the piece with a different position.
    pub fn with_position(mut self, position: Coord) -> Self {
        self.position = position;
        self
    }

    /// Returns the piece with a different heading.
    pub fn with_heading(mut self, heading: Heading) -> Self {
        self.heading = heading;
        self
    }

    /// Returns the piece with the return-trip flag set.
    pub fn with_returning(mut self, returning: bool) -> Self {
        self.returning = returning;
        self
    }

    /// Returns the piece with the completion flag set.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Stable identifier.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Owning side.
    pub fn side(&self) -> Side {
        self.id.side()
    }

    /// Current cell.
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Sense of travel along the side's axis.
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Absolute direction of travel.
    pub fn direction(&self) -> Direction {
        self.side().direction(self.heading)
    }

    /// True once the piece has turned around at the far edge.
    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// True once the piece has finished; completed pieces are inert.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The fixed cross-axis coordinate: column for yellow, row for red.
    pub fn lane_coord(&self) -> u8 {
        match self.side() {
            Side::Yellow => self.position.x,
            Side::Red => self.position.y,
        }
    }

    /// Cell the piece is sent back to when bumped.
    ///
    /// Depends on the bumped piece's own phase: the far edge while returning,
    /// its own starting edge otherwise.
    pub fn reset_cell(&self) -> Coord {
        let Coord { x, y } = self.position;
        match (self.side(), self.returning) {
            (Side::Yellow, false) => Coord::new(x, 0),
            (Side::Yellow, true) => Coord::new(x, EDGE),
            (Side::Red, false) => Coord::new(EDGE, y),
            (Side::Red, true) => Coord::new(0, y),
        }
    }

    /// True if the piece sits on the edge it must finish on.
    pub fn on_home_edge(&self) -> bool {
        match self.side() {
            Side::Yellow => self.position.y == 0,
            Side::Red => self.position.x == EDGE,
        }
    }

    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub(crate) fn turn_around(&mut self) {
        self.heading = self.heading.reversed();
        self.returning = !self.returning;
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }
}

// ─────────────────────────────────────────────────────────────
//  Game state
// ─────────────────────────────────────────────────────────────

/// Complete game state: both piece sets, turn owner and selection.
///
/// Values are plain owned data; cloning yields an independent snapshot.
/// Deserialization checks that every piece sits in its own slot and that
/// the selection is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameState")]
pub struct GameState {
    yellow: [Piece; PIECES_PER_SIDE],
    red: [Piece; PIECES_PER_SIDE],
    current_player: Side,
    selected: Option<PieceId>,
}

impl GameState {
    /// Creates the starting layout with yellow to move.
    pub fn new() -> Self {
        let yellow = std::array::from_fn(|slot| {
            Piece::new(PieceId {
                side: Side::Yellow,
                slot: slot as u8,
            })
        });
        let red = std::array::from_fn(|slot| {
            Piece::new(PieceId {
                side: Side::Red,
                slot: slot as u8,
            })
        });
        Self {
            yellow,
            red,
            current_player: Side::Yellow,
            selected: None,
        }
    }

    /// Returns the state with `piece` replacing the piece of the same id.
    ///
    /// Clears the selection.
    pub fn with_piece(mut self, piece: Piece) -> Self {
        *self.piece_mut(piece.id()) = piece;
        self.selected = None;
        self
    }

    /// Returns the state with a different player to move.
    ///
    /// Clears the selection.
    pub fn with_current_player(mut self, side: Side) -> Self {
        self.current_player = side;
        self.selected = None;
        self
    }

    /// Player to move.
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// Currently selected piece id, if any.
    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    /// Currently selected piece, if any.
    pub fn selected_piece(&self) -> Option<&Piece> {
        self.selected.map(|id| self.piece(id))
    }

    /// All pieces of a side, ordered by number.
    pub fn pieces(&self, side: Side) -> &[Piece; PIECES_PER_SIDE] {
        match side {
            Side::Yellow => &self.yellow,
            Side::Red => &self.red,
        }
    }

    /// Every piece on the board, yellow first.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.yellow.iter().chain(self.red.iter())
    }

    /// Looks up a piece by id.
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces(id.side())[id.slot()]
    }

    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        let pieces = match id.side() {
            Side::Yellow => &mut self.yellow,
            Side::Red => &mut self.red,
        };
        &mut pieces[id.slot()]
    }

    /// Piece on a cell, preferring a piece still in play over a completed one.
    pub fn piece_at(&self, cell: Coord) -> Option<&Piece> {
        let mut here = self.all_pieces().filter(|p| p.position() == cell);
        let first = here.next()?;
        if !first.is_completed() {
            return Some(first);
        }
        here.find(|p| !p.is_completed()).or(Some(first))
    }

    /// Non-completed piece of `side` on a cell.
    pub fn active_piece_at(&self, side: Side, cell: Coord) -> Option<&Piece> {
        self.pieces(side)
            .iter()
            .find(|p| !p.is_completed() && p.position() == cell)
    }

    /// Number of completed pieces of a side.
    pub fn completed_count(&self, side: Side) -> usize {
        self.pieces(side).iter().filter(|p| p.is_completed()).count()
    }

    /// True if the piece belongs to the player to move and is still in play.
    pub fn is_selectable(&self, id: PieceId) -> bool {
        id.side() == self.current_player && !self.piece(id).is_completed()
    }

    /// Toggles selection of a piece.
    ///
    /// Ineligible pieces are ignored. Selecting the selected piece clears the
    /// selection; selecting another eligible piece replaces it.
    #[instrument(skip(self), fields(piece = %id, current = %self.current_player))]
    pub fn select(&mut self, id: PieceId) {
        if !self.is_selectable(id) {
            debug!("Ignoring selection of ineligible piece");
            return;
        }
        if self.selected == Some(id) {
            debug!("Deselecting piece");
            self.selected = None;
        } else {
            debug!("Selecting piece");
            self.selected = Some(id);
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub(crate) fn pass_turn(&mut self) {
        self.selected = None;
        self.current_player = self.current_player.opponent();
    }
}

/// Unchecked wire form of [`GameState`].
#[derive(Deserialize)]
struct RawGameState {
    yellow: [Piece; PIECES_PER_SIDE],
    red: [Piece; PIECES_PER_SIDE],
    current_player: Side,
    selected: Option<PieceId>,
}

/// A deserialized state that breaks the piece layout.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid game state: {}", message)]
pub struct GameStateError {
    /// What was wrong.
    pub message: String,
}

impl TryFrom<RawGameState> for GameState {
    type Error = GameStateError;

    fn try_from(raw: RawGameState) -> Result<Self, Self::Error> {
        for (side, pieces) in [(Side::Yellow, &raw.yellow), (Side::Red, &raw.red)] {
            for (expected, piece) in PieceId::all(side).zip(pieces) {
                if piece.id() != expected {
                    return Err(GameStateError {
                        message: format!("{side} slot {expected} holds {}", piece.id()),
                    });
                }
            }
        }
        let state = GameState {
            yellow: raw.yellow,
            red: raw.red,
            current_player: raw.current_player,
            selected: raw.selected,
        };
        if let Some(id) = state.selected
            && !state.is_selectable(id)
        {
            return Err(GameStateError {
                message: format!("selected piece {id} cannot move"),
            });
        }
        Ok(state)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..=EDGE {
            for x in 0..=EDGE {
                let symbol = match self.piece_at(Coord::new(x, y)) {
                    None => '.',
                    Some(p) if p.is_completed() => '*',
                    Some(p) => match p.direction() {
                        Direction::Down => 'v',
                        Direction::Up => '^',
                        Direction::Left => '<',
                        Direction::Right => '>',
                    },
                };
                write!(f, "{symbol}")?;
            }
            if y < EDGE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yellow(n: u8) -> PieceId {
        PieceId::new(Side::Yellow, n).unwrap()
    }

    fn red(n: u8) -> PieceId {
        PieceId::new(Side::Red, n).unwrap()
    }

    #[test]
    fn test_starting_layout() {
        let state = GameState::new();
        assert_eq!(state.current_player(), Side::Yellow);
        assert_eq!(state.selected(), None);
        for n in 1..=5 {
            let y = state.piece(yellow(n));
            assert_eq!(y.position(), Coord::new(n, 0));
            assert_eq!(y.direction(), Direction::Down);
            let r = state.piece(red(n));
            assert_eq!(r.position(), Coord::new(6, n));
            assert_eq!(r.direction(), Direction::Left);
        }
        assert!(state.all_pieces().all(|p| !p.is_returning() && !p.is_completed()));
    }

    #[test]
    fn test_piece_id_parse_and_display() {
        assert_eq!("y3".parse::<PieceId>(), Ok(yellow(3)));
        assert_eq!(red(5).to_string(), "r5");
        assert!("y0".parse::<PieceId>().is_err());
        assert!("r6".parse::<PieceId>().is_err());
        assert!("x1".parse::<PieceId>().is_err());
        assert!(PieceId::new(Side::Red, 0).is_none());
    }

    #[test]
    fn test_direction_follows_side_axis() {
        assert_eq!(Side::Yellow.direction(Heading::Homebound), Direction::Up);
        assert_eq!(Side::Red.direction(Heading::Homebound), Direction::Right);
        let piece = Piece::new(red(2)).with_heading(Heading::Homebound);
        assert_eq!(piece.direction(), Direction::Right);
    }

    #[test]
    fn test_piece_at_prefers_active_piece() {
        let done = Piece::new(yellow(1))
            .with_position(Coord::new(1, 1))
            .with_completed(true);
        let state = GameState::new().with_piece(done);
        assert_eq!(state.piece_at(Coord::new(1, 1)).map(|p| p.id()), Some(yellow(1)));
        assert!(state.active_piece_at(Side::Yellow, Coord::new(1, 1)).is_none());
        assert_eq!(state.piece_at(Coord::new(6, 1)).map(|p| p.id()), Some(red(1)));
        assert!(state.piece_at(Coord::new(3, 3)).is_none());
    }

    #[test]
    fn test_select_toggles() {
        let mut state = GameState::new();
        state.select(yellow(2));
        assert_eq!(state.selected(), Some(yellow(2)));
        state.select(yellow(2));
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_select_replaces() {
        let mut state = GameState::new();
        state.select(yellow(2));
        state.select(yellow(4));
        assert_eq!(state.selected(), Some(yellow(4)));
    }

    #[test]
    fn test_select_ignores_opponent_and_completed() {
        let mut state = GameState::new();
        state.select(red(1));
        assert_eq!(state.selected(), None);

        let mut state = state.with_piece(Piece::new(yellow(3)).with_completed(true));
        state.select(yellow(3));
        assert_eq!(state.selected(), None);

        state.select(yellow(1));
        state.select(red(1));
        assert_eq!(state.selected(), Some(yellow(1)));
    }

    #[test]
    fn test_reset_cell_depends_on_phase() {
        let y = Piece::new(yellow(2)).with_position(Coord::new(2, 4));
        assert_eq!(y.reset_cell(), Coord::new(2, 0));
        assert_eq!(y.with_returning(true).reset_cell(), Coord::new(2, 6));
        let r = Piece::new(red(3)).with_position(Coord::new(2, 3));
        assert_eq!(r.reset_cell(), Coord::new(6, 3));
        assert_eq!(r.with_returning(true).reset_cell(), Coord::new(0, 3));
    }

    #[test]
    fn test_offset_stays_on_board() {
        assert_eq!(Coord::new(0, 3).offset(-1, 0), None);
        assert_eq!(Coord::new(6, 3).offset(1, 0), None);
        assert_eq!(Coord::new(2, 5).offset(0, 1), Some(Coord::new(2, 6)));
    }

    #[test]
    fn test_display_grid() {
        let text = GameState::new().to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], ".vvvvv.");
        assert_eq!(rows[3], "......<");
        assert_eq!(rows[6], ".......");
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"y1\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_deserialize_rejects_swapped_slots() {
        let json = serde_json::to_string(&GameState::new())
            .unwrap()
            .replacen("\"y1\"", "\"tmp\"", 1)
            .replacen("\"y2\"", "\"y1\"", 1)
            .replacen("\"tmp\"", "\"y2\"", 1);
        let err = serde_json::from_str::<GameState>(&json).unwrap_err();
        assert!(err.to_string().contains("slot y1 holds y2"));
    }

    #[test]
    fn test_deserialize_rejects_opponent_selection() {
        let mut state = GameState::new();
        state.select(yellow(3));
        let json = serde_json::to_string(&state)
            .unwrap()
            .replace("\"current_player\":\"yellow\"", "\"current_player\":\"red\"");
        assert!(serde_json::from_str::<GameState>(&json).is_err());
    }
}
