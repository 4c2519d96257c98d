use crate::engine::piece::Piece;

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One of the 64 board squares: empty, or occupied by a piece.
///
/// Tiles are plain values; structurally-equal tiles are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty { coordinate: u8 },
    Occupied { piece: Piece },
}

impl Tile {
    /// An empty tile at `coordinate`.
    #[inline]
    pub const fn empty(coordinate: u8) -> Self {
        Tile::Empty { coordinate }
    }

    /// A tile holding `piece` (at the piece's own position).
    #[inline]
    pub const fn occupied(piece: Piece) -> Self {
        Tile::Occupied { piece }
    }

    /// The square this tile sits on.
    #[inline]
    pub fn coordinate(self) -> u8 {
        match self {
            Tile::Empty { coordinate } => coordinate,
            Tile::Occupied { piece } => piece.position(),
        }
    }

    #[inline]
    pub fn is_occupied(self) -> bool {
        matches!(self, Tile::Occupied { .. })
    }

    /// The occupying piece, if any.
    #[inline]
    pub fn piece(self) -> Option<Piece> {
        match self {
            Tile::Empty { .. } => None,
            Tile::Occupied { piece } => Some(piece),
        }
    }

    /// One-character rendering: `-` for empty, the piece symbol otherwise
    /// (uppercase for White, lowercase for Black).
    pub fn display_char(self) -> char {
        match self {
            Tile::Empty { .. } => '-',
            Tile::Occupied { piece } => piece.symbol(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
