use std::fmt;

// ---------------------------------------------------------------------------
// Alliance
// ---------------------------------------------------------------------------

/// The two sides in a chess game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Alliance {
    White,
    Black,
}

impl Alliance {
    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row direction a pawn of this alliance advances in, as a multiplier for
    /// row-major offsets. White moves toward lower indices (index 0 is a8).
    #[inline]
    pub const fn direction(self) -> i16 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    /// The opposing alliance's direction; used to locate an en-passant pawn
    /// standing beside the capturer.
    #[inline]
    pub const fn opposite_direction(self) -> i16 {
        -self.direction()
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Alliance::Black)
    }

    /// Is this square the promotion rank for a pawn of this alliance?
    /// White promotes on the top row (indices 0..8), Black on the bottom.
    #[inline]
    pub fn is_promotion_square(self, coordinate: u8) -> bool {
        match self {
            Alliance::White => coordinate < 8,
            Alliance::Black => coordinate >= 56,
        }
    }

    // -----------------------------------------------------------------------
    // Location bonuses
    // -----------------------------------------------------------------------

    /// Positional score contribution for a pawn standing on `coordinate`.
    /// Consumed by external evaluation; the engine itself never ranks moves.
    pub fn pawn_bonus(self, coordinate: u8) -> i32 {
        PAWN_TABLE[self.table_index(coordinate)]
    }

    pub fn knight_bonus(self, coordinate: u8) -> i32 {
        KNIGHT_TABLE[self.table_index(coordinate)]
    }

    pub fn bishop_bonus(self, coordinate: u8) -> i32 {
        BISHOP_TABLE[self.table_index(coordinate)]
    }

    pub fn rook_bonus(self, coordinate: u8) -> i32 {
        ROOK_TABLE[self.table_index(coordinate)]
    }

    pub fn queen_bonus(self, coordinate: u8) -> i32 {
        QUEEN_TABLE[self.table_index(coordinate)]
    }

    pub fn king_bonus(self, coordinate: u8) -> i32 {
        KING_TABLE[self.table_index(coordinate)]
    }

    /// The tables below are written from White's point of view (index 0 = a8).
    /// Black reads the rank-mirrored square.
    #[inline]
    fn table_index(self, coordinate: u8) -> usize {
        match self {
            Alliance::White => coordinate as usize,
            Alliance::Black => (coordinate ^ 56) as usize,
        }
    }
}

impl std::ops::Not for Alliance {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alliance::White => write!(f, "white"),
            Alliance::Black => write!(f, "black"),
        }
    }
}

// ---------------------------------------------------------------------------
// Piece-square tables (centipawns, White orientation, index 0 = a8)
// ---------------------------------------------------------------------------

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    75, 75, 75, 75, 75, 75, 75, 75,
    25, 25, 29, 29, 29, 29, 25, 25,
     5,  5, 10, 55, 55, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
   -50,-40,-30,-30,-30,-30,-40,-50,
   -40,-20,  0,  0,  0,  0,-20,-40,
   -30,  0, 10, 15, 15, 10,  0,-30,
   -30,  5, 15, 20, 20, 15,  5,-30,
   -30,  0, 15, 20, 20, 15,  0,-30,
   -30,  5, 10, 15, 15, 10,  5,-30,
   -40,-20,  0,  5,  5,  0,-20,-40,
   -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
   -20,-10,-10,-10,-10,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5, 10, 10,  5,  0,-10,
   -10,  5,  5, 10, 10,  5,  5,-10,
   -10,  0, 10, 10, 10, 10,  0,-10,
   -10, 10, 10, 10, 10, 10, 10,-10,
   -10,  5,  0,  0,  0,  0,  5,-10,
   -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 20, 20, 20, 20, 20, 20,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
   -20,-10,-10, -5, -5,-10,-10,-20,
   -10,  0,  0,  0,  0,  0,  0,-10,
   -10,  0,  5,  5,  5,  5,  0,-10,
    -5,  0,  5,  5,  5,  5,  0, -5,
     0,  0,  5,  5,  5,  5,  0, -5,
   -10,  5,  5,  5,  5,  5,  0,-10,
   -10,  0,  5,  0,  0,  0,  0,-10,
   -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -30,-40,-40,-50,-50,-40,-40,-30,
   -20,-30,-30,-40,-40,-30,-30,-20,
   -10,-20,-20,-20,-20,-20,-20,-10,
    20, 20,  0,  0,  0,  0, 20, 20,
    20, 30, 10,  0,  0, 10, 30, 20,
];

// ---------------------------------------------------------------------------
// ChessError
// ---------------------------------------------------------------------------

/// Domain errors for the rules engine.
///
/// Illegal *moves* are never errors — they surface as `MoveStatus` values on
/// a `MoveTransition`. An error here means the position itself is impossible.
#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    #[error("{alliance} has {count} kings (expected exactly 1)")]
    InvalidKingCount { alliance: Alliance, count: usize },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
