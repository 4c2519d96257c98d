//! Flat-board coordinate utilities.
//!
//! Squares are numbered 0..64 row-major with index 0 = a8 and index 63 = h1.
//! Candidate moves are produced by adding signed offsets to a square index;
//! the column/row membership tables below are the only mechanism that stops
//! an offset from wrapping around a board edge onto the wrong rank.

/// Number of squares on the board.
pub const NUM_TILES: usize = 64;
/// Squares per row.
pub const NUM_TILES_PER_ROW: usize = 8;

const fn column(file: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut i = file;
    while i < NUM_TILES {
        table[i] = true;
        i += NUM_TILES_PER_ROW;
    }
    table
}

const fn row(start: usize) -> [bool; NUM_TILES] {
    let mut table = [false; NUM_TILES];
    let mut i = start;
    while i < start + NUM_TILES_PER_ROW {
        table[i] = true;
        i += 1;
    }
    table
}

/// Membership tables for the files where offset arithmetic can wrap.
pub const FIRST_COLUMN: [bool; NUM_TILES] = column(0);
pub const SECOND_COLUMN: [bool; NUM_TILES] = column(1);
pub const SEVENTH_COLUMN: [bool; NUM_TILES] = column(6);
pub const EIGHTH_COLUMN: [bool; NUM_TILES] = column(7);

/// Black's pawn starting row (rank 7, indices 8..16).
pub const SECOND_ROW: [bool; NUM_TILES] = row(8);
/// White's pawn starting row (rank 2, indices 48..56).
pub const SEVENTH_ROW: [bool; NUM_TILES] = row(48);

/// Is this (possibly offset-shifted) index still on the board?
#[inline]
pub fn is_valid_tile_coordinate(coordinate: i16) -> bool {
    (0..NUM_TILES as i16).contains(&coordinate)
}

/// Algebraic name of a square, e.g. `algebraic(52) == "e2"`.
pub fn algebraic(coordinate: u8) -> String {
    let file = (b'a' + coordinate % 8) as char;
    let rank = (b'8' - coordinate / 8) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic square name like "e4" back into a coordinate.
pub fn coordinate_of(notation: &str) -> Option<u8> {
    let bytes = notation.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].wrapping_sub(b'a');
    let rank = bytes[1].wrapping_sub(b'1');
    if file < 8 && rank < 8 {
        Some((7 - rank) * 8 + file)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
