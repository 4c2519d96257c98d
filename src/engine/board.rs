//! The immutable board.
//!
//! A [`Board`] is a snapshot: 64 tiles, the side to move, and the pawn (if
//! any) that just made a two-square jump and can be captured en passant.
//! Boards are never mutated; every move builds its successor through
//! [`BoardBuilder`]. The tile array sits behind an `Arc`, so cloning a board
//! is cheap and generated moves can each own the position they came from.

use std::fmt;
use std::sync::Arc;

use crate::engine::board_utils::{NUM_TILES, NUM_TILES_PER_ROW};
use crate::engine::moves::Move;
use crate::engine::piece::{Piece, PieceKind};
use crate::engine::player::Player;
use crate::engine::tile::Tile;
use crate::engine::types::{Alliance, ChessError};

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    tiles: Arc<[Tile; NUM_TILES]>,
    to_move: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl Board {
    pub fn builder() -> BoardBuilder {
        BoardBuilder::new()
    }

    /// The standard starting position, White to move.
    pub fn standard() -> Board {
        let mut builder = Board::builder();

        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
        ];
        // Black's back rank occupies indices 0..8, White's 56..64; the files
        // mirror around the king on the e-file.
        for (file, &kind) in back_rank.iter().enumerate() {
            let mirror = (NUM_TILES_PER_ROW - 1 - file) as u8;
            builder = builder
                .piece(Piece::new(kind, Alliance::Black, file as u8, true))
                .piece(Piece::new(kind, Alliance::White, 56 + file as u8, true));
            if kind != PieceKind::Queen {
                builder = builder
                    .piece(Piece::new(kind, Alliance::Black, mirror, true))
                    .piece(Piece::new(kind, Alliance::White, 56 + mirror, true));
            }
        }
        builder = builder
            .piece(Piece::fresh_king(Alliance::Black, 4))
            .piece(Piece::fresh_king(Alliance::White, 60));

        for file in 0..NUM_TILES_PER_ROW as u8 {
            builder = builder
                .piece(Piece::new(PieceKind::Pawn, Alliance::Black, 8 + file, true))
                .piece(Piece::new(PieceKind::Pawn, Alliance::White, 48 + file, true));
        }

        builder
            .move_maker(Alliance::White)
            .build()
            .expect("the standard position is valid")
    }

    #[inline]
    pub fn tile(&self, coordinate: u8) -> Tile {
        self.tiles[coordinate as usize]
    }

    #[inline]
    pub fn to_move(&self) -> Alliance {
        self.to_move
    }

    /// The pawn that just jumped two squares, if the last move was a jump.
    #[inline]
    pub fn en_passant_pawn(&self) -> Option<Piece> {
        self.en_passant_pawn
    }

    /// All pieces of one alliance currently on the board.
    pub fn pieces_of(&self, alliance: Alliance) -> Vec<Piece> {
        self.tiles
            .iter()
            .filter_map(|t| t.piece())
            .filter(|p| p.alliance() == alliance)
            .collect()
    }

    /// Geometric candidate moves for every piece of `alliance`. Castles are
    /// not included; they need both players' move lists and live in
    /// [`Player`].
    pub fn calculate_legal_moves(&self, alliance: Alliance) -> Vec<Move> {
        self.pieces_of(alliance)
            .iter()
            .flat_map(|p| p.calculate_legal_moves(self))
            .collect()
    }

    /// The one king of `alliance`. Guaranteed present by the builder.
    pub fn king(&self, alliance: Alliance) -> Piece {
        self.pieces_of(alliance)
            .into_iter()
            .find(|p| p.kind().is_king())
            .expect("a built board holds exactly one king per alliance")
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> Player {
        Player::new(self.clone(), self.to_move)
    }

    pub fn white_player(&self) -> Player {
        Player::new(self.clone(), Alliance::White)
    }

    pub fn black_player(&self) -> Player {
        Player::new(self.clone(), Alliance::Black)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_TILES_PER_ROW {
            for file in 0..NUM_TILES_PER_ROW {
                let tile = self.tiles[row * NUM_TILES_PER_ROW + file];
                if file > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", tile.display_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BoardBuilder
// ---------------------------------------------------------------------------

/// Assembles a board piece by piece. `build` validates that each alliance
/// has exactly one king; anything else cannot be reasoned about.
pub struct BoardBuilder {
    pieces: [Option<Piece>; NUM_TILES],
    to_move: Alliance,
    en_passant_pawn: Option<Piece>,
}

impl BoardBuilder {
    fn new() -> Self {
        BoardBuilder {
            pieces: [None; NUM_TILES],
            to_move: Alliance::White,
            en_passant_pawn: None,
        }
    }

    /// Place `piece` on its own square, replacing whatever was set there.
    pub fn piece(mut self, piece: Piece) -> Self {
        self.pieces[piece.position() as usize] = Some(piece);
        self
    }

    pub fn move_maker(mut self, alliance: Alliance) -> Self {
        self.to_move = alliance;
        self
    }

    pub fn en_passant_pawn(mut self, pawn: Piece) -> Self {
        self.en_passant_pawn = Some(pawn);
        self
    }

    pub fn build(self) -> Result<Board, ChessError> {
        for alliance in [Alliance::White, Alliance::Black] {
            let count = self
                .pieces
                .iter()
                .flatten()
                .filter(|p| p.alliance() == alliance && p.kind().is_king())
                .count();
            if count != 1 {
                return Err(ChessError::InvalidKingCount { alliance, count });
            }
        }

        let tiles = std::array::from_fn(|i| match self.pieces[i] {
            Some(piece) => Tile::occupied(piece),
            None => Tile::empty(i as u8),
        });

        Ok(Board {
            tiles: Arc::new(tiles),
            to_move: self.to_move,
            en_passant_pawn: self.en_passant_pawn,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
