//! Moves and their application.
//!
//! A [`Move`] owns the board it was generated on; [`Move::execute`] never
//! mutates that board, it assembles the successor position through the
//! builder. The from-board stays reachable through the move itself, which is
//! what lets `MoveTransition` expose both ends of a transition.

use std::fmt;

use crate::engine::board::Board;
use crate::engine::board_utils::algebraic;
use crate::engine::piece::{moved_instance, Piece, PieceKind};
use crate::engine::types::Alliance;

// ---------------------------------------------------------------------------
// MoveKind
// ---------------------------------------------------------------------------

/// What sort of move this is, carrying any captured piece or castle rook.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Quiet move of a non-pawn piece.
    Major,
    /// Capture by a non-pawn piece.
    MajorAttack { attacked: Piece },
    /// Quiet single-square pawn advance.
    PawnMove,
    /// Two-square pawn advance; makes the pawn capturable en passant.
    PawnJump,
    /// Ordinary diagonal pawn capture.
    PawnAttack { attacked: Piece },
    /// En-passant capture: the victim stands beside the capturer, not on the
    /// destination square.
    PawnEnPassantAttack { attacked: Piece },
    /// A pawn move or capture landing on the back rank; the wrapped delivery
    /// says how the pawn got there. Always promotes to a queen.
    PawnPromotion { delivery: Box<MoveKind> },
    KingSideCastle { rook: Piece, rook_destination: u8 },
    QueenSideCastle { rook: Piece, rook_destination: u8 },
}

impl MoveKind {
    fn is_attack(&self) -> bool {
        match self {
            MoveKind::MajorAttack { .. }
            | MoveKind::PawnAttack { .. }
            | MoveKind::PawnEnPassantAttack { .. } => true,
            MoveKind::PawnPromotion { delivery } => delivery.is_attack(),
            _ => false,
        }
    }

    fn attacked_piece(&self) -> Option<Piece> {
        match self {
            MoveKind::MajorAttack { attacked }
            | MoveKind::PawnAttack { attacked }
            | MoveKind::PawnEnPassantAttack { attacked } => Some(*attacked),
            MoveKind::PawnPromotion { delivery } => delivery.attacked_piece(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A candidate move: the board it was generated on, the piece that moves,
/// where it goes, and the kind of move.
///
/// Equality deliberately ignores the board, so the same geometric move
/// generated on equal boards compares equal.
#[derive(Clone, Debug)]
pub struct Move {
    board: Board,
    piece: Piece,
    destination: u8,
    kind: MoveKind,
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.piece == other.piece
            && self.destination == other.destination
            && self.kind == other.kind
    }
}

impl Eq for Move {}

impl Move {
    // -- constructors ------------------------------------------------------

    pub fn major(board: Board, piece: Piece, destination: u8) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::Major,
        }
    }

    pub fn major_attack(board: Board, piece: Piece, destination: u8, attacked: Piece) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::MajorAttack { attacked },
        }
    }

    pub fn pawn_move(board: Board, piece: Piece, destination: u8) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::PawnMove,
        }
    }

    pub fn pawn_jump(board: Board, piece: Piece, destination: u8) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::PawnJump,
        }
    }

    pub fn pawn_attack(board: Board, piece: Piece, destination: u8, attacked: Piece) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::PawnAttack { attacked },
        }
    }

    pub fn pawn_en_passant_attack(
        board: Board,
        piece: Piece,
        destination: u8,
        attacked: Piece,
    ) -> Self {
        Move {
            board,
            piece,
            destination,
            kind: MoveKind::PawnEnPassantAttack { attacked },
        }
    }

    /// Wrap a pawn move or capture that lands on the back rank.
    pub fn promotion(delivery: Move) -> Self {
        Move {
            board: delivery.board,
            piece: delivery.piece,
            destination: delivery.destination,
            kind: MoveKind::PawnPromotion {
                delivery: Box::new(delivery.kind),
            },
        }
    }

    pub fn king_side_castle(
        board: Board,
        king: Piece,
        destination: u8,
        rook: Piece,
        rook_destination: u8,
    ) -> Self {
        Move {
            board,
            piece: king,
            destination,
            kind: MoveKind::KingSideCastle {
                rook,
                rook_destination,
            },
        }
    }

    pub fn queen_side_castle(
        board: Board,
        king: Piece,
        destination: u8,
        rook: Piece,
        rook_destination: u8,
    ) -> Self {
        Move {
            board,
            piece: king,
            destination,
            kind: MoveKind::QueenSideCastle {
                rook,
                rook_destination,
            },
        }
    }

    // -- accessors ---------------------------------------------------------

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn moved_piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn current_coordinate(&self) -> u8 {
        self.piece.position()
    }

    #[inline]
    pub fn destination(&self) -> u8 {
        self.destination
    }

    #[inline]
    pub fn kind(&self) -> &MoveKind {
        &self.kind
    }

    pub fn is_attack(&self) -> bool {
        self.kind.is_attack()
    }

    pub fn attacked_piece(&self) -> Option<Piece> {
        self.kind.attacked_piece()
    }

    pub fn is_castling(&self) -> bool {
        matches!(
            self.kind,
            MoveKind::KingSideCastle { .. } | MoveKind::QueenSideCastle { .. }
        )
    }

    pub fn is_promotion(&self) -> bool {
        matches!(self.kind, MoveKind::PawnPromotion { .. })
    }

    pub fn is_pawn_jump(&self) -> bool {
        matches!(self.kind, MoveKind::PawnJump)
    }

    fn castle_rook(&self) -> Option<Piece> {
        match &self.kind {
            MoveKind::KingSideCastle { rook, .. } | MoveKind::QueenSideCastle { rook, .. } => {
                Some(*rook)
            }
            _ => None,
        }
    }

    // -- application -------------------------------------------------------

    /// The board after this move. The from-board is untouched.
    pub fn execute(&self) -> Board {
        let mover = self.piece.alliance();
        let mut builder = Board::builder();

        // Carry over everything that does not move or get captured.
        for p in self.board.pieces_of(mover) {
            if p != self.piece && Some(p) != self.castle_rook() {
                builder = builder.piece(p);
            }
        }
        let captured = self.attacked_piece();
        for p in self.board.pieces_of(!mover) {
            if Some(p) != captured {
                builder = builder.piece(p);
            }
        }

        match &self.kind {
            MoveKind::PawnPromotion { .. } => {
                builder = builder.piece(moved_instance(PieceKind::Queen, mover, self.destination));
            }
            MoveKind::KingSideCastle {
                rook,
                rook_destination,
            }
            | MoveKind::QueenSideCastle {
                rook,
                rook_destination,
            } => {
                builder = builder
                    .piece(self.piece.move_piece(self))
                    .piece(moved_instance(
                        PieceKind::Rook,
                        rook.alliance(),
                        *rook_destination,
                    ));
            }
            _ => {
                builder = builder.piece(self.piece.move_piece(self));
            }
        }

        if self.is_pawn_jump() {
            builder = builder.en_passant_pawn(self.piece.move_piece(self));
        }

        builder
            .move_maker(!mover)
            .build()
            .expect("executing a generated move preserves both kings")
    }

    /// The position this move was generated on, rebuilt as a fresh board.
    pub fn undo(&self) -> Board {
        let mut builder = Board::builder();
        for p in self.board.pieces_of(Alliance::White) {
            builder = builder.piece(p);
        }
        for p in self.board.pieces_of(Alliance::Black) {
            builder = builder.piece(p);
        }
        if let Some(ep) = self.board.en_passant_pawn() {
            builder = builder.en_passant_pawn(ep);
        }
        builder
            .move_maker(self.board.to_move())
            .build()
            .expect("undoing a move restores a valid position")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MoveKind::KingSideCastle { .. } => write!(f, "O-O"),
            MoveKind::QueenSideCastle { .. } => write!(f, "O-O-O"),
            MoveKind::PawnPromotion { delivery } => {
                let join = if delivery.is_attack() { 'x' } else { '-' };
                write!(
                    f,
                    "{}{}{}=Q",
                    algebraic(self.current_coordinate()),
                    join,
                    algebraic(self.destination)
                )
            }
            kind => {
                let join = if kind.is_attack() { 'x' } else { '-' };
                write!(
                    f,
                    "{}{}{}",
                    algebraic(self.current_coordinate()),
                    join,
                    algebraic(self.destination)
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
