//! Players and move legality.
//!
//! A [`Player`] is a view of one alliance on one board: its king, its full
//! legal-move list (geometric candidates plus castles), and whether it is in
//! check. Legality proper happens in [`Player::make_move`]: the move is
//! executed on a scratch board and rejected if the mover's own king would be
//! attacked afterwards. Check, checkmate and stalemate all derive from that
//! simulate-and-test loop rather than from any precomputed attack maps.

use tracing::trace;

use crate::engine::board::Board;
use crate::engine::moves::Move;
use crate::engine::piece::{Piece, PieceKind};
use crate::engine::types::Alliance;

// ---------------------------------------------------------------------------
// MoveStatus & MoveTransition
// ---------------------------------------------------------------------------

/// Outcome of attempting a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move was applied; the transition carries the successor board.
    Done,
    /// The move is not in the player's legal-move list.
    IllegalMove,
    /// Geometrically fine, but the mover's king would be attacked afterwards.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// The result of [`Player::make_move`]: both boards, the move, the verdict.
/// On a rejected move the to-board is the unchanged from-board.
#[derive(Clone, Debug)]
pub struct MoveTransition {
    from_board: Board,
    to_board: Board,
    mv: Move,
    status: MoveStatus,
}

impl MoveTransition {
    fn new(from_board: Board, to_board: Board, mv: Move, status: MoveStatus) -> Self {
        MoveTransition {
            from_board,
            to_board,
            mv,
            status,
        }
    }

    #[inline]
    pub fn from_board(&self) -> &Board {
        &self.from_board
    }

    #[inline]
    pub fn to_board(&self) -> &Board {
        &self.to_board
    }

    #[inline]
    pub fn transition_move(&self) -> &Move {
        &self.mv
    }

    #[inline]
    pub fn status(&self) -> MoveStatus {
        self.status
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

pub struct Player {
    board: Board,
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl Player {
    /// Build the `alliance` player's view of `board`: candidate moves for
    /// both sides are generated once, check is derived from the opponent's
    /// list, and castle moves are appended when the geometry allows them.
    pub fn new(board: Board, alliance: Alliance) -> Player {
        let king = board.king(alliance);
        let mut legal_moves = board.calculate_legal_moves(alliance);
        let opponent_moves = board.calculate_legal_moves(!alliance);
        let in_check = attacks_on(king.position(), &opponent_moves);
        legal_moves.extend(calculate_king_castles(
            &board,
            alliance,
            king,
            &opponent_moves,
            in_check,
        ));
        Player {
            board,
            alliance,
            king,
            legal_moves,
            in_check,
        }
    }

    #[inline]
    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn king(&self) -> Piece {
        self.king
    }

    /// Castles included; king safety is only enforced by [`Self::make_move`].
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// The opposing player's view of the same board.
    pub fn opponent(&self) -> Player {
        Player::new(self.board.clone(), !self.alliance)
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    pub fn is_in_checkmate(&self) -> bool {
        self.in_check && !self.has_escape_moves()
    }

    pub fn is_in_stalemate(&self) -> bool {
        !self.in_check && !self.has_escape_moves()
    }

    pub fn is_castled(&self) -> bool {
        matches!(self.king.kind(), PieceKind::King { castled: true, .. })
    }

    pub fn is_king_side_castle_capable(&self) -> bool {
        matches!(
            self.king.kind(),
            PieceKind::King {
                kingside_capable: true,
                ..
            }
        )
    }

    pub fn is_queen_side_castle_capable(&self) -> bool {
        matches!(
            self.king.kind(),
            PieceKind::King {
                queenside_capable: true,
                ..
            }
        )
    }

    /// Is `mv` in this player's move list? Castling is additionally barred
    /// while in check.
    pub fn is_move_legal(&self, mv: &Move) -> bool {
        !(self.in_check && mv.is_castling()) && self.legal_moves.contains(mv)
    }

    /// Attempt `mv`. Unknown moves are rejected outright; known moves are
    /// executed on a scratch board and rejected if the mover's king is
    /// attacked there. Only a `Done` transition carries a new board.
    pub fn make_move(&self, mv: &Move) -> MoveTransition {
        if !self.is_move_legal(mv) {
            trace!(player = %self.alliance, %mv, "rejected: not a legal move");
            return MoveTransition::new(
                self.board.clone(),
                self.board.clone(),
                mv.clone(),
                MoveStatus::IllegalMove,
            );
        }

        let to_board = mv.execute();
        let king = to_board.king(self.alliance);
        let opponent_moves = to_board.calculate_legal_moves(!self.alliance);
        if attacks_on(king.position(), &opponent_moves) {
            trace!(player = %self.alliance, %mv, "rejected: leaves king in check");
            return MoveTransition::new(
                self.board.clone(),
                self.board.clone(),
                mv.clone(),
                MoveStatus::LeavesPlayerInCheck,
            );
        }

        trace!(player = %self.alliance, %mv, "done");
        MoveTransition::new(self.board.clone(), to_board, mv.clone(), MoveStatus::Done)
    }

    /// Walk a move backwards: the transition lands on the board the move was
    /// generated from.
    pub fn un_make_move(&self, mv: &Move) -> MoveTransition {
        MoveTransition::new(self.board.clone(), mv.undo(), mv.clone(), MoveStatus::Done)
    }

    fn has_escape_moves(&self) -> bool {
        self.legal_moves
            .iter()
            .any(|mv| self.make_move(mv).status().is_done())
    }
}

/// Does any move in `moves` land on `coordinate`?
fn attacks_on(coordinate: u8, moves: &[Move]) -> bool {
    moves.iter().any(|mv| mv.destination() == coordinate)
}

// ---------------------------------------------------------------------------
// Castling
// ---------------------------------------------------------------------------

/// Fixed squares involved in castling for one alliance.
struct CastleGeometry {
    king_home: u8,
    kingside_rook: u8,
    /// Must be empty and unattacked.
    kingside_path: [u8; 2],
    kingside_king_to: u8,
    kingside_rook_to: u8,
    queenside_rook: u8,
    /// Must be empty; the rook-side square does not need to be safe.
    queenside_empty: [u8; 3],
    /// The squares the king crosses or lands on; must be unattacked.
    queenside_safe: [u8; 2],
    queenside_king_to: u8,
    queenside_rook_to: u8,
}

const WHITE_CASTLES: CastleGeometry = CastleGeometry {
    king_home: 60,
    kingside_rook: 63,
    kingside_path: [61, 62],
    kingside_king_to: 62,
    kingside_rook_to: 61,
    queenside_rook: 56,
    queenside_empty: [57, 58, 59],
    queenside_safe: [58, 59],
    queenside_king_to: 58,
    queenside_rook_to: 59,
};

const BLACK_CASTLES: CastleGeometry = CastleGeometry {
    king_home: 4,
    kingside_rook: 7,
    kingside_path: [5, 6],
    kingside_king_to: 6,
    kingside_rook_to: 5,
    queenside_rook: 0,
    queenside_empty: [1, 2, 3],
    queenside_safe: [2, 3],
    queenside_king_to: 2,
    queenside_rook_to: 3,
};

/// Castle moves available to `alliance` on `board`, given the opponent's
/// candidate moves. Empty while in check or once the king has moved.
fn calculate_king_castles(
    board: &Board,
    alliance: Alliance,
    king: Piece,
    opponent_moves: &[Move],
    in_check: bool,
) -> Vec<Move> {
    let mut castles = Vec::new();
    let geometry = match alliance {
        Alliance::White => &WHITE_CASTLES,
        Alliance::Black => &BLACK_CASTLES,
    };

    if !king.is_first_move() || king.position() != geometry.king_home || in_check {
        return castles;
    }

    let castle_rook = |square: u8| -> Option<Piece> {
        board
            .tile(square)
            .piece()
            .filter(|r| r.is_first_move() && r.kind().is_rook() && r.alliance() == alliance)
    };

    if geometry
        .kingside_path
        .iter()
        .all(|&c| !board.tile(c).is_occupied() && !attacks_on(c, opponent_moves))
    {
        if let Some(rook) = castle_rook(geometry.kingside_rook) {
            castles.push(Move::king_side_castle(
                board.clone(),
                king,
                geometry.kingside_king_to,
                rook,
                geometry.kingside_rook_to,
            ));
        }
    }

    if geometry
        .queenside_empty
        .iter()
        .all(|&c| !board.tile(c).is_occupied())
        && geometry
            .queenside_safe
            .iter()
            .all(|&c| !attacks_on(c, opponent_moves))
    {
        if let Some(rook) = castle_rook(geometry.queenside_rook) {
            castles.push(Move::queen_side_castle(
                board.clone(),
                king,
                geometry.queenside_king_to,
                rook,
                geometry.queenside_rook_to,
            ));
        }
    }

    castles
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
