//! Piece values and per-piece candidate-move generation.
//!
//! Every variant generates its geometric candidate moves against a board by
//! applying signed flat-index offsets; the column tables in `board_utils`
//! reject offsets that would wrap around a board edge. King-safety filtering
//! happens later, in `Player::make_move` — a candidate produced here may
//! still be rejected for exposing its own king.

use std::fmt;
use std::sync::OnceLock;

use crate::engine::board::Board;
use crate::engine::board_utils::{
    is_valid_tile_coordinate, EIGHTH_COLUMN, FIRST_COLUMN, NUM_TILES, SECOND_COLUMN, SECOND_ROW,
    SEVENTH_COLUMN, SEVENTH_ROW,
};
use crate::engine::moves::Move;
use crate::engine::types::Alliance;

// ---------------------------------------------------------------------------
// PieceKind
// ---------------------------------------------------------------------------

/// The six piece kinds. The king carries its castling state: whether it has
/// castled, and whether each side's castle is still notionally available.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King {
        castled: bool,
        kingside_capable: bool,
        queenside_capable: bool,
    },
}

impl PieceKind {
    /// Material value in centipawns, consumed by external evaluation.
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King { .. } => 10_000,
        }
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(self, PieceKind::Pawn)
    }

    #[inline]
    pub const fn is_rook(self) -> bool {
        matches!(self, PieceKind::Rook)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self, PieceKind::King { .. })
    }

    /// Uppercase display letter.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King { .. } => 'K',
        }
    }
}

// ---------------------------------------------------------------------------
// Piece
// ---------------------------------------------------------------------------

/// An immutable piece: kind, alliance, square, and whether it is yet to make
/// its first move. "Moving" a piece produces a new value via [`Piece::move_piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    alliance: Alliance,
    position: u8,
    first_move: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, alliance: Alliance, position: u8, first_move: bool) -> Self {
        Piece {
            kind,
            alliance,
            position,
            first_move,
        }
    }

    /// A king that has not yet moved or castled.
    pub const fn fresh_king(alliance: Alliance, position: u8) -> Self {
        Piece::new(
            PieceKind::King {
                castled: false,
                kingside_capable: true,
                queenside_capable: true,
            },
            alliance,
            position,
            true,
        )
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn alliance(self) -> Alliance {
        self.alliance
    }

    #[inline]
    pub const fn position(self) -> u8 {
        self.position
    }

    #[inline]
    pub const fn is_first_move(self) -> bool {
        self.first_move
    }

    #[inline]
    pub const fn value(self) -> i32 {
        self.kind.value()
    }

    /// Display symbol: uppercase for White, lowercase for Black.
    pub fn symbol(self) -> char {
        match self.alliance {
            Alliance::White => self.kind.letter(),
            Alliance::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Positional score contribution of this piece on its current square.
    pub fn location_bonus(self) -> i32 {
        match self.kind {
            PieceKind::Pawn => self.alliance.pawn_bonus(self.position),
            PieceKind::Knight => self.alliance.knight_bonus(self.position),
            PieceKind::Bishop => self.alliance.bishop_bonus(self.position),
            PieceKind::Rook => self.alliance.rook_bonus(self.position),
            PieceKind::Queen => self.alliance.queen_bonus(self.position),
            PieceKind::King { .. } => self.alliance.king_bonus(self.position),
        }
    }

    /// The piece as it stands after `mv` relocates it.
    ///
    /// Non-king pieces come out of the shared moved-piece cache; kings are
    /// built fresh because their castling flags change.
    pub fn move_piece(self, mv: &Move) -> Piece {
        match self.kind {
            PieceKind::King { .. } => Piece::new(
                PieceKind::King {
                    castled: mv.is_castling(),
                    kingside_capable: false,
                    queenside_capable: false,
                },
                self.alliance,
                mv.destination(),
                false,
            ),
            kind => moved_instance(kind, self.alliance, mv.destination()),
        }
    }

    // -----------------------------------------------------------------------
    // Candidate-move generation
    // -----------------------------------------------------------------------

    /// All geometric candidate moves for this piece on `board`.
    pub fn calculate_legal_moves(&self, board: &Board) -> Vec<Move> {
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(board),
            PieceKind::Knight => self.stepper_moves(board, &KNIGHT_OFFSETS, knight_excluded),
            PieceKind::Bishop => self.slider_moves(board, &BISHOP_OFFSETS, bishop_excluded),
            PieceKind::Rook => self.slider_moves(board, &ROOK_OFFSETS, rook_excluded),
            PieceKind::Queen => self.slider_moves(board, &ROYAL_OFFSETS, royal_excluded),
            PieceKind::King { .. } => self.stepper_moves(board, &ROYAL_OFFSETS, royal_excluded),
        }
    }

    /// Fixed-offset movers (knight, king): each offset is applied once.
    fn stepper_moves(
        &self,
        board: &Board,
        offsets: &[i16],
        excluded: fn(u8, i16) -> bool,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            if excluded(self.position, offset) {
                continue;
            }
            let candidate = self.position as i16 + offset;
            if !is_valid_tile_coordinate(candidate) {
                continue;
            }
            let destination = candidate as u8;
            match board.tile(destination).piece() {
                None => moves.push(Move::major(board.clone(), *self, destination)),
                Some(target) if target.alliance != self.alliance => {
                    moves.push(Move::major_attack(board.clone(), *self, destination, target));
                }
                Some(_) => {}
            }
        }
        moves
    }

    /// Sliding movers (bishop, rook, queen): step along each ray until the
    /// board edge or an occupied tile.
    fn slider_moves(
        &self,
        board: &Board,
        offsets: &[i16],
        excluded: fn(u8, i16) -> bool,
    ) -> Vec<Move> {
        let mut moves = Vec::new();
        for &offset in offsets {
            let mut candidate = self.position as i16;
            loop {
                if excluded(candidate as u8, offset) {
                    break;
                }
                candidate += offset;
                if !is_valid_tile_coordinate(candidate) {
                    break;
                }
                let destination = candidate as u8;
                match board.tile(destination).piece() {
                    None => moves.push(Move::major(board.clone(), *self, destination)),
                    Some(target) => {
                        if target.alliance != self.alliance {
                            moves.push(Move::major_attack(
                                board.clone(),
                                *self,
                                destination,
                                target,
                            ));
                        }
                        break;
                    }
                }
            }
        }
        moves
    }

    fn pawn_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::new();
        let from = self.position as usize;
        let direction = self.alliance.direction();

        for &offset in &PAWN_OFFSETS {
            let candidate = self.position as i16 + direction * offset;
            if !is_valid_tile_coordinate(candidate) {
                continue;
            }
            let destination = candidate as u8;

            match offset {
                // Single advance: destination must be empty.
                8 => {
                    if !board.tile(destination).is_occupied() {
                        self.push_pawn_move(
                            &mut moves,
                            Move::pawn_move(board.clone(), *self, destination),
                        );
                    }
                }
                // Double advance: first move from the start row, both squares empty.
                16 => {
                    let on_start_row = (SECOND_ROW[from] && self.alliance.is_black())
                        || (SEVENTH_ROW[from] && self.alliance.is_white());
                    if self.first_move && on_start_row {
                        let behind = (self.position as i16 + direction * 8) as u8;
                        if !board.tile(behind).is_occupied()
                            && !board.tile(destination).is_occupied()
                        {
                            moves.push(Move::pawn_jump(board.clone(), *self, destination));
                        }
                    }
                }
                // Diagonal captures; each is edge-excluded on one column per alliance.
                7 => {
                    let wraps = (EIGHTH_COLUMN[from] && self.alliance.is_white())
                        || (FIRST_COLUMN[from] && self.alliance.is_black());
                    if !wraps {
                        let beside = self.position as i16 + self.alliance.opposite_direction();
                        self.pawn_capture(&mut moves, board, destination, beside);
                    }
                }
                9 => {
                    let wraps = (FIRST_COLUMN[from] && self.alliance.is_white())
                        || (EIGHTH_COLUMN[from] && self.alliance.is_black());
                    if !wraps {
                        let beside = self.position as i16 - self.alliance.opposite_direction();
                        self.pawn_capture(&mut moves, board, destination, beside);
                    }
                }
                _ => unreachable!("unknown pawn offset {offset}"),
            }
        }
        moves
    }

    /// A diagonal pawn capture: either a piece on the destination tile, or the
    /// board's en-passant pawn standing immediately beside us at `beside`.
    fn pawn_capture(&self, moves: &mut Vec<Move>, board: &Board, destination: u8, beside: i16) {
        if let Some(target) = board.tile(destination).piece() {
            if target.alliance != self.alliance {
                self.push_pawn_move(
                    moves,
                    Move::pawn_attack(board.clone(), *self, destination, target),
                );
            }
        } else if let Some(en_passant_pawn) = board.en_passant_pawn() {
            if en_passant_pawn.position() as i16 == beside
                && en_passant_pawn.alliance() != self.alliance
            {
                self.push_pawn_move(
                    moves,
                    Move::pawn_en_passant_attack(
                        board.clone(),
                        *self,
                        destination,
                        en_passant_pawn,
                    ),
                );
            }
        }
    }

    /// Any pawn move landing on the promotion rank is wrapped in a promotion.
    fn push_pawn_move(&self, moves: &mut Vec<Move>, mv: Move) {
        if self.alliance.is_promotion_square(mv.destination()) {
            moves.push(Move::promotion(mv));
        } else {
            moves.push(mv);
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Movement offsets & edge exclusions
// ---------------------------------------------------------------------------

const KNIGHT_OFFSETS: [i16; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const BISHOP_OFFSETS: [i16; 4] = [-9, -7, 7, 9];
const ROOK_OFFSETS: [i16; 4] = [-8, -1, 1, 8];
/// Queen and king share the eight compass directions.
const ROYAL_OFFSETS: [i16; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
/// Pawn offsets are multiplied by the alliance's direction.
const PAWN_OFFSETS: [i16; 4] = [8, 16, 7, 9];

fn knight_excluded(from: u8, offset: i16) -> bool {
    let from = from as usize;
    (FIRST_COLUMN[from] && matches!(offset, -17 | -10 | 6 | 15))
        || (SECOND_COLUMN[from] && matches!(offset, -10 | 6))
        || (SEVENTH_COLUMN[from] && matches!(offset, -6 | 10))
        || (EIGHTH_COLUMN[from] && matches!(offset, -15 | -6 | 10 | 17))
}

fn bishop_excluded(from: u8, offset: i16) -> bool {
    let from = from as usize;
    (FIRST_COLUMN[from] && matches!(offset, -9 | 7))
        || (EIGHTH_COLUMN[from] && matches!(offset, -7 | 9))
}

fn rook_excluded(from: u8, offset: i16) -> bool {
    let from = from as usize;
    (FIRST_COLUMN[from] && offset == -1) || (EIGHTH_COLUMN[from] && offset == 1)
}

fn royal_excluded(from: u8, offset: i16) -> bool {
    let from = from as usize;
    (FIRST_COLUMN[from] && matches!(offset, -9 | -1 | 7))
        || (EIGHTH_COLUMN[from] && matches!(offset, -7 | 1 | 9))
}

// ---------------------------------------------------------------------------
// Moved-piece instance cache
// ---------------------------------------------------------------------------

/// Pre-built "already moved" piece instances for every (kind, alliance,
/// square), so `move_piece` never reconstructs an equivalent value. Pure
/// memoization; kings are excluded because their castle flags vary.
struct MovedPieceCache {
    pieces: [[[Piece; NUM_TILES]; 2]; 5],
}

static MOVED_PIECES: OnceLock<MovedPieceCache> = OnceLock::new();

const CACHED_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

impl MovedPieceCache {
    fn init() -> Self {
        let pieces = std::array::from_fn(|k| {
            std::array::from_fn(|a| {
                let alliance = if a == 0 {
                    Alliance::White
                } else {
                    Alliance::Black
                };
                std::array::from_fn(|c| Piece::new(CACHED_KINDS[k], alliance, c as u8, false))
            })
        });
        MovedPieceCache { pieces }
    }
}

/// Shared non-first-move instance of a cached piece kind.
pub(crate) fn moved_instance(kind: PieceKind, alliance: Alliance, destination: u8) -> Piece {
    let k = match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King { .. } => unreachable!("kings are never cached"),
    };
    MOVED_PIECES.get_or_init(MovedPieceCache::init).pieces[k][alliance.index()]
        [destination as usize]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::board::Board;
    use crate::engine::board_utils::coordinate_of;

    // -- helpers --

    fn sq(name: &str) -> u8 {
        coordinate_of(name).unwrap()
    }

    /// A board holding both kings (tucked in corners where they do not
    /// interfere) plus the given pieces, with `to_move` to play.
    fn board_with(pieces: &[Piece], to_move: Alliance) -> Board {
        let mut builder = Board::builder()
            .piece(Piece::fresh_king(Alliance::White, sq("h1")))
            .piece(Piece::fresh_king(Alliance::Black, sq("a8")));
        for &p in pieces {
            builder = builder.piece(p);
        }
        builder.move_maker(to_move).build().unwrap()
    }

    fn destinations(moves: &[Move]) -> Vec<u8> {
        let mut ds: Vec<u8> = moves.iter().map(|m| m.destination()).collect();
        ds.sort_unstable();
        ds
    }

    // ===================================================================
    // Knight
    // ===================================================================

    #[test]
    fn knight_in_centre_has_eight_moves() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, sq("d4"), false);
        let board = board_with(&[knight], Alliance::White);
        assert_eq!(knight.calculate_legal_moves(&board).len(), 8);
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, sq("a1"), false);
        let board = board_with(&[knight], Alliance::White);
        let moves = knight.calculate_legal_moves(&board);
        let mut expected = vec![sq("b3"), sq("c2")];
        expected.sort_unstable();
        assert_eq!(destinations(&moves), expected);
    }

    #[test]
    fn knight_on_b_file_respects_second_column() {
        // b4: the -10 and 6 offsets would wrap; 6 moves remain.
        let knight = Piece::new(PieceKind::Knight, Alliance::White, sq("b4"), false);
        let board = board_with(&[knight], Alliance::White);
        assert_eq!(knight.calculate_legal_moves(&board).len(), 6);
    }

    #[test]
    fn knight_captures_enemy_not_friend() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, sq("d4"), false);
        let enemy = Piece::new(PieceKind::Pawn, Alliance::Black, sq("e6"), false);
        let friend = Piece::new(PieceKind::Pawn, Alliance::White, sq("c6"), false);
        let board = board_with(&[knight, enemy, friend], Alliance::White);
        let moves = knight.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 7); // 8 minus the friendly-occupied square
        assert!(moves
            .iter()
            .any(|m| m.destination() == sq("e6") && m.is_attack()));
    }

    // ===================================================================
    // Bishop / Rook / Queen (sliders)
    // ===================================================================

    #[test]
    fn bishop_in_centre_open_board() {
        let bishop = Piece::new(PieceKind::Bishop, Alliance::White, sq("d4"), false);
        let board = board_with(&[bishop], Alliance::White);
        assert_eq!(bishop.calculate_legal_moves(&board).len(), 13);
    }

    #[test]
    fn bishop_stops_at_blocker() {
        let bishop = Piece::new(PieceKind::Bishop, Alliance::White, sq("c1"), false);
        let friend = Piece::new(PieceKind::Pawn, Alliance::White, sq("e3"), false);
        let board = board_with(&[bishop, friend], Alliance::White);
        let moves = bishop.calculate_legal_moves(&board);
        // Only b2/a3 and d2 remain: e3 is friendly and blocks the ray.
        let mut expected = vec![sq("a3"), sq("b2"), sq("d2")];
        expected.sort_unstable();
        assert_eq!(destinations(&moves), expected);
    }

    #[test]
    fn rook_on_empty_file_and_rank() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("d4"), false);
        let board = board_with(&[rook], Alliance::White);
        assert_eq!(rook.calculate_legal_moves(&board).len(), 14);
    }

    #[test]
    fn rook_does_not_wrap_around_edge() {
        let rook = Piece::new(PieceKind::Rook, Alliance::White, sq("h4"), false);
        let board = board_with(&[rook], Alliance::White);
        let moves = rook.calculate_legal_moves(&board);
        // Every destination stays on the h-file or the fourth rank.
        assert!(moves.iter().all(|m| {
            let d = m.destination();
            d % 8 == 7 || d / 8 == sq("h4") / 8
        }));
        // 14 line squares minus h1, where the friendly king stands.
        assert_eq!(moves.len(), 13);
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let queen = Piece::new(PieceKind::Queen, Alliance::White, sq("d4"), false);
        let board = board_with(&[queen], Alliance::White);
        assert_eq!(queen.calculate_legal_moves(&board).len(), 27);
    }

    #[test]
    fn queen_attack_ends_ray() {
        let queen = Piece::new(PieceKind::Queen, Alliance::White, sq("d1"), false);
        let enemy = Piece::new(PieceKind::Rook, Alliance::Black, sq("d5"), false);
        let board = board_with(&[queen, enemy], Alliance::White);
        let moves = queen.calculate_legal_moves(&board);
        assert!(moves
            .iter()
            .any(|m| m.destination() == sq("d5") && m.is_attack()));
        // The ray must not continue past d5.
        assert!(!moves.iter().any(|m| m.destination() == sq("d6")));
    }

    // ===================================================================
    // King (quiet moves; castling lives in Player)
    // ===================================================================

    #[test]
    fn king_in_corner_has_three_moves() {
        let king = Piece::fresh_king(Alliance::White, sq("a1"));
        let board = Board::builder()
            .piece(king)
            .piece(Piece::fresh_king(Alliance::Black, sq("h8")))
            .move_maker(Alliance::White)
            .build()
            .unwrap();
        assert_eq!(king.calculate_legal_moves(&board).len(), 3);
    }

    #[test]
    fn king_in_centre_has_eight_moves() {
        let king = Piece::fresh_king(Alliance::White, sq("e4"));
        let board = Board::builder()
            .piece(king)
            .piece(Piece::fresh_king(Alliance::Black, sq("a8")))
            .move_maker(Alliance::White)
            .build()
            .unwrap();
        assert_eq!(king.calculate_legal_moves(&board).len(), 8);
    }

    // ===================================================================
    // Pawn
    // ===================================================================

    #[test]
    fn pawn_first_move_has_single_and_double_advance() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e2"), true);
        let board = board_with(&[pawn], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), {
            let mut v = vec![sq("e3"), sq("e4")];
            v.sort_unstable();
            v
        });
    }

    #[test]
    fn pawn_after_first_move_only_single_advance() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e4"), false);
        let board = board_with(&[pawn], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), vec![sq("e5")]);
    }

    #[test]
    fn pawn_blocked_has_no_advance() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e2"), true);
        let blocker = Piece::new(PieceKind::Pawn, Alliance::Black, sq("e3"), false);
        let board = board_with(&[pawn, blocker], Alliance::White);
        assert!(pawn.calculate_legal_moves(&board).is_empty());
    }

    #[test]
    fn pawn_double_advance_blocked_at_destination() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e2"), true);
        let blocker = Piece::new(PieceKind::Pawn, Alliance::Black, sq("e4"), false);
        let board = board_with(&[pawn, blocker], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), vec![sq("e3")]);
    }

    #[test]
    fn pawn_diagonal_captures() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e4"), false);
        let left = Piece::new(PieceKind::Knight, Alliance::Black, sq("d5"), false);
        let right = Piece::new(PieceKind::Knight, Alliance::Black, sq("f5"), false);
        let board = board_with(&[pawn, left, right], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 3); // e5 advance + two captures
        assert_eq!(moves.iter().filter(|m| m.is_attack()).count(), 2);
    }

    #[test]
    fn pawn_on_a_file_cannot_capture_off_board() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("a4"), false);
        // An enemy on h6 sits at the flat index the a4 pawn's 9-offset would
        // reach by wrapping; it must not be capturable.
        let bait = Piece::new(PieceKind::Knight, Alliance::Black, sq("h6"), false);
        let board = board_with(&[pawn, bait], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), vec![sq("a5")]);
    }

    #[test]
    fn black_pawn_moves_toward_higher_indices() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::Black, sq("e7"), true);
        let board = board_with(&[pawn], Alliance::Black);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(destinations(&moves), {
            let mut v = vec![sq("e6"), sq("e5")];
            v.sort_unstable();
            v
        });
    }

    #[test]
    fn pawn_advance_to_back_rank_is_promotion() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e7"), false);
        let board = board_with(&[pawn], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_promotion());
    }

    #[test]
    fn pawn_capture_onto_back_rank_is_promotion() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e7"), false);
        let victim = Piece::new(PieceKind::Rook, Alliance::Black, sq("d8"), false);
        let blocker = Piece::new(PieceKind::Rook, Alliance::Black, sq("e8"), false);
        let board = board_with(&[pawn, victim, blocker], Alliance::White);
        let moves = pawn.calculate_legal_moves(&board);
        assert_eq!(moves.len(), 1);
        assert!(moves[0].is_promotion());
        assert!(moves[0].is_attack());
        assert_eq!(moves[0].destination(), sq("d8"));
    }

    // ===================================================================
    // move_piece & the instance cache
    // ===================================================================

    #[test]
    fn move_piece_clears_first_move_flag() {
        let knight = Piece::new(PieceKind::Knight, Alliance::White, sq("b1"), true);
        let board = board_with(&[knight], Alliance::White);
        let mv = Move::major(board, knight, sq("c3"));
        let moved = knight.move_piece(&mv);
        assert_eq!(moved.position(), sq("c3"));
        assert!(!moved.is_first_move());
        assert_eq!(moved.kind(), PieceKind::Knight);
        assert_eq!(moved.alliance(), Alliance::White);
    }

    #[test]
    fn cached_instances_match_fresh_construction() {
        for kind in CACHED_KINDS {
            for alliance in [Alliance::White, Alliance::Black] {
                for c in 0..NUM_TILES as u8 {
                    assert_eq!(
                        moved_instance(kind, alliance, c),
                        Piece::new(kind, alliance, c, false)
                    );
                }
            }
        }
    }

    #[test]
    fn moved_king_records_castle_flags() {
        let king = Piece::fresh_king(Alliance::White, sq("e1"));
        let board = Board::builder()
            .piece(king)
            .piece(Piece::fresh_king(Alliance::Black, sq("e8")))
            .move_maker(Alliance::White)
            .build()
            .unwrap();
        let mv = Move::major(board, king, sq("e2"));
        let moved = king.move_piece(&mv);
        match moved.kind() {
            PieceKind::King {
                castled,
                kingside_capable,
                queenside_capable,
            } => {
                assert!(!castled);
                assert!(!kingside_capable);
                assert!(!queenside_capable);
            }
            other => panic!("expected a king, got {other:?}"),
        }
        assert!(!moved.is_first_move());
    }

    // ===================================================================
    // Values & symbols
    // ===================================================================

    #[test]
    fn piece_values() {
        assert_eq!(PieceKind::Pawn.value(), 100);
        assert_eq!(PieceKind::Knight.value(), 320);
        assert_eq!(PieceKind::Bishop.value(), 330);
        assert_eq!(PieceKind::Rook.value(), 500);
        assert_eq!(PieceKind::Queen.value(), 900);
        assert!(Piece::fresh_king(Alliance::White, 60).value() > PieceKind::Queen.value());
    }

    #[test]
    fn symbols_follow_alliance_case() {
        let white = Piece::new(PieceKind::Queen, Alliance::White, 0, true);
        let black = Piece::new(PieceKind::Queen, Alliance::Black, 0, true);
        assert_eq!(white.symbol(), 'Q');
        assert_eq!(black.symbol(), 'q');
        assert_eq!(white.to_string(), "Q");
    }

    #[test]
    fn location_bonus_dispatches_by_kind() {
        let pawn = Piece::new(PieceKind::Pawn, Alliance::White, sq("e4"), false);
        assert_eq!(pawn.location_bonus(), Alliance::White.pawn_bonus(sq("e4")));
        let king = Piece::fresh_king(Alliance::Black, sq("g8"));
        assert_eq!(king.location_bonus(), Alliance::Black.king_bonus(sq("g8")));
    }
}
