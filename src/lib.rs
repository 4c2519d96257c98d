//! An immutable-board chess rules engine.
//!
//! The engine answers one question: given a position, which moves are legal
//! and what position does each produce? Boards are value types; applying a
//! move never mutates anything, it returns a [`MoveTransition`] holding the
//! from-board, the (possibly unchanged) to-board, and a verdict.
//!
//! ```
//! use chess_rules::{Board, MoveStatus};
//!
//! let board = Board::standard();
//! let player = board.current_player();
//! let opening = player.legal_moves()[0].clone();
//! let transition = player.make_move(&opening);
//! assert_eq!(transition.status(), MoveStatus::Done);
//! ```

pub mod engine;

pub use engine::{
    Alliance, Board, BoardBuilder, ChessError, Move, MoveKind, MoveStatus, MoveTransition, Piece,
    PieceKind, Player, Tile,
};
