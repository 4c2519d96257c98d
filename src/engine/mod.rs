pub mod board;
pub mod board_utils;
pub mod moves;
pub mod piece;
pub mod player;
pub mod tile;
pub mod types;

pub use board::{Board, BoardBuilder};
pub use moves::{Move, MoveKind};
pub use piece::{Piece, PieceKind};
pub use player::{MoveStatus, MoveTransition, Player};
pub use tile::Tile;
pub use types::{Alliance, ChessError};
