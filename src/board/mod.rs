//! Board representation and the move engine.
//!
//! Contains the tile grid, move directions, and the per-line
//! compress-and-merge that every move is built from.

pub mod direction;
pub mod line;
pub mod state;

/// A cell value: 0 for empty, otherwise an exponent `e` displayed as `2^e`.
pub type Tile = u8;

/// Largest representable exponent. Tiles at this value no longer merge.
pub const MAX_TILE: Tile = Tile::MAX;

pub use direction::{Direction, ALL_DIRECTIONS};
pub use line::compress_and_merge;
pub use state::{is_game_over, score_of, Board, BoardError, DEFAULT_PLAYER};
