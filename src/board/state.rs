//! Board state and the move engine.
//!
//! Holds a square grid of tile exponents in row-major order together with
//! the derived score and game-over flag. All mutation goes through
//! [`Board::make_move`] and [`Board::spawn_tile`], which keep the derived
//! fields in sync with the tiles.

use thiserror::Error;

use super::direction::Direction;
use super::line::compress_and_merge;
use super::{Tile, MAX_TILE};
use crate::spawn::{spawn_into, SpawnRules, SpawnSource};

/// Label given to new boards when none is configured.
pub const DEFAULT_PLAYER: &str = "An";

/// Errors raised when building a board from externally supplied tiles.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size must be positive")]
    ZeroSize,

    #[error("board size {0} has more cells than can be addressed")]
    SizeOverflow(usize),

    #[error("expected {expected} tiles for the grid, found {found}")]
    WrongTileCount { expected: usize, found: usize },
}

/// A single game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Row-major exponents; 0 is an empty cell.
    tiles: Vec<Tile>,
    score: u64,
    game_over: bool,
    player: String,
}

impl Board {
    /// Creates an all-empty board of `size * size` cells.
    pub fn empty(size: usize) -> Self {
        Board {
            size,
            tiles: vec![0; size * size],
            score: 0,
            game_over: false,
            player: DEFAULT_PLAYER.to_string(),
        }
    }

    /// Creates a fresh game: an empty grid with two spawned tiles.
    pub fn new<S: SpawnSource + ?Sized>(size: usize, rules: &SpawnRules, source: &mut S) -> Self {
        let mut board = Board::empty(size);
        board.spawn_tile(rules, source);
        board.spawn_tile(rules, source);
        board
    }

    /// Builds a board from existing tiles, deriving score and game-over.
    pub fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::ZeroSize);
        }
        let cells = size
            .checked_mul(size)
            .ok_or(BoardError::SizeOverflow(size))?;
        if tiles.len() != cells {
            return Err(BoardError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }
        let mut board = Board {
            size,
            tiles,
            score: 0,
            game_over: false,
            player: DEFAULT_PLAYER.to_string(),
        };
        board.refresh();
        Ok(board)
    }

    /// Replaces the player label. The label is never read by the engine.
    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = player.into();
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Cached game-over flag, refreshed after every mutation.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    /// Highest exponent on the board (0 when empty).
    pub fn max_tile(&self) -> Tile {
        self.tiles.iter().copied().max().unwrap_or(0)
    }

    pub fn empty_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t == 0).count()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Returns a copy of row `row`, left to right.
    pub fn tiles_in_row(&self, row: usize) -> Vec<Tile> {
        let start = self.index(row, 0);
        self.tiles[start..start + self.size].to_vec()
    }

    /// Returns a copy of column `col`, top to bottom.
    pub fn tiles_in_col(&self, col: usize) -> Vec<Tile> {
        (0..self.size).map(|row| self.tiles[self.index(row, col)]).collect()
    }

    /// Computes the grid that moving in `direction` would produce, without
    /// touching the board. The flag is false when the grid is unchanged.
    pub fn slide(&self, direction: Direction) -> (Vec<Tile>, bool) {
        let mut next = vec![0; self.tiles.len()];

        for i in 0..self.size {
            let mut line = if direction.is_horizontal() {
                self.tiles_in_row(i)
            } else {
                self.tiles_in_col(i)
            };
            if direction.is_reversed() {
                line.reverse();
            }
            let mut merged = compress_and_merge(&line);
            if direction.is_reversed() {
                merged.reverse();
            }
            for (j, tile) in merged.into_iter().enumerate() {
                let idx = if direction.is_horizontal() {
                    self.index(i, j)
                } else {
                    self.index(j, i)
                };
                next[idx] = tile;
            }
        }

        let changed = next != self.tiles;
        (next, changed)
    }

    /// Plays a move. On a change, commits the new grid, spawns one tile and
    /// refreshes score and game-over, then returns true. An unchanged grid
    /// returns false and leaves the board exactly as it was.
    pub fn make_move<S: SpawnSource + ?Sized>(
        &mut self,
        direction: Direction,
        rules: &SpawnRules,
        source: &mut S,
    ) -> bool {
        let (next, changed) = self.slide(direction);
        if !changed {
            return false;
        }
        self.tiles = next;
        self.spawn_tile(rules, source);
        true
    }

    /// Spawns one weighted tile into a random empty cell. Safe on a full
    /// board, where it does nothing and returns `None`.
    pub fn spawn_tile<S: SpawnSource + ?Sized>(
        &mut self,
        rules: &SpawnRules,
        source: &mut S,
    ) -> Option<usize> {
        let placed = spawn_into(&mut self.tiles, rules, source);
        self.refresh();
        placed
    }

    /// Recomputes and stores the score from the tiles.
    pub fn calculate_score(&mut self) -> u64 {
        self.score = score_of(&self.tiles);
        self.score
    }

    /// Scans the grid directly for a terminal position.
    pub fn is_game_over(&self) -> bool {
        is_game_over(self.size, &self.tiles)
    }

    fn refresh(&mut self) {
        self.calculate_score();
        self.game_over = self.is_game_over();
    }
}

/// Sum of `2^e` over every non-empty cell, saturating at `u64::MAX`.
pub fn score_of(tiles: &[Tile]) -> u64 {
    tiles
        .iter()
        .filter(|&&t| t > 0)
        .map(|&t| 1u64.checked_shl(u32::from(t)).unwrap_or(u64::MAX))
        .fold(0u64, u64::saturating_add)
}

/// True iff the grid is full and no two orthogonal neighbours can merge.
/// Equal neighbours at [`MAX_TILE`] cannot.
pub fn is_game_over(size: usize, tiles: &[Tile]) -> bool {
    if tiles.iter().any(|&t| t == 0) {
        return false;
    }
    for row in 0..size {
        for col in 0..size {
            let t = tiles[row * size + col];
            if t == MAX_TILE {
                continue;
            }
            if col + 1 < size && tiles[row * size + col + 1] == t {
                return false;
            }
            if row + 1 < size && tiles[(row + 1) * size + col] == t {
                return false;
            }
        }
    }
    true
}
