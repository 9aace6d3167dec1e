//! Board state snapshots.
//!
//! A snapshot is the complete externally visible state of a board, encoded
//! as a JSON object with the keys `Score`, `Tiles`, `Player`, `GameOver` and
//! `Size`. Renderers rebuild their view from it, and it doubles as the
//! save format: decoding re-validates every board invariant.

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, BoardError, Tile};
use crate::config::MAX_SIZE;

/// Errors that can occur when decoding a snapshot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("malformed snapshot JSON: {0}")]
    Json(String),

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("board size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("stored score {stored} does not match tiles (expected {computed})")]
    ScoreMismatch { stored: u64, computed: u64 },

    #[error("stored game-over flag {stored} does not match tiles")]
    GameOverMismatch { stored: bool },
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e.to_string())
    }
}

/// Serializable view of a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoardSnapshot {
    pub score: u64,
    pub tiles: Vec<Tile>,
    pub player: String,
    pub game_over: bool,
    pub size: usize,
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        BoardSnapshot {
            score: board.score(),
            tiles: board.tiles().to_vec(),
            player: board.player().to_string(),
            game_over: board.game_over(),
            size: board.size(),
        }
    }
}

impl BoardSnapshot {
    /// Rebuilds a board, rejecting snapshots whose derived fields disagree
    /// with their tiles.
    pub fn into_board(self) -> Result<Board, SnapshotError> {
        if self.size > MAX_SIZE {
            return Err(SnapshotError::SizeTooLarge {
                size: self.size,
                max: MAX_SIZE,
            });
        }
        let (score, game_over) = (self.score, self.game_over);
        let board = Board::from_tiles(self.size, self.tiles)?.with_player(self.player);
        if board.score() != score {
            return Err(SnapshotError::ScoreMismatch {
                stored: score,
                computed: board.score(),
            });
        }
        if board.game_over() != game_over {
            return Err(SnapshotError::GameOverMismatch { stored: game_over });
        }
        Ok(board)
    }
}

/// Encodes a board as a JSON snapshot.
///
/// Encoding cannot realistically fail for this shape; if it ever does, the
/// error is logged and an empty object is returned so callers always get
/// valid JSON.
pub fn encode_state(board: &Board) -> String {
    match serde_json::to_string(&BoardSnapshot::from(board)) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to encode board state: {}", e);
            "{}".to_string()
        }
    }
}

/// Decodes and validates a JSON snapshot.
pub fn decode_state(json: &str) -> Result<Board, SnapshotError> {
    let snapshot: BoardSnapshot = serde_json::from_str(json)?;
    snapshot.into_board()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        let mut tiles = vec![0; 16];
        tiles[0] = 1;
        tiles[5] = 3;
        Board::from_tiles(4, tiles).unwrap().with_player("Bea")
    }

    #[test]
    fn encode_uses_stable_keys() {
        let json = encode_state(&sample());
        assert_eq!(
            json,
            r#"{"Score":10,"Tiles":[1,0,0,0,0,3,0,0,0,0,0,0,0,0,0,0],"Player":"Bea","GameOver":false,"Size":4}"#
        );
    }

    #[test]
    fn decode_restores_board() {
        let board = sample();
        let restored = decode_state(&encode_state(&board)).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(matches!(decode_state("{not json"), Err(SnapshotError::Json(_))));
        assert!(matches!(decode_state(r#"{"Score":0}"#), Err(SnapshotError::Json(_))));
    }

    #[test]
    fn decode_rejects_wrong_tile_count() {
        let json = r#"{"Score":2,"Tiles":[1,0,0],"Player":"An","GameOver":false,"Size":4}"#;
        assert_eq!(
            decode_state(json),
            Err(SnapshotError::Board(BoardError::WrongTileCount {
                expected: 16,
                found: 3
            }))
        );
    }

    #[test]
    fn decode_rejects_inconsistent_score() {
        let json = r#"{"Score":99,"Tiles":[1,0,0,0],"Player":"An","GameOver":false,"Size":2}"#;
        assert_eq!(
            decode_state(json),
            Err(SnapshotError::ScoreMismatch {
                stored: 99,
                computed: 2
            })
        );
    }

    #[test]
    fn decode_rejects_inconsistent_game_over() {
        let json = r#"{"Score":12,"Tiles":[1,2,2,1],"Player":"An","GameOver":false,"Size":2}"#;
        assert_eq!(
            decode_state(json),
            Err(SnapshotError::GameOverMismatch { stored: false })
        );
    }

    #[test]
    fn decode_rejects_unaddressable_size() {
        let json = r#"{"Score":0,"Tiles":[],"Player":"An","GameOver":false,"Size":4294967296}"#;
        let result = decode_state(json);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            result,
            Err(SnapshotError::SizeTooLarge {
                size: 4_294_967_296,
                max: MAX_SIZE
            })
        );
        #[cfg(not(target_pointer_width = "64"))]
        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn decode_rejects_oversized_board() {
        let size = MAX_SIZE + 1;
        let snapshot = BoardSnapshot {
            score: 0,
            tiles: vec![0; size * size],
            player: "An".to_string(),
            game_over: false,
            size,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(
            decode_state(&json),
            Err(SnapshotError::SizeTooLarge { size, max: MAX_SIZE })
        );
    }

    #[test]
    fn decode_rejects_zero_size_without_panicking() {
        let json = r#"{"Score":0,"Tiles":[],"Player":"An","GameOver":true,"Size":0}"#;
        assert_eq!(decode_state(json), Err(SnapshotError::Board(BoardError::ZeroSize)));
    }

    #[test]
    fn decode_accepts_finished_game() {
        let json = r#"{"Score":12,"Tiles":[1,2,2,1],"Player":"An","GameOver":true,"Size":2}"#;
        let board = decode_state(json).unwrap();
        assert!(board.game_over());
    }
}
