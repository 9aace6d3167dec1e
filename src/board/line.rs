//! Compress-and-merge over a single line of tiles.
//!
//! A line is one row or column, already oriented so that tiles slide toward
//! index 0. Zeros are empty cells; any other value is an exponent.

use super::{Tile, MAX_TILE};

/// Slides the non-empty tiles of `line` toward index 0, merging equal
/// neighbours once each, and pads the tail with zeros.
///
/// Merging is leftmost-first and a tile produced by a merge cannot merge
/// again in the same pass, so `[2, 2, 2, 2]` becomes `[3, 3, 0, 0]` and
/// `[2, 2, 2, 0]` becomes `[3, 2, 0, 0]`. A pair at [`MAX_TILE`] is left
/// as two tiles.
pub fn compress_and_merge(line: &[Tile]) -> Vec<Tile> {
    let mut out: Vec<Tile> = Vec::with_capacity(line.len());
    let mut last_merged = false;

    for &tile in line.iter().filter(|&&t| t != 0) {
        match out.last_mut() {
            Some(last) if !last_merged && *last == tile && tile < MAX_TILE => {
                *last += 1;
                last_merged = true;
            }
            _ => {
                out.push(tile);
                last_merged = false;
            }
        }
    }

    out.resize(line.len(), 0);
    out
}
