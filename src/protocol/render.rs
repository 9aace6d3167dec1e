//! Plain-text board rendering for terminal drivers.

use std::fmt::Write;

use crate::board::Board;

/// Line printed after every rendered grid.
pub const SEPARATOR: &str = "---------";

/// Renders the grid one row per line as bracketed exponents, e.g.
/// `[1 0 0 2]`, followed by [`SEPARATOR`].
pub fn render_grid(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..board.size() {
        let cells: Vec<String> = board
            .tiles_in_row(row)
            .iter()
            .map(|t| t.to_string())
            .collect();
        let _ = writeln!(out, "[{}]", cells.join(" "));
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_prints_exponents_row_by_row() {
        let board = Board::from_tiles(2, vec![1, 0, 0, 3]).unwrap();
        assert_eq!(render_grid(&board), "[1 0]\n[0 3]\n---------\n");
    }
}
