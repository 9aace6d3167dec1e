//! Move directions and their external input encodings.

use std::fmt;

/// One of the four directions a move can slide tiles toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// All directions, in the order the game-over scan and autoplay try them.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    /// Decodes a single-character key (`w`/`a`/`s`/`d`).
    pub fn from_key(c: char) -> Option<Direction> {
        match c.to_ascii_lowercase() {
            'w' => Some(Direction::Up),
            'a' => Some(Direction::Left),
            's' => Some(Direction::Down),
            'd' => Some(Direction::Right),
            _ => None,
        }
    }

    /// Decodes a direction token such as `"up"` or a single key such as `"w"`.
    ///
    /// Matching is case-insensitive. Unrecognized input yields `None`, which
    /// drivers treat as a no-op.
    pub fn from_name(s: &str) -> Option<Direction> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => {
                let mut chars = lower.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Direction::from_key(c),
                    _ => None,
                }
            }
        }
    }

    /// Returns the lowercase token name.
    pub const fn name(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// True for directions whose lines run along a row.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when the line must be reversed so merging runs toward index 0.
    pub const fn is_reversed(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_keys_decode() {
        assert_eq!(Direction::from_key('w'), Some(Direction::Up));
        assert_eq!(Direction::from_key('a'), Some(Direction::Left));
        assert_eq!(Direction::from_key('s'), Some(Direction::Down));
        assert_eq!(Direction::from_key('D'), Some(Direction::Right));
        assert_eq!(Direction::from_key('x'), None);
    }

    #[test]
    fn names_decode_case_insensitively() {
        for d in ALL_DIRECTIONS {
            assert_eq!(Direction::from_name(d.name()), Some(d));
            assert_eq!(Direction::from_name(&d.name().to_uppercase()), Some(d));
        }
        assert_eq!(Direction::from_name(" w "), Some(Direction::Up));
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(Direction::from_name(""), None);
        assert_eq!(Direction::from_name("upward"), None);
        assert_eq!(Direction::from_name("wa"), None);
    }

    #[test]
    fn orientation_flags() {
        assert!(Direction::Left.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(Direction::Right.is_reversed());
        assert!(Direction::Down.is_reversed());
        assert!(!Direction::Left.is_reversed());
        assert!(!Direction::Up.is_reversed());
    }
}
