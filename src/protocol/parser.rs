//! Driver command parser.
//!
//! Parses incoming lines from a terminal or host into structured `Command`
//! variants that the main loop can dispatch on.

use log::debug;

use crate::board::Direction;

/// A parsed driver-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Slide the tiles: `w`/`a`/`s`/`d` or `up`/`left`/`down`/`right`.
    Move(Direction),

    /// Discard the current board and start a new game.
    NewGame,

    /// Print the JSON state snapshot.
    State,

    /// Set a configuration option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Terminate the driver.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unrecognized input, and malformed
/// arguments. Drivers treat `None` as a no-op.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = tokens.first()?;

    match first.to_ascii_lowercase().as_str() {
        "newgame" => Some(Command::NewGame),
        "state" => Some(Command::State),
        "quit" => Some(Command::Quit),
        "setoption" => parse_setoption(&tokens[1..]),
        _ if tokens.len() == 1 => {
            let dir = Direction::from_name(first);
            if dir.is_none() {
                debug!("ignoring unrecognized input: {}", first);
            }
            dir.map(Command::Move)
        }
        _ => {
            debug!("ignoring unrecognized input: {}", line.trim());
            None
        }
    }
}

/// Parses the arguments following `setoption`.
///
/// Option ids are single words. Everything after `value` is the value, with
/// inner spacing collapsed to single spaces.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    let (name, rest) = match args {
        ["name", name, rest @ ..] if !name.eq_ignore_ascii_case("value") => (*name, rest),
        _ => {
            debug!("ignoring setoption without an option name: {:?}", args);
            return None;
        }
    };

    let value = match rest {
        [] | ["value"] => None,
        ["value", words @ ..] => Some(words.join(" ")),
        _ => {
            debug!("ignoring setoption {}: expected 'value' after the name", name);
            return None;
        }
    };

    Some(Command::SetOption {
        name: name.to_string(),
        value,
    })
}
