//! Driver protocol handling.
//!
//! Line-oriented command parsing for terminal and host drivers, JSON state
//! snapshots, and plain-text grid rendering.

pub mod parser;
pub mod render;
pub mod snapshot;

pub use parser::{parse_command, Command};
pub use render::{render_grid, SEPARATOR};
pub use snapshot::{decode_state, encode_state, BoardSnapshot, SnapshotError};
