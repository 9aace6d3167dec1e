//! Tilemerge engine library.
//!
//! Exposes the board engine, tile spawning, configuration, the driver
//! protocol and the session type for use by the binaries and tests.

pub mod autoplay;
pub mod board;
pub mod config;
pub mod engine;
pub mod protocol;
pub mod spawn;
