//! Game session state.
//!
//! Holds the one board a driver plays on, together with the configuration,
//! spawn rules and random source used to start and advance it. Drivers
//! (the terminal loop, a host bridge) own an `Engine` and call into it once
//! per input; the board engine itself stays free of global state.

use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Direction};
use crate::config::{ConfigError, GameConfig};
use crate::protocol::render::render_grid;
use crate::protocol::snapshot::{decode_state, encode_state, SnapshotError};
use crate::spawn::SpawnRules;

/// Holds the mutable state of a play session between commands.
pub struct Engine {
    config: GameConfig,
    rules: SpawnRules,
    board: Board,
    rng: SmallRng,
}

impl Engine {
    /// Creates a session with the default configuration and a fresh game.
    pub fn new() -> Self {
        let config = GameConfig::default();
        let rules = config.spawn_rules();
        let mut rng = rng_for(config.seed);
        let board = fresh_board(&config, &rules, &mut rng);
        Engine {
            config,
            rules,
            board,
            rng,
        }
    }

    /// Creates a session from a validated configuration.
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rules = config.spawn_rules();
        let mut rng = rng_for(config.seed);
        let board = fresh_board(&config, &rules, &mut rng);
        Ok(Engine {
            config,
            rules,
            board,
            rng,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Discards the current board and starts a new game from the current
    /// configuration. Returns the new state snapshot.
    pub fn new_game(&mut self) -> String {
        self.board = fresh_board(&self.config, &self.rules, &mut self.rng);
        info!(
            "new {}x{} game for {}",
            self.config.size, self.config.size, self.config.player
        );
        self.get_state()
    }

    /// Plays one move. Moves after game-over are ignored. Returns whether
    /// the board changed.
    pub fn handle_move(&mut self, direction: Direction) -> bool {
        if self.board.game_over() {
            return false;
        }
        let moved = self.board.make_move(direction, &self.rules, &mut self.rng);
        if moved && self.board.game_over() {
            info!("game over with score {}", self.board.score());
        }
        moved
    }

    /// Host-style entry point: decodes a direction token, plays it if it is
    /// recognized, and returns the resulting state snapshot either way.
    pub fn handle_input(&mut self, token: &str) -> String {
        if let Some(direction) = Direction::from_name(token) {
            self.handle_move(direction);
        }
        self.get_state()
    }

    /// Current state snapshot as JSON. Never mutates the session.
    pub fn get_state(&self) -> String {
        encode_state(&self.board)
    }

    /// Applies a configuration option. Changes to size, player and rules
    /// take effect on the next new game; a new seed reseeds immediately.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let previous_seed = self.config.seed;
        if let Err(e) = self.config.set_option(name, value) {
            warn!("rejected option {}: {}", name, e);
            return Err(e);
        }
        self.rules = self.config.spawn_rules();
        if self.config.seed != previous_seed {
            self.rng = rng_for(self.config.seed);
        }
        Ok(())
    }

    /// Replaces the current board with one decoded from a snapshot.
    pub fn restore(&mut self, json: &str) -> Result<(), SnapshotError> {
        match decode_state(json) {
            Ok(board) => {
                self.board = board;
                Ok(())
            }
            Err(e) => {
                warn!("rejected snapshot: {}", e);
                Err(e)
            }
        }
    }

    /// Writes the rendered grid, plus a `game over` line when finished.
    pub fn handle_print<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(render_grid(&self.board).as_bytes())?;
        if self.board.game_over() {
            writeln!(out, "game over score {}", self.board.score())?;
        }
        out.flush()
    }

    /// Writes the JSON state snapshot on one line.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.get_state())?;
        out.flush()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

fn rng_for(seed: u64) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed)
    } else {
        SmallRng::from_entropy()
    }
}

fn fresh_board(config: &GameConfig, rules: &SpawnRules, rng: &mut SmallRng) -> Board {
    Board::new(config.size, rules, rng).with_player(config.player.clone())
}
