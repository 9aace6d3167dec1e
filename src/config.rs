//! Game configuration.
//!
//! A plain struct with defaults for standard play, adjusted either from
//! command-line flags or through `setoption name <id> value <x>` commands.
//! Validation happens here, once, so the engine itself never sees a
//! degenerate setup.

use thiserror::Error;

use crate::board::DEFAULT_PLAYER;
use crate::spawn::{RandomTileRule, SpawnRules, DEFAULT_RULES};

/// Standard grid side length.
pub const DEFAULT_SIZE: usize = 4;

/// Largest accepted grid side length.
pub const MAX_SIZE: usize = 32;

/// Errors from building or updating a [`GameConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be positive")]
    ZeroSize,

    #[error("board size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },

    #[error("spawn rule set is empty")]
    EmptyRules,

    #[error("spawn rule weights are all zero")]
    ZeroWeights,

    #[error("spawn rule with weight {weight} has exponent 0")]
    ZeroExponent { weight: u32 },

    #[error("malformed spawn rule '{0}', expected <exponent>:<weight>")]
    MalformedRule(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },
}

/// Settings for starting a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Grid side length.
    pub size: usize,
    /// Weighted spawn outcomes.
    pub rules: Vec<RandomTileRule>,
    /// Opaque player label carried into state snapshots.
    pub player: String,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            rules: DEFAULT_RULES.to_vec(),
            player: DEFAULT_PLAYER.to_string(),
            seed: 0,
        }
    }
}

impl GameConfig {
    /// Rejects configurations the engine cannot play sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if self.size > MAX_SIZE {
            return Err(ConfigError::SizeTooLarge {
                size: self.size,
                max: MAX_SIZE,
            });
        }
        SpawnRules::check(&self.rules)
    }

    /// The spawn rule set for boards built from this configuration.
    pub fn spawn_rules(&self) -> SpawnRules {
        SpawnRules::new(self.rules.clone())
    }

    /// Applies a named option. Names are case-insensitive: `Size`, `Player`,
    /// `Seed`, `SpawnRules`. The configuration is left unchanged on error.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let value = value.unwrap_or("").trim();
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        let mut next = self.clone();
        match name.to_ascii_lowercase().as_str() {
            "size" => next.size = value.parse().map_err(|_| invalid())?,
            "player" => next.player = value.to_string(),
            "seed" => next.seed = value.parse().map_err(|_| invalid())?,
            "spawnrules" => next.rules = parse_rules(value)?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Parses a rule list such as `"1:90,2:10"` (exponent:weight pairs).
pub fn parse_rules(s: &str) -> Result<Vec<RandomTileRule>, ConfigError> {
    let mut rules = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (value, weight) = part
            .split_once(':')
            .ok_or_else(|| ConfigError::MalformedRule(part.to_string()))?;
        let value = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::MalformedRule(part.to_string()))?;
        let weight = weight
            .trim()
            .parse()
            .map_err(|_| ConfigError::MalformedRule(part.to_string()))?;
        rules.push(RandomTileRule { value, weight });
    }
    Ok(rules)
}

/// Formats rules in the notation accepted by [`parse_rules`].
pub fn format_rules(rules: &[RandomTileRule]) -> String {
    rules
        .iter()
        .map(|r| format!("{}:{}", r.value, r.weight))
        .collect::<Vec<_>>()
        .join(",")
}
