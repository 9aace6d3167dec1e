//! Weighted random tile spawning.
//!
//! Randomness comes from a [`SpawnSource`], which every `rand::Rng`
//! implements. Tests substitute a scripted source to force a specific
//! cell or weighted outcome.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Tile;
use crate::config::ConfigError;

/// One weighted outcome of a spawn: place exponent `value` with relative
/// probability `weight`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RandomTileRule {
    pub value: Tile,
    pub weight: u32,
}

/// Standard rule set: 90% a displayed "2", 10% a displayed "4".
pub const DEFAULT_RULES: [RandomTileRule; 2] = [
    RandomTileRule { value: 1, weight: 90 },
    RandomTileRule { value: 2, weight: 10 },
];

/// Rule used when a configured rule set has no usable entry.
const FALLBACK_RULE: RandomTileRule = RandomTileRule { value: 1, weight: 1 };

/// Source of the two uniform draws a spawn needs.
pub trait SpawnSource {
    /// Returns an index uniformly distributed in `[0, len)`. `len > 0`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Returns a value uniformly distributed in `[0, total)`. `total > 0`.
    fn roll(&mut self, total: u64) -> u64;
}

impl<R: Rng + ?Sized> SpawnSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn roll(&mut self, total: u64) -> u64 {
        self.gen_range(0..total)
    }
}

/// A validated, non-degenerate set of spawn rules.
///
/// Always holds at least one rule with positive weight and non-zero value,
/// so [`SpawnRules::pick`] never has to handle an empty distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRules {
    rules: Vec<RandomTileRule>,
    total: u64,
}

impl SpawnRules {
    /// Builds a rule set, dropping rules that can never fire (zero weight)
    /// or would place an empty cell (exponent 0).
    ///
    /// If nothing usable remains, falls back to always spawning exponent 1.
    /// Use [`SpawnRules::check`] first to reject such input instead.
    pub fn new(rules: Vec<RandomTileRule>) -> Self {
        let mut usable: Vec<RandomTileRule> = rules
            .into_iter()
            .filter(|r| r.weight > 0 && r.value > 0)
            .collect();
        if usable.is_empty() {
            warn!("spawn rules have no usable entry; falling back to exponent 1");
            usable.push(FALLBACK_RULE);
        }
        let total = usable.iter().map(|r| u64::from(r.weight)).sum();
        SpawnRules {
            rules: usable,
            total,
        }
    }

    /// Strictly validates a raw rule list without sanitizing it.
    pub fn check(rules: &[RandomTileRule]) -> Result<(), ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyRules);
        }
        if let Some(r) = rules.iter().find(|r| r.value == 0) {
            return Err(ConfigError::ZeroExponent { weight: r.weight });
        }
        if rules.iter().all(|r| r.weight == 0) {
            return Err(ConfigError::ZeroWeights);
        }
        Ok(())
    }

    pub fn rules(&self) -> &[RandomTileRule] {
        &self.rules
    }

    pub fn total_weight(&self) -> u64 {
        self.total
    }

    /// Draws one exponent by cumulative weight: the first rule whose running
    /// weight exceeds a uniform draw in `[0, total)` wins.
    pub fn pick<S: SpawnSource + ?Sized>(&self, source: &mut S) -> Tile {
        let draw = source.roll(self.total);
        let mut cursor = 0u64;
        for rule in &self.rules {
            cursor += u64::from(rule.weight);
            if draw < cursor {
                return rule.value;
            }
        }
        // Unreachable for a well-behaved source; a draw past the total gets
        // the last rule.
        self.rules.last().map_or(FALLBACK_RULE.value, |r| r.value)
    }
}

impl Default for SpawnRules {
    fn default() -> Self {
        SpawnRules::new(DEFAULT_RULES.to_vec())
    }
}

/// Places one weighted tile into a uniformly chosen empty cell of `tiles`.
///
/// Returns the index that was filled, or `None` if there was no empty cell
/// (in which case `tiles` is untouched).
pub fn spawn_into<S: SpawnSource + ?Sized>(
    tiles: &mut [Tile],
    rules: &SpawnRules,
    source: &mut S,
) -> Option<usize> {
    let empty: Vec<usize> = tiles
        .iter()
        .enumerate()
        .filter(|(_, &t)| t == 0)
        .map(|(i, _)| i)
        .collect();
    if empty.is_empty() {
        return None;
    }
    let idx = empty[source.pick_index(empty.len())];
    tiles[idx] = rules.pick(source);
    Some(idx)
}
