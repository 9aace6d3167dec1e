//! Batch game simulation.
//!
//! Plays complete games with a uniformly random move policy. Useful for
//! soak-testing the engine and for measuring the spawn distribution and
//! score spread empirically. Games run concurrently on a rayon pool when
//! more than one thread is configured.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::{Board, Direction, Tile, ALL_DIRECTIONS};
use crate::config::GameConfig;

/// Configuration for a batch of simulated games.
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Board size, spawn rules and base seed (0 = use entropy).
    pub game: GameConfig,
    /// Number of games to play.
    pub num_games: usize,
    /// Safety cap on moves per game.
    pub max_moves: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            game: GameConfig::default(),
            num_games: 100,
            max_moves: 100_000,
            threads: 4,
        }
    }
}

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub score: u64,
    pub max_tile: Tile,
    pub moves: usize,
    pub game_over: bool,
    pub tiles: Vec<Tile>,
}

/// Aggregate statistics over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub mean_score: f64,
    pub best_score: u64,
    /// `max_tile_counts[e]` is the number of games whose best tile was `e`.
    pub max_tile_counts: Vec<usize>,
}

/// Plays one game to completion (or the move cap) with a random policy.
///
/// Each turn shuffles the four directions and plays the first that changes
/// the board; when none does, the game is over.
pub fn play_game(config: &AutoplayConfig, game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let rules = config.game.spawn_rules();
    let mut board =
        Board::new(config.game.size, &rules, rng).with_player(config.game.player.clone());
    let mut moves = 0usize;
    let mut order: [Direction; 4] = ALL_DIRECTIONS;

    while !board.game_over() && moves < config.max_moves {
        order.shuffle(rng);
        let mut moved = false;
        for &dir in &order {
            if board.make_move(dir, &rules, rng) {
                moved = true;
                break;
            }
        }
        if !moved {
            break;
        }
        moves += 1;
    }

    GameRecord {
        game_id,
        score: board.score(),
        max_tile: board.max_tile(),
        moves,
        game_over: board.game_over(),
        tiles: board.tiles().to_vec(),
    }
}

/// Runs a batch, returning records ordered by game id.
pub fn run_autoplay(config: &AutoplayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_autoplay_with_callback(config, |game| games.push(game));
    games.sort_by_key(|g| g.game_id);
    games
}

/// Runs a batch, calling `on_game` with each completed record as it
/// finishes. Completion order is unspecified when running in parallel.
pub fn run_autoplay_with_callback<F>(config: &AutoplayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    let start = Instant::now();
    if config.threads > 1 {
        run_parallel(config, on_game);
    } else {
        run_sequential(config, on_game);
    }
    info!(
        "played {} games in {:.2}s",
        config.num_games,
        start.elapsed().as_secs_f64()
    );
}

/// Per-game generator: deterministic from `seed + game_id` when seeded.
fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn run_sequential<F>(config: &AutoplayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = game_rng(config.game.seed, i);
        let game = play_game(config, i, &mut rng);
        debug!(
            "game {}/{}: score {} after {} moves",
            i + 1,
            config.num_games,
            game.score,
            game.moves
        );
        on_game(game);
    }
}

/// Plays games on a rayon pool sized to `config.threads`, handing finished
/// records back to the calling thread over a channel.
fn run_parallel<F>(config: &AutoplayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            warn!("failed to build thread pool ({}); running sequentially", e);
            return run_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = game_rng(config.game.seed, i);
                        let game = play_game(config, i, &mut rng);
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        debug!(
                            "game {}/{}: score {} after {} moves",
                            n, config.num_games, game.score, game.moves
                        );
                        let _ = tx.send(game);
                    });
            });
        });

        for game in rx {
            on_game(game);
        }
    });
}

/// Summarizes a batch of records.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let best_tile = games.iter().map(|g| g.max_tile).max().unwrap_or(0);
    let mut max_tile_counts = vec![0usize; usize::from(best_tile) + 1];
    for g in games {
        max_tile_counts[usize::from(g.max_tile)] += 1;
    }
    let total: f64 = games.iter().map(|g| g.score as f64).sum();
    Summary {
        games: games.len(),
        mean_score: if games.is_empty() {
            0.0
        } else {
            total / games.len() as f64
        },
        best_score: games.iter().map(|g| g.score).max().unwrap_or(0),
        max_tile_counts,
    }
}

/// Writes records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        write_game_json(game, out)?;
    }
    out.flush()
}

/// Writes a single record as one JSON line.
pub fn write_game_json<W: Write>(game: &GameRecord, out: &mut W) -> std::io::Result<()> {
    serde_json::to_writer(&mut *out, game)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::score_of;

    fn small_config(threads: usize) -> AutoplayConfig {
        AutoplayConfig {
            game: GameConfig {
                seed: 42,
                ..GameConfig::default()
            },
            num_games: 6,
            max_moves: 10_000,
            threads,
        }
    }

    #[test]
    fn random_game_runs_to_completion() {
        let config = small_config(1);
        let mut rng = SmallRng::seed_from_u64(1);
        let game = play_game(&config, 0, &mut rng);
        assert!(game.game_over);
        assert!(game.moves > 0);
        assert_eq!(game.score, score_of(&game.tiles));
        assert!(game.tiles.iter().all(|&t| t != 0));
        assert!(game.max_tile >= 3);
    }

    #[test]
    fn move_cap_stops_game() {
        let mut config = small_config(1);
        config.max_moves = 5;
        let mut rng = SmallRng::seed_from_u64(2);
        let game = play_game(&config, 0, &mut rng);
        assert_eq!(game.moves, 5);
        assert!(!game.game_over);
    }

    #[test]
    fn sequential_and_parallel_agree_when_seeded() {
        let seq = run_autoplay(&small_config(1));
        let par = run_autoplay(&small_config(3));
        assert_eq!(seq.len(), 6);
        assert_eq!(seq, par);
        for (i, g) in seq.iter().enumerate() {
            assert_eq!(g.game_id, i);
        }
    }

    #[test]
    fn summary_aggregates() {
        let games = vec![
            GameRecord {
                game_id: 0,
                score: 100,
                max_tile: 5,
                moves: 10,
                game_over: true,
                tiles: Vec::new(),
            },
            GameRecord {
                game_id: 1,
                score: 300,
                max_tile: 7,
                moves: 30,
                game_over: true,
                tiles: Vec::new(),
            },
        ];
        let summary = summarize(&games);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.mean_score, 200.0);
        assert_eq!(summary.best_score, 300);
        assert_eq!(summary.max_tile_counts, vec![0, 0, 0, 0, 0, 1, 0, 1]);
        assert_eq!(summarize(&[]).mean_score, 0.0);
    }

    #[test]
    fn jsonl_has_one_line_per_game() {
        let games = run_autoplay(&small_config(1));
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), games.len());
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["game_id"], 0);
        assert_eq!(first["score"], games[0].score);
    }
}
