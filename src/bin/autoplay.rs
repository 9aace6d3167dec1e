//! Batch simulation CLI.
//!
//! Plays games with a random move policy and outputs one JSON record per
//! game (JSONL).
//!
//! Usage:
//!   cargo run --release --bin autoplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of games to play (default: 100)
//!   --size N        Board side length (default: 4)
//!   --rules SPEC    Spawn rules as exponent:weight pairs (default: 1:90,2:10)
//!   --max-moves N   Move cap per game (default: 100000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

use env_logger::Env;
use log::{error, info};

use tilemerge::autoplay::{self, AutoplayConfig};
use tilemerge::config::parse_rules;

fn print_usage() {
    eprintln!("Usage: autoplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N       Number of games to play (default: 100)");
    eprintln!("  --size N        Board side length (default: 4)");
    eprintln!("  --rules SPEC    Spawn rules as exponent:weight pairs (default: 1:90,2:10)");
    eprintln!("  --max-moves N   Move cap per game (default: 100000)");
    eprintln!("  --threads N     Number of parallel threads (default: 4)");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE   Output file path (default: stdout)");
}

/// Parses flags into a batch configuration and optional output path.
fn parse_args(args: &[String]) -> Result<(AutoplayConfig, Option<String>), String> {
    let mut config = AutoplayConfig::default();
    let mut output_path = None;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args
            .get(i + 1)
            .map(String::as_str)
            .ok_or_else(|| format!("missing value for {}", flag));
        let invalid = |v: &str| format!("invalid {} value: {}", flag, v);
        match flag {
            "--games" => {
                let v = value?;
                config.num_games = v.parse().map_err(|_| invalid(v))?;
            }
            "--size" => {
                let v = value?;
                config.game.size = v.parse().map_err(|_| invalid(v))?;
            }
            "--rules" => {
                config.game.rules = parse_rules(value?).map_err(|e| e.to_string())?;
            }
            "--max-moves" => {
                let v = value?;
                config.max_moves = v.parse().map_err(|_| invalid(v))?;
            }
            "--threads" => {
                let v = value?;
                config.threads = v.parse().map_err(|_| invalid(v))?;
            }
            "--seed" => {
                let v = value?;
                config.game.seed = v.parse().map_err(|_| invalid(v))?;
            }
            "--output" => {
                output_path = Some(value?.to_string());
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 2;
    }

    config.game.validate().map_err(|e| e.to_string())?;
    Ok((config, output_path))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let (config, output_path) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            print_usage();
            process::exit(1);
        }
    };

    info!(
        "playing {} games on {}x{} boards with {} threads",
        config.num_games, config.game.size, config.game.size, config.threads
    );

    let games = autoplay::run_autoplay(&config);

    let result = match &output_path {
        Some(path) => File::create(path).and_then(|f| {
            let mut w = BufWriter::new(f);
            autoplay::write_jsonl(&games, &mut w)
        }),
        None => {
            let stdout = io::stdout();
            let mut w = BufWriter::new(stdout.lock());
            autoplay::write_jsonl(&games, &mut w).and_then(|_| w.flush())
        }
    };
    if let Err(e) = result {
        error!("failed to write output: {}", e);
        process::exit(1);
    }

    let summary = autoplay::summarize(&games);
    info!(
        "{} games: mean score {:.1}, best score {}",
        summary.games, summary.mean_score, summary.best_score
    );
    for (exponent, &count) in summary.max_tile_counts.iter().enumerate() {
        if count > 0 {
            let value = 1u64.checked_shl(exponent as u32).unwrap_or(u64::MAX);
            info!("  best tile {:>6}: {} games", value, count);
        }
    }
}
