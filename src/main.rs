//! Tilemerge -- an interactive sliding-tile merge game.
//!
//! Reads commands from stdin and writes the board to stdout after every
//! move. Usage:
//!   tilemerge [--size N] [--player NAME] [--seed N] [--rules 1:90,2:10]

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use env_logger::Env;
use log::error;

use tilemerge::config::{parse_rules, GameConfig};
use tilemerge::engine::Engine;
use tilemerge::protocol::parser::{parse_command, Command};

fn print_usage() {
    eprintln!("Usage: tilemerge [--size N] [--player NAME] [--seed N] [--rules SPEC]");
    eprintln!("Commands: w/a/s/d or up/left/down/right, newgame, state,");
    eprintln!("          setoption name <id> value <x>, quit");
}

/// Parses command-line flags into a game configuration.
fn parse_args(args: &[String]) -> Result<GameConfig, String> {
    let mut config = GameConfig::default();
    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = || {
            args.get(i + 1)
                .map(String::as_str)
                .ok_or_else(|| format!("missing value for {}", flag))
        };
        match flag {
            "--size" => {
                let v = value()?;
                config.size = v.parse().map_err(|_| format!("invalid --size value: {}", v))?;
                i += 1;
            }
            "--player" => {
                config.player = value()?.to_string();
                i += 1;
            }
            "--seed" => {
                let v = value()?;
                config.seed = v.parse().map_err(|_| format!("invalid --seed value: {}", v))?;
                i += 1;
            }
            "--rules" => {
                config.rules = parse_rules(value()?).map_err(|e| e.to_string())?;
                i += 1;
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(config)
}

/// Runs the interactive loop, reading commands from stdin until `quit` or
/// end of input.
fn run(mut engine: Engine) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    writeln!(out, "GAME START")?;
    engine.handle_print(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Move(direction) => {
                engine.handle_move(direction);
                engine.handle_print(&mut out)?;
            }
            Command::NewGame => {
                engine.new_game();
                engine.handle_print(&mut out)?;
            }
            Command::State => {
                engine.handle_state(&mut out)?;
            }
            Command::SetOption { name, value } => {
                // Rejections are logged by the engine; the session continues.
                let _ = engine.set_option(&name, value.as_deref());
            }
            Command::Quit => break,
        }
    }
    out.flush()
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let config = match parse_args(&args) {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            print_usage();
            process::exit(2);
        }
    };

    let engine = match Engine::with_config(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("invalid configuration: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(engine) {
        error!("i/o error: {}", e);
        process::exit(1);
    }
}
