//! Headless Cheza runner (default binary).
//!
//! Drives the rules engine with a seeded random input script at a fixed
//! timestep. Effects go to stdout as JSON lines with `--verbose`; the final
//! snapshot is always printed as pretty JSON, and `--show-board` adds a
//! colored picture of the final board.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use cheza::core::{Board, GameState, RulesConfig};
use cheza::types::{Effect, GameInput, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "cheza-headless", about = "Run a scripted Cheza game without a display")]
struct Args {
    /// RNG seed for both the piece bag and the input script
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of ticks to simulate (stops early on game over)
    #[arg(long, default_value_t = 3600)]
    ticks: u32,

    /// Milliseconds per tick
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u32,

    /// JSON rules file; any omitted field keeps its default
    #[arg(long, value_name = "json")]
    config: Option<PathBuf>,

    /// Print every effect as a JSON line
    #[arg(long)]
    verbose: bool,

    /// Print the final board with truecolor piece letters
    #[arg(long)]
    show_board: bool,
}

/// Random input script: roughly one action every eight ticks.
fn scripted_inputs(rng: &mut Pcg32) -> &'static [GameInput] {
    match rng.random_range(0..64u8) {
        0 => &[GameInput::MoveLeft, GameInput::ReleaseLeft],
        1 => &[GameInput::MoveRight, GameInput::ReleaseRight],
        2 => &[GameInput::RotateCw],
        3 => &[GameInput::RotateCcw],
        4 => &[GameInput::Hold],
        5 => &[GameInput::SoftDropOn],
        6 => &[GameInput::SoftDropOff],
        7 => &[GameInput::HardDrop],
        _ => &[],
    }
}

fn write_effects(out: &mut impl Write, tick: u32, effects: &[Effect]) -> Result<()> {
    for effect in effects {
        let line = serde_json::json!({ "tick": tick, "event": effect });
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// One line per row: locked cells as their piece letter in the piece color.
fn write_board(out: &mut impl Write, board: &Board) -> Result<()> {
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            match board.get(x, y).flatten() {
                Some(kind) => {
                    let (r, g, b) = kind.rgb();
                    write!(out, "\x1b[38;2;{r};{g};{b}m{}\x1b[0m", kind.as_str())?;
                }
                None => write!(out, ".")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => RulesConfig::from_json_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RulesConfig::default(),
    };

    let mut game = GameState::with_config(config, args.seed).context("invalid rules")?;
    let mut script = Pcg32::seed_from_u64(args.seed.rotate_left(17));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for tick in 0..args.ticks {
        for &input in scripted_inputs(&mut script) {
            game.apply_input(input);
        }

        let effects = game.tick(args.tick_ms);
        if args.verbose {
            write_effects(&mut out, tick, &effects)?;
        }
        if game.game_over() {
            break;
        }
    }

    let snapshot =
        serde_json::to_string_pretty(&game.snapshot()).context("failed to encode snapshot")?;
    writeln!(out, "{snapshot}")?;
    if args.show_board {
        write_board(&mut out, game.board())?;
    }
    Ok(())
}
