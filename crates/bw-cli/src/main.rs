//! Terminal front end for Blackwood.

mod play;
mod render;

use std::path::PathBuf;
use std::process;

use bw_fiction::Difficulty;
use clap::Parser;
use rand::Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "blackwood",
    about = "Blackwood: escape the haunted manor before your mind gives out",
    version
)]
struct Cli {
    /// RNG seed for a reproducible game (default: random)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Difficulty: story, normal or hard (default: ask)
    #[arg(short, long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Save slot file
    #[arg(long, default_value = "save.json")]
    save: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log engine events to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::parse(s)
        .ok_or_else(|| format!("unknown difficulty '{s}' (expected story, normal or hard)"))
}

/// Logs go to stderr so they never interleave with the story on stdout.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let options = play::Options {
        seed: cli
            .seed
            .unwrap_or_else(|| rand::rng().random_range(1000..=9999)),
        difficulty: cli.difficulty,
        save: cli.save,
    };

    if let Err(e) = play::run(options) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
