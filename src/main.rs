//! randpick CLI: draw students from a class roster.
//!
//! Either name a class from a TOML config, or describe an ad-hoc roster:
//!
//! ```text
//! randpick --config classes.toml --class six -n 5
//! randpick --size 30 --names names.txt --weights weights.txt --seed 7
//! ```
//!
//! Set `RUST_LOG=debug` to see roster loading and draw details.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use randpick::{Config, Roster, DEFAULT_WEIGHT};

#[derive(Parser)]
#[command(
    name = "randpick",
    about = "Weighted random call: draw distinct students from a roster"
)]
struct Cli {
    /// TOML config describing the classes.
    #[arg(long, requires = "class", conflicts_with = "size")]
    config: Option<PathBuf>,

    /// Class to draw from (with --config).
    #[arg(long)]
    class: Option<String>,

    /// Ad-hoc roster size; students are numbered 1..=size.
    #[arg(long)]
    size: Option<u32>,

    /// Names file for an ad-hoc roster, one name per line.
    #[arg(long, requires = "size")]
    names: Option<PathBuf>,

    /// Weights file for an ad-hoc roster, `ID,weight` per line.
    #[arg(long, requires = "size")]
    weights: Option<PathBuf>,

    /// Number of distinct students to draw.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,

    /// Seed for reproducible draws. Overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Output separator. Overrides the config's separator.
    #[arg(long)]
    separator: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (mut roster, separator) = match (&cli.config, cli.size) {
        (Some(path), _) => {
            let mut config = Config::load(path)
                .with_context(|| format!("loading {}", path.display()))?;
            if cli.seed.is_some() {
                config.seed = cli.seed;
            }
            let class = cli.class.as_deref().unwrap_or_default();
            let roster = config.build_roster(class)?;
            (roster, config.separator)
        }
        (None, Some(size)) => {
            let rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut roster = Roster::with_rng(size, DEFAULT_WEIGHT, rng)?;
            if let Some(names) = &cli.names {
                roster.load_names(names)?;
            }
            if let Some(weights) = &cli.weights {
                roster.load_weights(weights)?;
            }
            (roster, ",".to_string())
        }
        (None, None) => bail!("either --config with --class, or --size, is required"),
    };

    let separator = cli.separator.unwrap_or(separator);
    debug!("drawing {} of {} students", cli.count, roster.size());
    let labels = roster.draw_labels(cli.count)?;
    println!("{}", labels.join(&separator));
    Ok(())
}
