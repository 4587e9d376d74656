//! lrurun - replay cache commands against an LruCache

mod command;
mod handler;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lrucache::CacheConfig;
use tracing::info;

use crate::handler::CommandHandler;

/// Capacity-2 walkthrough: 2 is evicted by 3, then 1 by 4
const SCENARIO: &str = "\
put 1 1
put 2 2
get 1
put 3 3
get 2
put 4 4
get 1
get 3
get 4
";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries); overrides the config file
    #[arg(short, long)]
    capacity: Option<usize>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Command script (reads stdin when omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Replay the built-in capacity-2 walkthrough
    #[arg(long, conflicts_with_all = ["script", "capacity", "config"])]
    scenario: bool,

    /// Print final cache statistics as JSON
    #[arg(long)]
    stats: bool,
}

fn resolve_config(args: &Args) -> Result<CacheConfig> {
    if args.scenario {
        return Ok(CacheConfig::new(2));
    }

    let mut config = match &args.config {
        Some(path) => CacheConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => CacheConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }

    Ok(config)
}

fn main() -> Result<()> {
    // Initialize tracing; stdout carries replies
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;

    info!("Starting lrurun v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", config.capacity);

    let cache = config.build().context("invalid cache configuration")?;
    let mut handler = CommandHandler::new(cache);

    let input: Box<dyn BufRead> = if args.scenario {
        Box::new(SCENARIO.as_bytes())
    } else if let Some(path) = &args.script {
        info!("Script: {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("failed to open script {}", path.display()))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(io::stdin().lock())
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let answered = handler.replay(input, &mut out)?;
    info!("Answered {} commands", answered);

    if args.stats {
        writeln!(out, "{}", serde_json::to_string(handler.cache().stats())?)?;
    }

    out.flush()?;
    Ok(())
}
