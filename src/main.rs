use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use labnotes::{demo, render, Feed};
use labnotes_core::{config::Config, Pipeline};
use labnotes_sources::{JsonFileSource, MemorySource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Interactive terminal viewer.
    Tui,
    /// Plain-text table on stdout.
    Table,
    /// JSON array on stdout.
    Json,
}

#[derive(Parser)]
#[command(
    name = "labnotes",
    about = "Merge legacy and modern specimen notebook entries into one timeline"
)]
struct Cli {
    /// JSON export of legacy audit-log records.
    #[arg(long, value_name = "FILE")]
    legacy: Option<PathBuf>,

    /// JSON export of modern attachment rows.
    #[arg(long, value_name = "FILE")]
    modern: Option<PathBuf>,

    /// Single JSON export of `kind`-tagged records from both sources.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["legacy", "modern", "demo"])]
    mixed: Option<PathBuf>,

    /// Only show entries for this specimen number.
    #[arg(long)]
    specimen: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Tui)]
    format: Format,

    /// Config file to use instead of ~/.config/labnotes/config.toml.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Use built-in sample records instead of export files.
    #[arg(long, conflicts_with_all = ["legacy", "modern"])]
    demo: bool,

    /// Write debug logs to /tmp/labnotes-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/labnotes-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("labnotes debug log started — tail -f /tmp/labnotes-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "config: falling back to defaults");
            Config::defaults()
        }),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let pipeline = Pipeline::from_config(&config);
    let feed = feed(&cli);
    let specimen = cli.specimen.clone();

    match cli.format {
        Format::Tui => labnotes_tui::run(
            move || runtime.block_on(feed.snapshot(specimen.as_deref(), &pipeline)),
            config,
        ),
        Format::Table | Format::Json => {
            let snapshot = runtime.block_on(feed.snapshot(specimen.as_deref(), &pipeline))?;
            for note in &snapshot.degraded {
                eprintln!("warning: {note}");
            }
            if cli.format == Format::Table {
                print!("{}", render::render_table(&snapshot.timeline));
            } else {
                println!("{}", render::render_json(&snapshot.timeline)?);
            }
            Ok(())
        }
    }
}

fn feed(cli: &Cli) -> Feed {
    if let Some(path) = &cli.mixed {
        return Feed::Mixed(path.clone());
    }
    if cli.demo {
        let (legacy, modern) = demo::records();
        return Feed::Sources(Box::new(MemorySource::new(legacy, modern)));
    }
    Feed::Sources(Box::new(JsonFileSource::new(cli.legacy.clone(), cli.modern.clone())))
}
