mod script;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use edit_history_config::AppConfig;
use edit_history_engine::HistoryConfig;

use script::{load_script, Replay};

/// Replays an editing script against an undo/redo session.
#[derive(Parser, Debug)]
#[command(name = "edit-history", version, about)]
struct Cli {
    /// JSON script of editing steps.
    script: PathBuf,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the merge window from the config, in milliseconds.
    #[arg(long = "merge-window-ms")]
    merge_window_ms: Option<u64>,

    /// Print only the final state.
    #[arg(long, short)]
    quiet: bool,

    /// Print step reports as JSON lines.
    #[arg(long, conflicts_with = "quiet")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    // The log filter lives in the config, so config warnings go through a
    // temporary stderr subscriber.
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let app_config =
        tracing::subscriber::with_default(bootstrap, || AppConfig::load_or_create(&config_path));

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&app_config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(config = %config_path.display(), "Starting edit-history");

    let mut history_config = HistoryConfig::from(&app_config);
    if let Some(ms) = cli.merge_window_ms {
        history_config.merge_window = Duration::from_millis(ms);
    }

    let steps = load_script(&cli.script)?;
    tracing::info!(steps = steps.len(), script = %cli.script.display(), "Loaded script");

    let mut replay = Replay::new(history_config);
    let reports = replay.run(&steps)?;
    for report in &reports {
        if cli.json {
            println!("{}", serde_json::to_string(report)?);
        } else if !cli.quiet {
            println!("{report}");
        }
    }

    if cli.quiet {
        let session = replay.session();
        println!("{}", session.view().text());
        println!(
            "undo={} redo={} dirty={}",
            session.can_undo(),
            session.can_redo(),
            session.is_dirty()
        );
    }

    Ok(())
}
