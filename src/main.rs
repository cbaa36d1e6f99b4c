use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use symkit::session::{Session, SessionScript};
use symkit::{init_logging, SystemClipboard, BUILD_DATE, VERSION};
use symkit_editor::clipboard::{ClipboardTransport, InMemoryClipboard};
use symkit_editor::Symbol;
use symkit_settings::Config;

/// Replay a recorded symbol editor session and print the result
#[derive(Debug, Parser)]
#[command(name = "symkit", version)]
struct Cli {
    /// Session script (JSON)
    script: PathBuf,

    /// Start from this symbol (JSON) instead of the script's symbol
    #[arg(long)]
    symbol: Option<PathBuf>,

    /// Configuration file (JSON or TOML), defaults to the user config
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the desktop clipboard instead of a private one
    #[arg(long = "system-clipboard")]
    system_clipboard: bool,

    /// Write the resulting symbol here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Print the full replay report instead of the symbol
    #[arg(long)]
    report: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();
    tracing::info!(version = VERSION, build_date = BUILD_DATE, "symkit starting");

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no config directory, using defaults");
                Config::default()
            }
        },
    };

    let script = SessionScript::load(&cli.script)?;
    let symbol = match &cli.symbol {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read symbol {}", path.display()))?;
            Symbol::from_json(&json)
                .with_context(|| format!("Invalid symbol {}", path.display()))?
        }
        None => script.symbol.clone().unwrap_or_else(|| Symbol::new("Untitled")),
    };

    let clipboard: Box<dyn ClipboardTransport> = if cli.system_clipboard {
        Box::new(SystemClipboard::new().context("System clipboard unavailable")?)
    } else {
        Box::new(InMemoryClipboard::new())
    };

    let mut session = Session::new(symbol, &config, clipboard);
    session.run(&script.events)?;
    let report = session.report();
    for error in &report.errors {
        tracing::warn!(%error, "editor reported an error");
    }
    tracing::info!(
        handled = report.handled,
        ignored = report.ignored,
        undo_steps = report.undo_steps,
        "replay finished"
    );

    let output = if cli.report {
        serde_json::to_string_pretty(&report)?
    } else {
        report.symbol.to_json()?
    };
    match &cli.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{output}"),
    }
    Ok(())
}
