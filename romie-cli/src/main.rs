//! romie CLI
//!
//! Crawls a Game Boy ROM listing site into a local catalog and downloads
//! the entries that pass the catalog filter.

mod cli_types;
mod commands;
mod error;
mod events;
mod progress;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::Settings;
use romie_scraper::CancellationToken;

use cli_types::{Cli, Commands, ConfigAction};
use error::CliError;

/// State shared by every command.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub catalog_path: PathBuf,
    pub quiet: bool,
    pub cancel: CancellationToken,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // Commands that need no settings.
    match &cli.command {
        Commands::Classify { links } => {
            commands::classify::run_classify(links);
            return Ok(());
        }
        Commands::Config {
            action: ConfigAction::Path,
        } => {
            commands::config::run_config_path();
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load()?;
    let catalog_path = cli.catalog.clone().unwrap_or_else(|| settings.catalog_path());
    let ctx = AppContext {
        settings,
        catalog_path,
        quiet: cli.quiet,
        cancel: CancellationToken::new(),
    };
    watch_ctrl_c(ctx.cancel.clone());

    match cli.command {
        Commands::Sync { expected, download } => {
            commands::sync::run_sync(&ctx, expected, &download).await
        }
        Commands::Crawl { expected, force } => {
            commands::crawl::run_crawl(&ctx, expected, force).await
        }
        Commands::Count => commands::crawl::run_count(&ctx).await,
        Commands::Download(args) => commands::download::run_download(&ctx, &args).await,
        Commands::Stats => commands::stats::run_stats(&ctx),
        Commands::Config { .. } => commands::config::run_config_show(&ctx),
        Commands::Classify { .. } => Ok(()),
    }
}

/// The first Ctrl-C cancels the crawl at the next wait; the process then
/// exits through the normal error path without persisting anything.
fn watch_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, stopping...");
            cancel.cancel();
        }
    });
}

const ROMIE_MODULES: &[&str] = &["romie", "romie_core", "romie_scraper", "romie_download"];

/// Plain messages at info level (they are the command output), prefixed
/// warnings and errors, timestamps in verbose mode. Other crates stay at
/// warn. `RUST_LOG` overrides the levels chosen by the flags.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for module in ROMIE_MODULES {
        builder.filter_module(module, level);
    }
    builder.target(env_logger::Target::Stdout).parse_default_env();
    builder.format(move |buf, record| {
        let prefix = match record.level() {
            log::Level::Error => "error: ",
            log::Level::Warn => "warning: ",
            _ => "",
        };
        if verbose {
            writeln!(
                buf,
                "[{} {:<5} {}] {}{}",
                buf.timestamp_millis(),
                record.level(),
                record.target(),
                prefix,
                record.args()
            )
        } else {
            writeln!(buf, "{}{}", prefix, record.args())
        }
    });
    builder.init();
}
