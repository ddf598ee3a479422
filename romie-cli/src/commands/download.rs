use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::{Catalog, catalog};
use romie_download::{
    DownloadCoordinator, DownloadOptions, DownloadOutcome, DownloadReport, plan_downloads,
};

use crate::AppContext;
use crate::cli_types::DownloadArgs;
use crate::error::CliError;
use crate::events::run_with_events;
use crate::progress::DownloadProgress;

pub(crate) async fn run_download(ctx: &AppContext, args: &DownloadArgs) -> Result<(), CliError> {
    if !catalog::exists(&ctx.catalog_path) {
        return Err(CliError::other(format!(
            "No catalog at {} (run 'romie crawl' first)",
            ctx.catalog_path.display()
        )));
    }
    let catalog = catalog::load(&ctx.catalog_path)?;
    download_from(ctx, &catalog, args).await
}

/// Plan and run the downloads for `catalog`. Individual failures are
/// reported but do not fail the command.
pub(crate) async fn download_from(
    ctx: &AppContext,
    catalog: &Catalog,
    args: &DownloadArgs,
) -> Result<(), CliError> {
    let output = match &args.output {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };
    let tasks = plan_downloads(catalog, &output);
    let selected = tasks.len() / 2;

    log::info!(
        "{} of {} catalog entries match the filter",
        selected.if_supports_color(Stdout, |t| t.bold()),
        catalog.len()
    );
    if tasks.is_empty() {
        return Ok(());
    }
    log::info!(
        "  Output: {}",
        output.display().if_supports_color(Stdout, |t| t.dimmed())
    );
    if args.dry_run {
        log::info!(
            "  {}",
            "Dry run: no files will be downloaded".if_supports_color(Stdout, |t| t.dimmed())
        );
    }

    let options = DownloadOptions {
        concurrency: args.concurrency.unwrap_or(ctx.settings.download.concurrency),
        force: args.force,
        dry_run: args.dry_run,
    };
    let coordinator =
        DownloadCoordinator::new(&ctx.settings.download, &ctx.settings.site.user_agent, options)?;

    let mut progress = DownloadProgress::new(ctx.quiet || args.dry_run);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let run = async {
        let tx = tx;
        coordinator.run(tasks, &tx).await
    };
    let report = run_with_events(run, rx, |e| progress.handle(e)).await;
    progress.finish();

    if args.dry_run {
        print_plan(&report);
    } else {
        print_summary(&report);
    }

    if let Some(path) = &args.report {
        write_report(&report, path);
    }
    Ok(())
}

fn print_plan(report: &DownloadReport) {
    for result in report.results() {
        log::info!(
            "  {} {} ({}) -> {}",
            "~".if_supports_color(Stdout, |t| t.cyan()),
            result.task.title,
            result.task.kind,
            result.task.dest.display().if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

fn print_summary(report: &DownloadReport) {
    let summary = report.summary();

    log::info!("{}", "Summary:".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  {} {} files downloaded ({} bytes)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        summary.downloaded,
        summary.bytes
    );
    if summary.skipped > 0 {
        log::info!(
            "  {} {} files already present",
            "-".if_supports_color(Stdout, |t| t.dimmed()),
            summary.skipped
        );
    }
    if summary.failed > 0 {
        log::warn!(
            "  {} {} downloads failed",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            summary.failed
        );
        for failure in report.failures() {
            if let DownloadOutcome::Failed { error } = &failure.outcome {
                log::warn!("    {} ({}): {}", failure.task.title, failure.task.kind, error);
            }
        }
    }
}

fn write_report(report: &DownloadReport, path: &Path) {
    match report.write_to_file(path) {
        Ok(()) => log::info!(
            "  Download log: {}",
            path.display().if_supports_color(Stdout, |t| t.dimmed())
        ),
        Err(e) => log::warn!("Failed to write download log {}: {}", path.display(), e),
    }
}
