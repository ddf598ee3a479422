use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::{HardwareVariant, PatchStatus, Quality, Region, catalog};
use romie_download::matches_filter;

use crate::AppContext;
use crate::error::CliError;

pub(crate) fn run_stats(ctx: &AppContext) -> Result<(), CliError> {
    if !catalog::exists(&ctx.catalog_path) {
        log::warn!("No catalog found at {}", ctx.catalog_path.display());
        log::info!("Run 'romie crawl' to create one.");
        return Ok(());
    }
    let catalog = catalog::load(&ctx.catalog_path)?;

    log::info!("{}", "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()));
    log::info!("  File:        {}", ctx.catalog_path.display());
    log::info!("  Entries:     {:>6}", catalog.len());
    log::info!("  Unresolved:  {:>6}", catalog.unresolved_count());
    log::info!(
        "  Selected:    {:>6}",
        catalog.iter().filter(|e| matches_filter(e)).count()
    );

    histogram("Region", Region::ALL, catalog.iter().map(|e| e.region));
    histogram("Quality", Quality::ALL, catalog.iter().map(|e| e.quality));
    histogram("Patch", PatchStatus::ALL, catalog.iter().map(|e| e.patch));
    histogram("Hardware", HardwareVariant::ALL, catalog.iter().map(|e| e.hardware));
    Ok(())
}

/// Print non-zero counts in the tag's declaration order.
fn histogram<T>(label: &str, all: &[T], values: impl Iterator<Item = T>)
where
    T: Copy + Eq + Hash + Display,
{
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    log::info!("");
    log::info!("  {}", label.if_supports_color(Stdout, |t| t.bold()));
    for tag in all {
        if let Some(n) = counts.get(tag) {
            log::info!("    {:<18} {:>6}", tag.to_string(), n);
        }
    }
}
