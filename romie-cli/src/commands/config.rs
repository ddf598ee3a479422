use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::settings::settings_path;

use crate::AppContext;
use crate::error::CliError;

/// Print the effective settings (file, environment and defaults combined).
pub(crate) fn run_config_show(ctx: &AppContext) -> Result<(), CliError> {
    let rendered = ctx.settings.to_toml_string()?;
    let path = settings_path();
    let status = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };

    log::info!("{}", "romie settings".if_supports_color(Stdout, |t| t.bold()));
    log::info!(
        "  Settings file: {} {}",
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        status
    );
    log::info!(
        "  Catalog:       {}",
        ctx.catalog_path.display().if_supports_color(Stdout, |t| t.cyan())
    );
    log::info!("");
    for line in rendered.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

pub(crate) fn run_config_path() {
    println!("{}", settings_path().display());
}
