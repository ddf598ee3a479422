use romie_core::catalog;

use crate::AppContext;
use crate::cli_types::DownloadArgs;
use crate::commands::{crawl, download};
use crate::error::CliError;

/// Reuse the stored catalog if there is one, otherwise crawl it, then
/// download everything that passes the filter.
pub(crate) async fn run_sync(
    ctx: &AppContext,
    expected: Option<usize>,
    args: &DownloadArgs,
) -> Result<(), CliError> {
    let catalog = if catalog::exists(&ctx.catalog_path) {
        log::info!("Using catalog at {}", ctx.catalog_path.display());
        catalog::load(&ctx.catalog_path)?
    } else {
        crawl::crawl_catalog(ctx, expected).await?
    };
    download::download_from(ctx, &catalog, args).await
}
