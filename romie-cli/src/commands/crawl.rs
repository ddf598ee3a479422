use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::{Catalog, catalog};
use romie_scraper::{DetailResolver, SiteClient, WebDriverSession};

use crate::AppContext;
use crate::error::CliError;
use crate::events::run_with_events;
use crate::progress::CrawlProgress;

pub(crate) async fn run_count(ctx: &AppContext) -> Result<(), CliError> {
    let client = SiteClient::new(&ctx.settings.site.user_agent)?;
    let total = count_listings(ctx, &client).await?;
    log::info!(
        "{} {} listings under {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        total,
        ctx.settings.site.root_url.if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

pub(crate) async fn run_crawl(
    ctx: &AppContext,
    expected: Option<usize>,
    force: bool,
) -> Result<(), CliError> {
    if catalog::exists(&ctx.catalog_path) && !force {
        return Err(CliError::other(format!(
            "A catalog already exists at {} (use --force to replace it)",
            ctx.catalog_path.display()
        )));
    }
    crawl_catalog(ctx, expected).await?;
    Ok(())
}

/// Count (unless the expected total is known), crawl, verify and persist.
pub(crate) async fn crawl_catalog(
    ctx: &AppContext,
    expected: Option<usize>,
) -> Result<Catalog, CliError> {
    let site = &ctx.settings.site;
    let client = SiteClient::new(&site.user_agent)?;

    let expected = match expected.or(ctx.settings.crawl.expected_count) {
        Some(n) => n,
        None => count_listings(ctx, &client).await?,
    };
    log::info!(
        "Crawling {} ({} entries expected)",
        site.root_url.if_supports_color(Stdout, |t| t.cyan()),
        expected
    );

    let session = WebDriverSession::connect(&ctx.settings.browser).await?;
    let mut resolver =
        DetailResolver::from_settings(session, site, &ctx.settings.browser, ctx.cancel.clone());

    let mut progress = CrawlProgress::new(ctx.quiet);
    progress.expect_entries(expected);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let crawl = async {
        let tx = tx;
        romie_scraper::crawl_and_persist(
            &client,
            &mut resolver,
            site,
            expected,
            &ctx.catalog_path,
            &tx,
        )
        .await
    };
    let result = run_with_events(crawl, rx, |e| progress.handle(e)).await;
    progress.finish();

    if let Err(e) = resolver.into_session().close().await {
        log::debug!("Closing the browser session failed: {}", e);
    }

    let catalog = result?;
    let unresolved = catalog.unresolved_count();
    log::info!(
        "{} Wrote {} entries to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.len(),
        ctx.catalog_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if unresolved > 0 {
        log::warn!(
            "{} {} entries have no download link",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            unresolved
        );
    }
    Ok(catalog)
}

async fn count_listings(ctx: &AppContext, client: &SiteClient) -> Result<usize, CliError> {
    let mut progress = CrawlProgress::new(ctx.quiet);
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let count = async {
        let tx = tx;
        romie_scraper::count_catalog(client, &ctx.settings.site, &tx).await
    };
    let result = run_with_events(count, rx, |e| progress.handle(e)).await;
    progress.finish();
    Ok(result?)
}
