//! Progress bars for the crawl and download phases.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_download::{DownloadEvent, DownloadOutcome};
use romie_scraper::CrawlEvent;

const TICK: std::time::Duration = std::time::Duration::from_millis(100);

fn spinner(quiet: bool, msg: &str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(TICK);
    pb
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  {spinner:.cyan} [{bar:30.cyan/dim}] {pos}/{len} {wide_msg}")
        .expect("static pattern")
        .tick_chars("/-\\|")
        .progress_chars("=> ")
}

/// Renders [`CrawlEvent`]s for both the counting pass and the full crawl.
pub(crate) struct CrawlProgress {
    pb: ProgressBar,
    quiet: bool,
    pages: usize,
}

impl CrawlProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        Self {
            pb: spinner(quiet, "Indexing listing pages..."),
            quiet,
            pages: 0,
        }
    }

    /// Switch to a bar sized by the expected number of entries.
    pub(crate) fn expect_entries(&mut self, expected: usize) {
        if self.quiet {
            return;
        }
        self.pb.set_length(expected as u64);
        self.pb.set_position(0);
        self.pb.set_style(bar_style());
    }

    pub(crate) fn handle(&mut self, event: CrawlEvent) {
        match event {
            CrawlEvent::Indexing => self.pb.set_message("Indexing listing pages..."),
            CrawlEvent::PagesDiscovered { pages } => {
                self.pages = pages;
                log::debug!("Discovered {} listing pages", pages);
            }
            CrawlEvent::PageCounted { page, count } => {
                self.pb
                    .set_message(format!("Counted page {}/{} ({} listings)", page, self.pages, count));
            }
            CrawlEvent::PageStarted { page, items } => {
                log::debug!("Page {}/{}: {} listings", page, self.pages, items);
            }
            CrawlEvent::EntryStarted { title, .. } => self.pb.set_message(title),
            CrawlEvent::EntryResolved { .. } => self.pb.inc(1),
            CrawlEvent::EntryDegraded { .. } => self.pb.inc(1),
            CrawlEvent::Done { .. } => {}
        }
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

/// Renders [`DownloadEvent`]s as a bar over the planned tasks.
pub(crate) struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    pub(crate) fn new(quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(0);
            pb.set_style(bar_style());
            pb.enable_steady_tick(TICK);
            pb
        };
        Self { pb }
    }

    pub(crate) fn handle(&mut self, event: DownloadEvent) {
        match event {
            DownloadEvent::Started { total } => self.pb.set_length(total as u64),
            DownloadEvent::TaskFinished {
                title,
                kind,
                outcome,
                ..
            } => {
                if let DownloadOutcome::Failed { error } = &outcome {
                    self.pb.suspend(|| {
                        log::debug!(
                            "{} {} ({}): {}",
                            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                            title,
                            kind,
                            error
                        )
                    });
                }
                self.pb.set_message(format!("{} ({})", title, kind));
                self.pb.inc(1);
            }
            DownloadEvent::Done { .. } => {}
        }
    }

    pub(crate) fn finish(&self) {
        self.pb.finish_and_clear();
    }
}
