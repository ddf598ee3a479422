use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use romie_core::{CatalogEntry, classify};
use romie_download::matches_filter;

pub(crate) fn run_classify(links: &[String]) {
    for link in links {
        let tags = classify(link);
        let entry = CatalogEntry::from_resolved("", "", link.as_str(), "");
        let selected = if matches_filter(&entry) {
            "selected".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "not selected".if_supports_color(Stdout, |t| t.dimmed()).to_string()
        };

        log::info!("{}", link.if_supports_color(Stdout, |t| t.bold()));
        log::info!("  Region:   {}", tags.region);
        log::info!("  Quality:  {}", tags.quality);
        log::info!("  Patch:    {}", tags.patch);
        log::info!("  Hardware: {}", tags.hardware);
        log::info!("  Download: {}", selected);
    }
}
