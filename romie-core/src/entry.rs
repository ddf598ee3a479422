use serde::{Deserialize, Serialize};

use crate::classify::{Classification, classify};
use crate::tags::{HardwareVariant, PatchStatus, Quality, Region};

/// One discovered game. Field names on disk are fixed for compatibility
/// with existing catalog files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name from the listing text.
    pub title: String,
    /// URL of the listing's detail page.
    #[serde(rename = "link")]
    pub listing_link: String,
    /// Resolved download URL; empty when resolution failed.
    #[serde(rename = "download_link")]
    pub download_link: String,
    pub filename: String,
    #[serde(rename = "image")]
    pub image_link: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub quality: Quality,
    #[serde(rename = "hack", default)]
    pub patch: PatchStatus,
    #[serde(rename = "gameboy", default)]
    pub hardware: HardwareVariant,
}

impl CatalogEntry {
    /// Build an entry from a resolved listing, deriving the filename and
    /// the classification tags from the download link.
    pub fn from_resolved(
        title: impl Into<String>,
        listing_link: impl Into<String>,
        download_link: impl Into<String>,
        image_link: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let download_link = download_link.into();
        let Classification {
            region,
            quality,
            patch,
            hardware,
        } = classify(&download_link);

        Self {
            filename: derive_filename(&title, &download_link),
            title,
            listing_link: listing_link.into(),
            download_link,
            image_link: image_link.into(),
            region,
            quality,
            patch,
            hardware,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !self.download_link.is_empty()
    }

    /// Filename for the cover image: the title plus the image's extension.
    pub fn image_filename(&self) -> String {
        derive_filename(&self.title, &self.image_link)
    }
}

/// Title plus the extension of the link's last path segment (including the
/// dot). A link without an extension yields the bare title.
pub fn derive_filename(title: &str, link: &str) -> String {
    match link_extension(link) {
        Some(ext) => format!("{title}.{ext}"),
        None => title.to_string(),
    }
}

/// Extension of the last path segment of a URL-ish string, ignoring any
/// query string or fragment. The host of an absolute URL is never treated
/// as a path segment.
pub fn link_extension(link: &str) -> Option<&str> {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let path = match path.split_once("://") {
        Some((_, rest)) => &rest[rest.find('/')?..],
        None => path,
    };
    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext)
}

#[cfg(test)]
#[path = "tests/entry_tests.rs"]
mod tests;
