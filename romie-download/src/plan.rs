//! Which catalog entries get downloaded, and where the files go.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use romie_core::{Catalog, CatalogEntry, HardwareVariant, PatchStatus, Quality};

/// The two files fetched for every selected entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Rom,
    Cover,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rom => write!(f, "rom"),
            Self::Cover => write!(f, "cover"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub kind: AssetKind,
    pub title: String,
    pub url: String,
    pub dest: PathBuf,
}

/// Verified, unpatched dumps for the classic or Super hardware, released in
/// a region that includes the USA or Europe.
pub fn matches_filter(entry: &CatalogEntry) -> bool {
    entry.quality == Quality::Verified
        && !matches!(
            entry.hardware,
            HardwareVariant::BungFix | HardwareVariant::Color
        )
        && entry.patch == PatchStatus::No
        && (entry.region.mentions("USA") || entry.region.mentions("Europe"))
}

/// Plan a ROM task and a cover task for every entry passing
/// [`matches_filter`], in catalog order.
///
/// Both tasks are planned even when a link is empty; the coordinator reports
/// those as failures instead of dropping them silently.
///
/// Every task gets its own destination. Entries sharing a title (several
/// revisions of one game) get a ` (2)`, ` (3)`, ... suffix on both files.
pub fn plan_downloads(catalog: &Catalog, dest_dir: &Path) -> Vec<DownloadTask> {
    let mut tasks = Vec::new();
    let mut taken = HashSet::new();

    for entry in catalog.iter().filter(|e| matches_filter(e)) {
        let rom_name = if entry.filename.is_empty() {
            entry.title.clone()
        } else {
            entry.filename.clone()
        };
        let rom_name = sanitize_filename(&rom_name);
        let mut cover_name = sanitize_filename(&entry.image_filename());
        if cover_name == rom_name {
            cover_name.push_str(" (cover)");
        }

        let (rom_name, cover_name) = (1..)
            .map(|n| (numbered(&rom_name, n), numbered(&cover_name, n)))
            .find(|(rom, cover)| !taken.contains(rom) && !taken.contains(cover))
            .unwrap_or_default();
        taken.insert(rom_name.clone());
        taken.insert(cover_name.clone());

        tasks.push(DownloadTask {
            kind: AssetKind::Rom,
            title: entry.title.clone(),
            url: entry.download_link.clone(),
            dest: dest_dir.join(rom_name),
        });
        tasks.push(DownloadTask {
            kind: AssetKind::Cover,
            title: entry.title.clone(),
            url: entry.image_link.clone(),
            dest: dest_dir.join(cover_name),
        });
    }
    tasks
}

/// `name` for `n == 1`, otherwise `"stem (n).ext"`.
fn numbered(name: &str, n: usize) -> String {
    if n == 1 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({n}).{ext}"),
        _ => format!("{name} ({n})"),
    }
}

/// Make a title usable as a single path component.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.as_str() {
        "" | "." | ".." => "_".to_string(),
        _ => cleaned,
    }
}

#[cfg(test)]
#[path = "tests/plan_tests.rs"]
mod tests;
