//! The persisted catalog: a JSON array of [`CatalogEntry`] objects.
//!
//! A catalog is produced by exactly one full crawl and written in one piece.
//! There is no incremental persistence: [`persist`] writes a sibling temp
//! file and renames it over the target, so readers see either the previous
//! file or the complete new one.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::entry::CatalogEntry;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    /// A crawl produced a different number of entries than expected.
    #[error("Crawled {actual} entries but expected {expected}")]
    CountMismatch { expected: usize, actual: usize },
}

/// Ordered collection of catalog entries, append-only during a crawl.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Number of entries whose download link could not be resolved.
    pub fn unresolved_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_resolved()).count()
    }

    /// Fail unless the catalog holds exactly `expected` entries.
    pub fn verify_count(&self, expected: usize) -> Result<(), CatalogError> {
        if self.entries.len() != expected {
            return Err(CatalogError::CountMismatch {
                expected,
                actual: self.entries.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<CatalogEntry>> for Catalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Default catalog location: `~/.romie/catalog.json`.
pub fn default_catalog_path() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".romie").join("catalog.json")
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Load a previously persisted catalog verbatim.
pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let entries: Vec<CatalogEntry> =
        serde_json::from_str(&contents).map_err(|e| CatalogError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
    log::debug!("Loaded {} catalog entries from {}", entries.len(), path.display());
    Ok(Catalog::from(entries))
}

/// Write the whole catalog to `path`, replacing any previous file.
pub fn persist(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let io_err = |e: std::io::Error| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let serialized =
        serde_json::to_string_pretty(&catalog.entries).map_err(|e| CatalogError::Json {
            path: path.display().to_string(),
            source: e,
        })?;

    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;

    log::debug!("Persisted {} catalog entries to {}", catalog.len(), path.display());
    Ok(())
}
