//! Application settings.
//!
//! Settings live in `~/.config/romie/settings.toml`. Every field is optional
//! in the file; missing fields keep their defaults. A few fields can be
//! overridden by environment variables, and the CLI applies its own flags
//! on top of that:
//!
//! 1. CLI flag
//! 2. Environment variable (`ROMIE_ROOT_URL`, `ROMIE_WEBDRIVER_URL`, `ROMIE_CATALOG`)
//! 3. `settings.toml`
//! 4. Built-in default

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid settings in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Could not render settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Canonical path to the settings file: `~/.config/romie/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romie").join("settings.toml")
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub site: SiteSettings,
    pub browser: BrowserSettings,
    pub crawl: CrawlSettings,
    pub download: DownloadSettings,
}

/// Where to crawl and how to find things on its pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// First listing page; further pages hang off it.
    pub root_url: String,
    /// Path segment before the page number (`{root}/page/2/`).
    pub page_segment: String,
    pub user_agent: String,
    /// Container holding the pagination links.
    pub pagination_selector: String,
    /// Anchors inside the listing container, one per game.
    pub listing_selector: String,
    /// Text region whose presence means the detail page has loaded.
    pub description_selector: String,
    /// Control that asks the server to prepare the download.
    pub prepare_download_selector: String,
    pub notification_selector: String,
    /// Frame whose `src` carries the real download link.
    pub download_frame_selector: String,
    pub cover_image_selector: String,
    /// Marker of the hidden anchor used when the frame never appears.
    pub hidden_anchor_marker: String,
    pub link_start_delimiter: String,
    pub link_end_delimiter: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            root_url: "https://romsmania.cc/roms/gameboy".to_string(),
            page_segment: "page".to_string(),
            user_agent: concat!("romie/", env!("CARGO_PKG_VERSION")).to_string(),
            pagination_selector: ".pagination".to_string(),
            listing_selector: ".results a".to_string(),
            description_selector: ".game-description".to_string(),
            prepare_download_selector: "form.download-form button[type=submit]".to_string(),
            notification_selector: ".download-notification".to_string(),
            download_frame_selector: "iframe.download-frame".to_string(),
            cover_image_selector: ".game-cover img".to_string(),
            hidden_anchor_marker: "display:none".to_string(),
            link_start_delimiter: "href=\"".to_string(),
            link_end_delimiter: "\"".to_string(),
        }
    }
}

/// WebDriver session used to resolve detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    pub headless: bool,
    /// Attempts per detail page before giving up on it.
    pub max_attempts: u32,
    pub poll_interval_ms: u64,
    /// Upper bound for each wait on the detail page.
    pub wait_timeout_secs: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            headless: true,
            max_attempts: 3,
            poll_interval_ms: 250,
            wait_timeout_secs: 30,
        }
    }
}

impl BrowserSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlSettings {
    /// Number of entries a complete crawl must produce. When unset the
    /// count is taken from a counting pass over the listing pages.
    pub expected_count: Option<usize>,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Maximum number of downloads in flight.
    pub concurrency: usize,
    pub connect_timeout_secs: u64,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            concurrency: 8,
            connect_timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Load `settings.toml` (if present) and apply environment overrides.
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::load_from(&settings_path())?;
        settings.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(settings)
    }

    /// Load a settings file without environment overrides. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Apply overrides from a variable lookup (the environment, in practice).
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        if let Some(url) = lookup("ROMIE_ROOT_URL").filter(|v| !v.is_empty()) {
            self.site.root_url = url;
        }
        if let Some(url) = lookup("ROMIE_WEBDRIVER_URL").filter(|v| !v.is_empty()) {
            self.browser.webdriver_url = url;
        }
        if let Some(path) = lookup("ROMIE_CATALOG").filter(|v| !v.is_empty()) {
            self.crawl.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(n) = lookup("ROMIE_EXPECTED_COUNT").filter(|v| !v.is_empty()) {
            let count = n.parse().map_err(|_| SettingsError::InvalidEnv {
                var: "ROMIE_EXPECTED_COUNT",
                value: n.clone(),
            })?;
            self.crawl.expected_count = Some(count);
        }
        Ok(())
    }

    /// Effective catalog path: the configured one or `~/.romie/catalog.json`.
    pub fn catalog_path(&self) -> PathBuf {
        self.crawl
            .catalog_path
            .clone()
            .unwrap_or_else(crate::catalog::default_catalog_path)
    }

    /// Pretty TOML of the effective settings, for display.
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
