//! Core types for romie: catalog entries, filename tag classification,
//! catalog persistence and settings.

pub mod catalog;
pub mod classify;
pub mod entry;
pub mod settings;
pub mod tags;

pub use catalog::{Catalog, CatalogError};
pub use classify::{Classification, classify};
pub use entry::{CatalogEntry, derive_filename, link_extension};
pub use settings::{Settings, SettingsError};
pub use tags::{HardwareVariant, PatchStatus, Quality, Region};
