pub(crate) mod classify;
pub(crate) mod config;
pub(crate) mod crawl;
pub(crate) mod download;
pub(crate) mod stats;
pub(crate) mod sync;
