pub mod coordinator;
pub mod error;
pub mod plan;
pub mod report;

pub use coordinator::{DownloadCoordinator, DownloadEvent, DownloadOptions};
pub use error::DownloadError;
pub use plan::{AssetKind, DownloadTask, matches_filter, plan_downloads, sanitize_filename};
pub use report::{DownloadOutcome, DownloadReport, ReportSummary, SkipReason, TaskResult};
