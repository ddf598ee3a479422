//! Concurrent fan-out over a download plan.
//!
//! At most `concurrency` tasks are in flight. [`DownloadCoordinator::run`]
//! returns only after every task has settled, and a failing task never
//! stops its siblings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use romie_core::settings::DownloadSettings;
use tokio::sync::mpsc;

use crate::error::DownloadError;
use crate::plan::{AssetKind, DownloadTask};
use crate::report::{DownloadOutcome, DownloadReport, SkipReason};

/// Progress events emitted during a batch.
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    Started { total: usize },
    TaskFinished {
        index: usize,
        title: String,
        kind: AssetKind,
        outcome: DownloadOutcome,
    },
    Done { failed: usize },
}

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub concurrency: usize,
    /// Overwrite destinations that already exist.
    pub force: bool,
    /// Report what would be fetched without touching the network.
    pub dry_run: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            concurrency: DownloadSettings::default().concurrency,
            force: false,
            dry_run: false,
        }
    }
}

pub struct DownloadCoordinator {
    http: reqwest::Client,
    options: DownloadOptions,
}

impl DownloadCoordinator {
    pub fn new(
        settings: &DownloadSettings,
        user_agent: &str,
        options: DownloadOptions,
    ) -> Result<Self, DownloadError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;
        Ok(Self { http, options })
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Run every task and collect the outcomes in plan order.
    pub async fn run(
        &self,
        tasks: Vec<DownloadTask>,
        events: &mpsc::UnboundedSender<DownloadEvent>,
    ) -> DownloadReport {
        let _ = events.send(DownloadEvent::Started { total: tasks.len() });
        let concurrency = self.options.concurrency.max(1);

        let mut outcomes: Vec<(usize, DownloadTask, DownloadOutcome)> =
            stream::iter(tasks.into_iter().enumerate())
                .map(|(index, task)| {
                    let events = events.clone();
                    async move {
                        let outcome = self.execute(&task).await;
                        if let DownloadOutcome::Failed { error } = &outcome {
                            log::warn!("Failed to download {} for '{}': {}", task.kind, task.title, error);
                        }
                        let _ = events.send(DownloadEvent::TaskFinished {
                            index,
                            title: task.title.clone(),
                            kind: task.kind,
                            outcome: outcome.clone(),
                        });
                        (index, task, outcome)
                    }
                })
                .buffer_unordered(concurrency)
                .collect()
                .await;

        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut report = DownloadReport::new();
        for (_, task, outcome) in outcomes {
            report.add(task, outcome);
        }

        let summary = report.summary();
        log::info!(
            "Downloads finished: {} downloaded, {} skipped, {} failed",
            summary.downloaded,
            summary.skipped,
            summary.failed
        );
        let _ = events.send(DownloadEvent::Done {
            failed: summary.failed,
        });
        report
    }

    async fn execute(&self, task: &DownloadTask) -> DownloadOutcome {
        if self.options.dry_run {
            return DownloadOutcome::Skipped {
                reason: SkipReason::DryRun,
            };
        }
        if !self.options.force && task.dest.exists() {
            log::debug!("Skipping existing {}", task.dest.display());
            return DownloadOutcome::Skipped {
                reason: SkipReason::Exists,
            };
        }
        match self.fetch(task).await {
            Ok(bytes) => DownloadOutcome::Downloaded { bytes },
            Err(e) => DownloadOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    async fn fetch(&self, task: &DownloadTask) -> Result<u64, DownloadError> {
        if task.url.is_empty() {
            return Err(DownloadError::MissingUrl {
                title: task.title.clone(),
            });
        }

        log::debug!("GET {}", task.url);
        let resp = self.http.get(&task.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: task.url.clone(),
                status: status.as_u16(),
            });
        }
        let bytes = resp.bytes().await?;

        write_file(&task.dest, &bytes)?;
        Ok(bytes.len() as u64)
    }
}

/// Write through a `.part` sibling so a failed write never leaves a
/// truncated file under the final name.
fn write_file(dest: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    let io_err = |path: &Path, source| DownloadError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let part = part_path(dest);
    std::fs::write(&part, bytes).map_err(|e| io_err(&part, e))?;
    std::fs::rename(&part, dest).map_err(|e| io_err(dest, e))
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    dest.with_file_name(name)
}
