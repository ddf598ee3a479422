use std::path::Path;

use crate::plan::DownloadTask;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination already exists and `force` is off.
    Exists,
    DryRun,
}

/// What happened to one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64 },
    Skipped { reason: SkipReason },
    Failed { error: String },
}

impl DownloadOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct TaskResult {
    pub task: DownloadTask,
    pub outcome: DownloadOutcome,
}

/// Outcomes of one download batch, in plan order.
#[derive(Debug, Default)]
pub struct DownloadReport {
    results: Vec<TaskResult>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub bytes: u64,
}

impl DownloadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: DownloadTask, outcome: DownloadOutcome) {
        self.results.push(TaskResult { task, outcome });
    }

    pub fn results(&self) -> &[TaskResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| r.outcome.is_failure())
    }

    pub fn summary(&self) -> ReportSummary {
        let mut summary = ReportSummary::default();
        for result in &self.results {
            match &result.outcome {
                DownloadOutcome::Downloaded { bytes } => {
                    summary.downloaded += 1;
                    summary.bytes += bytes;
                }
                DownloadOutcome::Skipped { .. } => summary.skipped += 1,
                DownloadOutcome::Failed { .. } => summary.failed += 1,
            }
        }
        summary
    }

    /// Write the report to a log file.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Download Log ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Downloaded: {} ({} bytes)",
            summary.downloaded, summary.bytes
        )?;
        writeln!(file, "Skipped: {}", summary.skipped)?;
        writeln!(file, "Failed: {}", summary.failed)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for TaskResult { task, outcome } in &self.results {
            let dest = task.dest.display();
            match outcome {
                DownloadOutcome::Downloaded { bytes } => {
                    writeln!(file, "[OK] {} ({}) -> {} [{} bytes]", task.title, task.kind, dest, bytes)?;
                }
                DownloadOutcome::Skipped { reason } => {
                    let why = match reason {
                        SkipReason::Exists => "already exists",
                        SkipReason::DryRun => "dry run",
                    };
                    writeln!(file, "[SKIP] {} ({}) -> {}: {}", task.title, task.kind, dest, why)?;
                }
                DownloadOutcome::Failed { error } => {
                    writeln!(file, "[FAILED] {} ({}): {}", task.title, task.kind, error)?;
                    if !task.url.is_empty() {
                        writeln!(file, "     URL: {}", task.url)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
