//! Poll-until-condition waits for the browser session.

use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use crate::error::ResolveError;

/// How often and for how long to poll, and the token that aborts a wait.
#[derive(Debug, Clone)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub timeout: Duration,
    pub cancel: CancellationToken,
}

impl WaitPolicy {
    pub fn new(interval: Duration, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            interval,
            timeout,
            cancel,
        }
    }

    pub fn start(&self, what: &str) -> Deadline<'_> {
        Deadline {
            policy: self,
            what: what.to_string(),
            started: Instant::now(),
        }
    }
}

/// One running wait. Call [`tick`](Self::tick) between probes.
pub struct Deadline<'a> {
    policy: &'a WaitPolicy,
    what: String,
    started: Instant,
}

impl Deadline<'_> {
    /// Sleep one poll interval. Fails once the timeout has elapsed or the
    /// token is cancelled.
    pub async fn tick(&self) -> Result<(), ResolveError> {
        let waited = self.started.elapsed();
        if waited >= self.policy.timeout {
            return Err(ResolveError::Timeout {
                what: self.what.clone(),
                waited_ms: waited.as_millis(),
            });
        }
        let remaining = self.policy.timeout - waited;
        tokio::select! {
            _ = self.policy.cancel.cancelled() => Err(ResolveError::Cancelled),
            _ = tokio::time::sleep(self.policy.interval.min(remaining)) => Ok(()),
        }
    }
}
