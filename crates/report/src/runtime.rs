//! Reporter runtime integration.
//!
//! Bridges the synchronous session loop with the async stats store. The
//! session host submits finished games without blocking; outcomes come
//! back over a channel the host drains on its own schedule.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::SessionSummary;
use crate::reporter::{ReportOutcome, ResultReporter};
use crate::result::{DeckInfo, UserId};
use crate::store::StatsStore;

const DEFAULT_QUEUE_DEPTH: usize = 16;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to start reporter runtime: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("report queue is full")]
    QueueFull,

    #[error("reporter has shut down")]
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Completed games waiting to be forwarded before submits are refused.
    pub queue_depth: usize,
    pub disabled: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            queue_depth: DEFAULT_QUEUE_DEPTH,
            disabled: false,
        }
    }
}

impl ReportConfig {
    /// Create from environment variables
    ///
    /// - `MEMORY_MATCH_REPORT_QUEUE`: queue depth
    /// - `MEMORY_MATCH_REPORT_DISABLED`: `1` or `true` turns reporting off
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let queue_depth = lookup("MEMORY_MATCH_REPORT_QUEUE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_QUEUE_DEPTH);

        let disabled = lookup("MEMORY_MATCH_REPORT_DISABLED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            queue_depth,
            disabled,
        }
    }
}

/// One finished game waiting to be forwarded.
#[derive(Debug, Clone)]
pub struct ReportJob {
    pub summary: SessionSummary,
    pub identity: Option<UserId>,
    pub deck: DeckInfo,
    pub completed_at_ms: u64,
}

/// Running reporter instance.
pub struct ReporterHandle {
    rt: Runtime,
    job_tx: mpsc::Sender<ReportJob>,
    outcome_rx: mpsc::UnboundedReceiver<ReportOutcome>,
}

impl ReporterHandle {
    /// Start the reporter.
    ///
    /// Returns `Ok(None)` when reporting is disabled.
    pub fn start(
        config: ReportConfig,
        store: Arc<dyn StatsStore>,
    ) -> Result<Option<Self>, ReportError> {
        if config.disabled {
            debug!("result reporting disabled");
            return Ok(None);
        }

        let depth = config.queue_depth.max(1);
        let (job_tx, mut job_rx) = mpsc::channel::<ReportJob>(depth);
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<ReportOutcome>();

        let rt = Runtime::new()?;
        let reporter = ResultReporter::new(store);
        rt.spawn(async move {
            while let Some(job) = job_rx.recv().await {
                let reporter = reporter.clone();
                let outcome_tx = outcome_tx.clone();
                // Completions from different sessions are forwarded concurrently.
                tokio::spawn(async move {
                    let outcome = reporter
                        .report(
                            &job.summary,
                            job.identity.as_ref(),
                            &job.deck,
                            job.completed_at_ms,
                        )
                        .await;
                    let _ = outcome_tx.send(outcome);
                });
            }
            debug!("report queue closed");
        });

        Ok(Some(Self {
            rt,
            job_tx,
            outcome_rx,
        }))
    }

    pub fn start_from_env(store: Arc<dyn StatsStore>) -> Result<Option<Self>, ReportError> {
        Self::start(ReportConfig::from_env(), store)
    }

    /// Queue a finished game without blocking.
    pub fn submit(&self, job: ReportJob) -> Result<(), ReportError> {
        self.job_tx.try_send(job).map_err(|e| match e {
            mpsc::error::TrySendError::Full(job) => {
                warn!(episode = job.summary.episode_id, "report queue full");
                ReportError::QueueFull
            }
            mpsc::error::TrySendError::Closed(_) => ReportError::Closed,
        })
    }

    pub fn try_recv(&mut self) -> Option<ReportOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Block the calling thread until an outcome arrives or `timeout` passes.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<ReportOutcome> {
        let rx = &mut self.outcome_rx;
        self.rt
            .block_on(async { tokio::time::timeout(timeout, rx.recv()).await })
            .ok()
            .flatten()
    }
}
