//! Result reporting for finished memory-match sessions
//!
//! The core crate produces a [`SessionSummary`](crate::core::SessionSummary)
//! on completion. This crate turns it into player-facing results and
//! forwards them to a stats collaborator:
//!
//! - [`result`]: payloads (`CompletedGame`, `GameResult`) and share text
//! - [`store`]: the async [`StatsStore`] seam and an in-memory store
//! - [`reporter`]: best-effort forwarding; failures become warnings
//! - [`runtime`]: tokio runtime bridge for synchronous hosts
//! - [`host`]: [`SessionHost`], a driver wired to the reporter

pub mod host;
pub mod reporter;
pub mod result;
pub mod runtime;
pub mod store;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use host::SessionHost;
pub use reporter::{ReportOutcome, ReportStatus, ResultReporter, SkipReason};
pub use result::{
    share_text, share_text_with_url, unix_millis_now, CompletedGame, DeckInfo, GameResult, UserId,
};
pub use runtime::{ReportConfig, ReportError, ReportJob, ReporterHandle};
pub use store::{InMemoryStatsStore, StatsStore, StoreError, UserStats};
