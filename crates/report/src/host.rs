//! Session host
//!
//! Glues a [`Driver`] to the reporter: the first time the session completes
//! in an episode, the summary is handed off for reporting and the outcome is
//! made available to the UI through [`SessionHost::take_outcomes`].

use std::collections::VecDeque;
use std::time::Duration;

use tracing::warn;

use crate::core::{Clock, Driver, RandomSource, SessionSnapshot, SessionSummary, SimpleRng};
use crate::reporter::{ReportOutcome, ReportStatus, SkipReason};
use crate::result::{share_text, share_text_with_url, unix_millis_now, DeckInfo, UserId};
use crate::runtime::{ReportJob, ReporterHandle};
use crate::types::SessionEvent;

pub struct SessionHost<C: Clock, R: RandomSource = SimpleRng> {
    driver: Driver<C, R>,
    deck: DeckInfo,
    identity: Option<UserId>,
    reporter: Option<ReporterHandle>,
    wall_clock: fn() -> u64,
    outcomes: VecDeque<ReportOutcome>,
    last_summary: Option<SessionSummary>,
}

impl<C: Clock, R: RandomSource> SessionHost<C, R> {
    pub fn new(driver: Driver<C, R>, deck: DeckInfo) -> Self {
        Self {
            driver,
            deck,
            identity: None,
            reporter: None,
            wall_clock: unix_millis_now,
            outcomes: VecDeque::new(),
            last_summary: None,
        }
    }

    pub fn with_identity(mut self, identity: Option<UserId>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_reporter(mut self, reporter: Option<ReporterHandle>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Override the source of `completedAt` timestamps.
    pub fn with_wall_clock(mut self, wall_clock: fn() -> u64) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    /// Sign-in state may change between games.
    pub fn set_identity(&mut self, identity: Option<UserId>) {
        self.identity = identity;
    }

    pub fn dispatch(&mut self, event: SessionEvent) -> bool {
        let changed = self.driver.dispatch(event);
        self.forward_completion();
        changed
    }

    pub fn poll(&mut self) -> bool {
        let changed = self.driver.poll();
        self.forward_completion();
        changed
    }

    fn forward_completion(&mut self) {
        let Some(summary) = self.driver.take_completion() else {
            return;
        };
        let completed_at_ms = (self.wall_clock)();
        self.last_summary = Some(summary);

        let Some(reporter) = self.reporter.as_ref() else {
            let reason = if self.identity.is_some() {
                SkipReason::ReportingDisabled
            } else {
                SkipReason::Anonymous
            };
            self.outcomes.push_back(ReportOutcome::local(
                &summary,
                &self.deck,
                completed_at_ms,
                ReportStatus::Skipped(reason),
            ));
            return;
        };

        let job = ReportJob {
            summary,
            identity: self.identity.clone(),
            deck: self.deck.clone(),
            completed_at_ms,
        };
        if let Err(e) = reporter.submit(job) {
            warn!(episode = summary.episode_id, error = %e, "could not queue game result");
            self.outcomes.push_back(ReportOutcome::local(
                &summary,
                &self.deck,
                completed_at_ms,
                ReportStatus::Warning(format!("result not saved: {e}")),
            ));
        }
    }

    /// Drain every outcome available right now.
    pub fn take_outcomes(&mut self) -> Vec<ReportOutcome> {
        let mut out: Vec<ReportOutcome> = self.outcomes.drain(..).collect();
        if let Some(reporter) = self.reporter.as_mut() {
            while let Some(outcome) = reporter.try_recv() {
                out.push(outcome);
            }
        }
        out
    }

    /// Wait up to `timeout` for the next outcome.
    pub fn wait_outcome(&mut self, timeout: Duration) -> Option<ReportOutcome> {
        if let Some(outcome) = self.outcomes.pop_front() {
            return Some(outcome);
        }
        self.reporter.as_mut()?.recv_timeout(timeout)
    }

    /// Brag line for the most recent completion.
    pub fn share_text(&self) -> Option<String> {
        self.last_summary
            .as_ref()
            .map(|summary| share_text(&self.deck.title, summary))
    }

    /// Brag line plus a replay link under `base_url`.
    pub fn share_text_with_url(&self, base_url: &str) -> Option<String> {
        self.last_summary
            .as_ref()
            .map(|summary| share_text_with_url(base_url, &self.deck, summary))
    }

    pub fn frame(&self) -> &SessionSnapshot {
        self.driver.frame()
    }

    pub fn driver(&self) -> &Driver<C, R> {
        &self.driver
    }

    pub fn deck(&self) -> &DeckInfo {
        &self.deck
    }

    pub fn identity(&self) -> Option<&UserId> {
        self.identity.as_ref()
    }

    pub fn reporting_enabled(&self) -> bool {
        self.reporter.is_some()
    }
}
