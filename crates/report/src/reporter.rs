//! Result reporter
//!
//! Turns a session's completion summary into the player-facing result and
//! forwards it to the stats collaborator. Forwarding is best effort: a
//! failing store becomes a warning on the outcome, never an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::SessionSummary;
use crate::result::{CompletedGame, DeckInfo, UserId};
use crate::store::StatsStore;

/// Why a result was not sent to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// No signed-in user
    Anonymous,
    /// Reporting switched off by configuration
    ReportingDisabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum ReportStatus {
    Persisted,
    Skipped(SkipReason),
    /// Non-fatal failure to show the player.
    Warning(String),
}

/// Result of reporting one completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutcome {
    pub episode_id: u32,
    pub game: CompletedGame,
    pub status: ReportStatus,
}

impl ReportOutcome {
    /// Outcome for a result that never reached the reporter.
    pub fn local(
        summary: &SessionSummary,
        deck: &DeckInfo,
        completed_at_ms: u64,
        status: ReportStatus,
    ) -> Self {
        Self {
            episode_id: summary.episode_id,
            game: CompletedGame::from_summary(summary, deck, completed_at_ms),
            status,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match &self.status {
            ReportStatus::Warning(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn persisted(&self) -> bool {
        self.status == ReportStatus::Persisted
    }
}

#[derive(Clone)]
pub struct ResultReporter {
    store: Arc<dyn StatsStore>,
}

impl ResultReporter {
    pub fn new(store: Arc<dyn StatsStore>) -> Self {
        Self { store }
    }

    /// Forward a completed session.
    ///
    /// The deck play counter is bumped for every completion; the result
    /// itself is only recorded for an identified player.
    pub async fn report(
        &self,
        summary: &SessionSummary,
        identity: Option<&UserId>,
        deck: &DeckInfo,
        completed_at_ms: u64,
    ) -> ReportOutcome {
        let game = CompletedGame::from_summary(summary, deck, completed_at_ms);

        let plays_warning = match self.store.increment_deck_plays(&deck.id).await {
            Ok(()) => None,
            Err(e) => {
                warn!(deck = %deck.id, error = %e, "failed to increment deck plays");
                Some(format!("play count not updated: {e}"))
            }
        };

        let status = match identity {
            None => ReportStatus::Skipped(SkipReason::Anonymous),
            Some(user) => {
                let result = game.for_user(user, &deck.title);
                match self.store.record_game_result(&result).await {
                    Ok(()) => {
                        info!(
                            user = %user,
                            deck = %deck.id,
                            moves = result.moves,
                            perfect = result.perfect_game,
                            "game result saved"
                        );
                        ReportStatus::Persisted
                    }
                    Err(e) => {
                        warn!(user = %user, deck = %deck.id, error = %e, "failed to save game result");
                        ReportStatus::Warning(format!("result not saved: {e}"))
                    }
                }
            }
        };

        let status = match (status, plays_warning) {
            (status, None) => status,
            (ReportStatus::Warning(msg), Some(extra)) => {
                ReportStatus::Warning(format!("{msg}; {extra}"))
            }
            (_, Some(extra)) => ReportStatus::Warning(extra),
        };

        ReportOutcome {
            episode_id: summary.episode_id,
            game,
            status,
        }
    }
}
