//! Stats persistence seam
//!
//! The engine never owns storage. Hosts implement [`StatsStore`] over
//! whatever backend they use; [`InMemoryStatsStore`] is the reference
//! implementation and the test double.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::result::{GameResult, UserId};
use crate::types::RECENT_GAMES_LIMIT;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stats store unavailable: {0}")]
    Unavailable(String),

    #[error("stats store rejected the write: {0}")]
    Rejected(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// External stats collaborator.
///
/// Implementations must tolerate concurrent calls from several finished
/// sessions.
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn record_game_result(&self, result: &GameResult) -> Result<(), StoreError>;

    async fn increment_deck_plays(&self, deck_id: &str) -> Result<(), StoreError>;
}

/// Per-user aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub user_id: UserId,
    pub total_games_played: u32,
    pub perfect_games: u32,
    #[serde(rename = "bestTime")]
    pub best_time_ms: u64,
    pub best_moves: u32,
    #[serde(rename = "lastPlayedAt")]
    pub last_played_at_ms: u64,
}

impl UserStats {
    fn first(result: &GameResult) -> Self {
        Self {
            user_id: result.user_id.clone(),
            total_games_played: 1,
            perfect_games: u32::from(result.perfect_game),
            best_time_ms: result.time_elapsed_ms,
            best_moves: result.moves,
            last_played_at_ms: result.completed_at_ms,
        }
    }

    fn absorb(&mut self, result: &GameResult) {
        self.total_games_played += 1;
        self.perfect_games += u32::from(result.perfect_game);
        self.best_time_ms = self.best_time_ms.min(result.time_elapsed_ms);
        self.best_moves = self.best_moves.min(result.moves);
        self.last_played_at_ms = self.last_played_at_ms.max(result.completed_at_ms);
    }
}

#[derive(Debug, Default)]
struct StoreState {
    results: Vec<GameResult>,
    stats: HashMap<UserId, UserStats>,
    plays: HashMap<String, u64>,
}

#[derive(Debug, Default)]
pub struct InMemoryStatsStore {
    state: Mutex<StoreState>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_stats(&self, user_id: &UserId) -> Option<UserStats> {
        self.state.lock().await.stats.get(user_id).cloned()
    }

    /// Most recent results for a user, newest first.
    pub async fn recent_games(&self, user_id: &UserId) -> Vec<GameResult> {
        let state = self.state.lock().await;
        let mut games: Vec<GameResult> = state
            .results
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        games.sort_by(|a, b| b.completed_at_ms.cmp(&a.completed_at_ms));
        games.truncate(RECENT_GAMES_LIMIT);
        games
    }

    pub async fn deck_plays(&self, deck_id: &str) -> u64 {
        self.state
            .lock()
            .await
            .plays
            .get(deck_id)
            .copied()
            .unwrap_or(0)
    }

    pub async fn result_count(&self) -> usize {
        self.state.lock().await.results.len()
    }
}

#[async_trait]
impl StatsStore for InMemoryStatsStore {
    async fn record_game_result(&self, result: &GameResult) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        state.results.push(result.clone());
        state
            .stats
            .entry(result.user_id.clone())
            .and_modify(|s| s.absorb(result))
            .or_insert_with(|| UserStats::first(result));
        Ok(())
    }

    async fn increment_deck_plays(&self, deck_id: &str) -> Result<(), StoreError> {
        *self
            .state
            .lock()
            .await
            .plays
            .entry(deck_id.to_string())
            .or_insert(0) += 1;
        Ok(())
    }
}
