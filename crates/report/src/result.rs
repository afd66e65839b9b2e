//! Result payloads handed to the stats collaborator.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::{format_elapsed, SessionSummary};

/// Authenticated player identity, supplied by the host's auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog identity of the deck being played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckInfo {
    pub id: String,
    pub title: String,
}

impl DeckInfo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// What the player sees after finishing, persisted or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedGame {
    pub deck_id: String,
    pub moves: u32,
    #[serde(rename = "elapsed")]
    pub elapsed_ms: u64,
    pub perfect_game: bool,
    pub stars: u8,
    #[serde(rename = "completedAt")]
    pub completed_at_ms: u64,
}

impl CompletedGame {
    pub fn from_summary(summary: &SessionSummary, deck: &DeckInfo, completed_at_ms: u64) -> Self {
        Self {
            deck_id: deck.id.clone(),
            moves: summary.moves,
            elapsed_ms: summary.elapsed_ms,
            perfect_game: summary.perfect_game(),
            stars: summary.stars(),
            completed_at_ms,
        }
    }

    /// Attach identity and title for the record-result call.
    pub fn for_user(&self, user_id: &UserId, deck_title: &str) -> GameResult {
        GameResult {
            user_id: user_id.clone(),
            deck_id: self.deck_id.clone(),
            deck_title: deck_title.to_string(),
            moves: self.moves,
            time_elapsed_ms: self.elapsed_ms,
            completed_at_ms: self.completed_at_ms,
            perfect_game: self.perfect_game,
        }
    }
}

/// Payload of the collaborator's record-game-result operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub user_id: UserId,
    pub deck_id: String,
    pub deck_title: String,
    pub moves: u32,
    #[serde(rename = "timeElapsed")]
    pub time_elapsed_ms: u64,
    #[serde(rename = "completedAt")]
    pub completed_at_ms: u64,
    pub perfect_game: bool,
}

/// Shareable one-line brag.
pub fn share_text(deck_title: &str, summary: &SessionSummary) -> String {
    format!(
        "I just completed \"{}\" in {} with {} moves!",
        deck_title,
        format_elapsed(summary.elapsed_ms),
        summary.moves
    )
}

/// Share text followed by a link to replay the deck at `<base>/play/<deck id>`.
pub fn share_text_with_url(base_url: &str, deck: &DeckInfo, summary: &SessionSummary) -> String {
    format!(
        "{}\n{}/play/{}",
        share_text(&deck.title, summary),
        base_url.trim_end_matches('/'),
        deck.id
    )
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn unix_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate;

    fn summary(moves: u32, pairs: u32, elapsed_ms: u64) -> SessionSummary {
        SessionSummary {
            episode_id: 0,
            moves,
            elapsed_ms,
            total_pairs: pairs,
            rating: rate(moves, pairs),
        }
    }

    #[test]
    fn test_completed_game_from_summary() {
        let deck = DeckInfo::new("deck-1", "Capitals");
        let game = CompletedGame::from_summary(&summary(4, 4, 12_000), &deck, 99);
        assert_eq!(game.deck_id, "deck-1");
        assert!(game.perfect_game);
        assert_eq!(game.stars, 3);
        assert_eq!(game.completed_at_ms, 99);

        let result = game.for_user(&UserId::from("u1"), &deck.title);
        assert_eq!(result.deck_title, "Capitals");
        assert_eq!(result.time_elapsed_ms, 12_000);
    }

    #[test]
    fn test_game_result_wire_names() {
        let deck = DeckInfo::new("d", "T");
        let result = CompletedGame::from_summary(&summary(3, 2, 5_000), &deck, 1)
            .for_user(&UserId::from("u"), "T");
        let v = serde_json::to_value(&result).unwrap();
        assert_eq!(v["userId"], "u");
        assert_eq!(v["deckTitle"], "T");
        assert_eq!(v["timeElapsed"], 5_000);
        assert_eq!(v["completedAt"], 1);
        assert_eq!(v["perfectGame"], false);
    }

    #[test]
    fn test_share_text() {
        let text = share_text("Year 7 French", &summary(10, 8, 95_000));
        assert_eq!(text, "I just completed \"Year 7 French\" in 1:35 with 10 moves!");
    }

    #[test]
    fn test_share_text_with_play_link() {
        let deck = DeckInfo::new("deck-42", "Year 7 French");
        let text = share_text_with_url("https://cards.example/", &deck, &summary(10, 8, 95_000));
        assert_eq!(
            text,
            "I just completed \"Year 7 French\" in 1:35 with 10 moves!\nhttps://cards.example/play/deck-42"
        );
    }

    #[test]
    fn test_unix_millis_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_millis_now() > 1_577_836_800_000);
    }
}
