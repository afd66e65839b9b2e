//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behaviour beyond parsing and formatting,
//! making them usable in any context (session logic, host rendering, result
//! reporting).
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds unless stated otherwise:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_PREVIEW_SECS` | 3 | Memorize phase before play (seconds) |
//! | `MISMATCH_REVEAL_MS` | 1000 | Both faces stay visible after a miss |
//! | `TIMER_TICK_MS` | 1000 | Display refresh cadence of the game clock |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Card, CardKind, Phase, SessionEvent};
//!
//! let card = Card::new("q1", "capital-fr", "Capital of France?").with_kind(CardKind::Question);
//! assert_eq!(card.pair_id.as_str(), "capital-fr");
//!
//! assert_eq!(SessionEvent::from_str("skipPreview"), Some(SessionEvent::SkipPreview));
//! assert_eq!(SessionEvent::from_str("select:q1"), Some(SessionEvent::select("q1")));
//!
//! assert!(Phase::Playing.accepts_selection());
//! assert!(!Phase::Evaluating.accepts_selection());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default memorize phase length in seconds (all cards face-up).
pub const DEFAULT_PREVIEW_SECS: u32 = 3;

/// How long two mismatched cards stay face-up before flipping back.
pub const MISMATCH_REVEAL_MS: u32 = 1000;

/// Game clock display refresh interval.
pub const TIMER_TICK_MS: u32 = 1000;

/// Maximum number of face-up cards awaiting comparison.
pub const SELECTION_LIMIT: usize = 2;

/// Number of stars on the rating scale.
pub const MAX_STARS: u8 = 3;

/// Number of results returned by a recent-games query.
pub const RECENT_GAMES_LIMIT: usize = 5;


/// Identifier of a single card, unique within a deck.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CardId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier shared by the two cards of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairId(String);

impl PairId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PairId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for PairId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cosmetic card discriminator for question/answer decks.
///
/// Matching never looks at the kind, only at the pair id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Question,
    Answer,
}

impl CardKind {
    /// Parse kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "question" | "q" => Some(CardKind::Question),
            "answer" | "a" => Some(CardKind::Answer),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardKind::Question => "question",
            CardKind::Answer => "answer",
        }
    }
}

/// Display payload of a card.
///
/// Hosts may send either a bare string (text only) or an object carrying an
/// optional image reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ContentRepr")]
pub struct CardContent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ContentRepr {
    Text(String),
    Rich {
        #[serde(default)]
        text: String,
        #[serde(default)]
        image: Option<String>,
    },
}

impl From<ContentRepr> for CardContent {
    fn from(value: ContentRepr) -> Self {
        match value {
            ContentRepr::Text(text) => Self { text, image: None },
            ContentRepr::Rich { text, image } => Self { text, image },
        }
    }
}

impl CardContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }
}

/// A single card as supplied by the deck catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub content: CardContent,
    pub pair_id: PairId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CardKind>,
}

impl Card {
    /// Create a text card
    pub fn new(id: impl Into<String>, pair_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: CardId::new(id),
            content: CardContent::text(text),
            pair_id: PairId::new(pair_id),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.content.image = Some(image.into());
        self
    }

    /// Whether two cards form a pair.
    pub fn matches(&self, other: &Card) -> bool {
        self.id != other.id && self.pair_id == other.pair_id
    }
}

/// Session lifecycle phase
///
/// The cycle goes: Preview → Playing ⇄ Evaluating → Complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// All cards face-up, input ignored
    Preview,
    /// Accepting card selections
    Playing,
    /// Two cards face-up awaiting comparison outcome
    Evaluating,
    /// Every pair matched; terminal
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Preview => "preview",
            Phase::Playing => "playing",
            Phase::Evaluating => "evaluating",
            Phase::Complete => "complete",
        }
    }

    /// Only `Playing` accepts card selections.
    pub fn accepts_selection(&self) -> bool {
        matches!(self, Phase::Playing)
    }
}

/// How a card is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardFace {
    Down,
    Up,
    Matched,
}

impl CardFace {
    pub fn is_visible(&self) -> bool {
        !matches!(self, CardFace::Down)
    }
}

/// Events that drive the session state machine
///
/// These come from the host: user input, time advancing, and lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Player clicked a card
    Select(CardId),
    /// End the preview phase early
    SkipPreview,
    /// Time advanced; fire any due deferred callbacks
    Tick,
    /// Re-shuffle and start a fresh episode
    Restart,
    /// Hosting view went away; cancel everything
    Teardown,
}

impl SessionEvent {
    pub fn select(id: impl Into<String>) -> Self {
        SessionEvent::Select(CardId::new(id))
    }

    /// Parse event from string
    ///
    /// Tags are case-insensitive; selections use `select:<card id>` and keep
    /// the id verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::SessionEvent;
    ///
    /// assert_eq!(SessionEvent::from_str("tick"), Some(SessionEvent::Tick));
    /// assert_eq!(SessionEvent::from_str("Select:A1"), Some(SessionEvent::select("A1")));
    /// assert_eq!(SessionEvent::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if let Some((tag, id)) = s.split_once(':') {
            if tag.eq_ignore_ascii_case("select") && !id.is_empty() {
                return Some(SessionEvent::select(id));
            }
            return None;
        }

        match s.to_lowercase().as_str() {
            "skippreview" => Some(SessionEvent::SkipPreview),
            "tick" => Some(SessionEvent::Tick),
            "restart" => Some(SessionEvent::Restart),
            "teardown" => Some(SessionEvent::Teardown),
            _ => None,
        }
    }

    /// Convert to camelCase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionEvent::Select(_) => "select",
            SessionEvent::SkipPreview => "skipPreview",
            SessionEvent::Tick => "tick",
            SessionEvent::Restart => "restart",
            SessionEvent::Teardown => "teardown",
        }
    }
}
