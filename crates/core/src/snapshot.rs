use serde::{Deserialize, Serialize};

use crate::scoring::Rating;
use crate::types::{CardContent, CardFace, CardId, CardKind, PairId, Phase};

/// Final statistics of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub episode_id: u32,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub total_pairs: u32,
    pub rating: Rating,
}

impl SessionSummary {
    pub fn perfect_game(&self) -> bool {
        self.rating.perfect_game
    }

    pub fn stars(&self) -> u8 {
        self.rating.stars()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub pair_id: PairId,
    pub content: CardContent,
    pub kind: Option<CardKind>,
    pub face: CardFace,
    pub selected: bool,
    pub selectable: bool,
}

/// Everything a host needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub episode_id: u32,
    pub phase: Phase,
    pub cards: Vec<CardView>,
    pub selected: Vec<CardId>,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub moves: u32,
    /// Precise elapsed time at snapshot time.
    pub elapsed_ms: u64,
    /// Clock value as of the last tick.
    pub displayed_secs: u64,
    pub preview_remaining_ms: Option<u64>,
    pub study_mode: bool,
    pub closed: bool,
    pub summary: Option<SessionSummary>,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.episode_id = 0;
        self.phase = Phase::Preview;
        self.cards.clear();
        self.selected.clear();
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.moves = 0;
        self.elapsed_ms = 0;
        self.displayed_secs = 0;
        self.preview_remaining_ms = None;
        self.study_mode = false;
        self.closed = false;
        self.summary = None;
    }

    pub fn playable(&self) -> bool {
        !self.closed && self.phase == Phase::Playing
    }

    pub fn face_up_count(&self) -> usize {
        self.cards.iter().filter(|c| c.face.is_visible()).count()
    }

    pub fn card(&self, id: &CardId) -> Option<&CardView> {
        self.cards.iter().find(|c| &c.id == id)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            episode_id: 0,
            phase: Phase::Preview,
            cards: Vec::new(),
            selected: Vec::new(),
            matched_pairs: 0,
            total_pairs: 0,
            moves: 0,
            elapsed_ms: 0,
            displayed_secs: 0,
            preview_remaining_ms: None,
            study_mode: false,
            closed: false,
            summary: None,
        }
    }
}
