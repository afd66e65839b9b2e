//! Session module - one play-through of a deck
//!
//! This module ties together the shuffle, the deferred-callback scheduler,
//! the game clock and scoring. It owns the selection buffer, the matched-pair
//! set and the move counter, and advances them only through [`Session::apply`].
//!
//! Time is an input: every transition receives `now_ms`, and deferred work
//! (preview expiry, mismatch reveal, clock ticks) fires only when the host
//! feeds a later `now_ms` in. Given the same deck, seed and event sequence a
//! session always ends in the same state.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;
use tracing::debug;

use crate::config::{PreviewMode, SessionConfig};
use crate::deck::{Deck, DeckError};
use crate::rng::{shuffle, RandomSource, SimpleRng};
use crate::scheduler::{Deferred, Fired, Scheduler};
use crate::scoring::rate;
use crate::snapshot::{CardView, SessionSnapshot, SessionSummary};
use crate::timer::GameTimer;
use crate::types::{Card, CardFace, CardId, PairId, Phase, SessionEvent, SELECTION_LIMIT};

#[derive(Debug, Clone)]
pub struct Session<R: RandomSource = SimpleRng> {
    config: SessionConfig,
    deck: Deck,
    /// Shuffled play order, fixed for the episode.
    layout: Vec<Card>,
    rng: R,
    phase: Phase,
    /// Indices into `layout`, in selection order.
    selected: ArrayVec<usize, SELECTION_LIMIT>,
    matched: BTreeSet<PairId>,
    moves: u32,
    timer: GameTimer,
    scheduler: Scheduler,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    summary: Option<SessionSummary>,
    completion_pending: bool,
    closed: bool,
}

impl Session<SimpleRng> {
    /// Validate `cards` and start a session shuffled with a seeded LCG.
    pub fn with_seed(
        cards: Vec<Card>,
        config: SessionConfig,
        seed: u32,
        now_ms: u64,
    ) -> Result<Self, DeckError> {
        Self::from_cards(cards, config, SimpleRng::new(seed), now_ms)
    }
}

impl<R: RandomSource> Session<R> {
    /// Validate `cards` and start a session. Malformed decks never produce a session.
    pub fn from_cards(
        cards: Vec<Card>,
        config: SessionConfig,
        rng: R,
        now_ms: u64,
    ) -> Result<Self, DeckError> {
        Ok(Self::new(Deck::new(cards)?, config, rng, now_ms))
    }

    /// Start a session on an already validated deck.
    pub fn new(deck: Deck, config: SessionConfig, rng: R, now_ms: u64) -> Self {
        let mut session = Self {
            config: config.normalized(),
            deck,
            layout: Vec::new(),
            rng,
            phase: Phase::Preview,
            selected: ArrayVec::new(),
            matched: BTreeSet::new(),
            moves: 0,
            timer: GameTimer::new(),
            scheduler: Scheduler::new(),
            episode_id: 0,
            summary: None,
            completion_pending: false,
            closed: false,
        };
        session.begin_episode(now_ms);
        session
    }

    /// Apply one event. Returns true if observable state changed.
    pub fn apply(&mut self, event: SessionEvent, now_ms: u64) -> bool {
        match event {
            SessionEvent::Select(id) => self.select(&id, now_ms),
            SessionEvent::SkipPreview => self.skip_preview(now_ms),
            SessionEvent::Tick => self.advance(now_ms),
            SessionEvent::Restart => {
                self.restart(now_ms);
                true
            }
            SessionEvent::Teardown => self.teardown(now_ms),
        }
    }

    /// Consuming form of [`apply`](Self::apply).
    pub fn transition(mut self, event: SessionEvent, now_ms: u64) -> Self {
        self.apply(event, now_ms);
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn layout(&self) -> &[Card] {
        &self.layout
    }

    pub fn total_pairs(&self) -> usize {
        self.deck.total_pairs()
    }

    pub fn matched_pairs(&self) -> &BTreeSet<PairId> {
        &self.matched
    }

    pub fn selected(&self) -> Vec<&CardId> {
        self.selected.iter().map(|&i| &self.layout[i].id).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn study_mode(&self) -> bool {
        self.config.preview == PreviewMode::AlwaysVisible
    }

    pub fn timer(&self) -> &GameTimer {
        &self.timer
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.timer.elapsed_ms(now_ms)
    }

    /// Number of deferred callbacks still waiting to fire.
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Earliest deadline a host should wake up for.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        self.summary
    }

    /// Take the completion event. Yields `Some` once per completed episode.
    pub fn take_completion(&mut self) -> Option<SessionSummary> {
        if !self.completion_pending {
            return None;
        }
        self.completion_pending = false;
        self.summary
    }

    /// Start a new episode: re-shuffle and schedule preview or play.
    fn begin_episode(&mut self, now_ms: u64) {
        self.layout = shuffle(self.deck.cards(), &mut self.rng);

        match self.config.preview {
            PreviewMode::Countdown { .. } if self.config.preview.duration_ms() > 0 => {
                self.phase = Phase::Preview;
                let due = now_ms.saturating_add(self.config.preview.duration_ms());
                self.scheduler
                    .schedule(due, self.episode_id, Deferred::PreviewExpired);
            }
            _ => self.begin_play(now_ms),
        }

        debug!(
            episode = self.episode_id,
            cards = self.layout.len(),
            phase = self.phase.as_str(),
            "session started"
        );
    }

    fn begin_play(&mut self, now_ms: u64) {
        self.phase = Phase::Playing;
        self.selected.clear();
        self.timer.start(now_ms);
        self.scheduler.schedule(
            now_ms.saturating_add(self.config.tick_ms as u64),
            self.episode_id,
            Deferred::ClockTick,
        );
    }

    fn index_of(&self, id: &CardId) -> Option<usize> {
        self.layout.iter().position(|c| &c.id == id)
    }

    fn select(&mut self, id: &CardId, now_ms: u64) -> bool {
        if self.closed || !self.phase.accepts_selection() {
            return false;
        }
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        if self.selected.contains(&idx) || self.matched.contains(&self.layout[idx].pair_id) {
            return false;
        }
        if self.selected.try_push(idx).is_err() {
            return false;
        }
        if self.selected.len() < SELECTION_LIMIT {
            return true;
        }

        self.moves += 1;
        self.phase = Phase::Evaluating;
        self.evaluate(now_ms);
        true
    }

    fn evaluate(&mut self, now_ms: u64) {
        let (a, b) = (self.selected[0], self.selected[1]);

        if self.layout[a].matches(&self.layout[b]) {
            let pair_id = self.layout[a].pair_id.clone();
            debug!(episode = self.episode_id, moves = self.moves, pair = %pair_id, "match");
            self.matched.insert(pair_id);
            self.selected.clear();

            if self.matched.len() == self.total_pairs() {
                self.complete(now_ms);
            } else {
                self.phase = Phase::Playing;
            }
            return;
        }

        debug!(episode = self.episode_id, moves = self.moves, "mismatch");
        if self.config.mismatch_reveal_ms == 0 {
            self.selected.clear();
            self.phase = Phase::Playing;
        } else {
            self.scheduler.schedule(
                now_ms.saturating_add(self.config.mismatch_reveal_ms as u64),
                self.episode_id,
                Deferred::RevealExpired,
            );
        }
    }

    fn complete(&mut self, now_ms: u64) {
        self.phase = Phase::Complete;
        self.timer.stop(now_ms);
        self.scheduler.cancel_all();

        let total_pairs = self.total_pairs() as u32;
        let summary = SessionSummary {
            episode_id: self.episode_id,
            moves: self.moves,
            elapsed_ms: self.timer.elapsed_ms(now_ms),
            total_pairs,
            rating: rate(self.moves, total_pairs),
        };
        self.summary = Some(summary);
        self.completion_pending = true;

        debug!(
            episode = self.episode_id,
            moves = summary.moves,
            elapsed_ms = summary.elapsed_ms,
            perfect = summary.perfect_game(),
            "session complete"
        );
    }

    fn skip_preview(&mut self, now_ms: u64) -> bool {
        if self.closed || self.phase != Phase::Preview {
            return false;
        }
        self.scheduler.cancel_kind(Deferred::PreviewExpired);
        self.begin_play(now_ms);
        true
    }

    /// Fire every deferred callback due at or before `now_ms`.
    fn advance(&mut self, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }

        let mut changed = false;
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            if fired.episode != self.episode_id {
                continue;
            }
            changed |= self.fire(fired, now_ms);
        }
        changed
    }

    fn fire(&mut self, fired: Fired, now_ms: u64) -> bool {
        match fired.kind {
            Deferred::PreviewExpired => {
                if self.phase != Phase::Preview {
                    return false;
                }
                self.begin_play(fired.due_ms);
                true
            }
            Deferred::RevealExpired => {
                if self.phase != Phase::Evaluating {
                    return false;
                }
                self.selected.clear();
                self.phase = Phase::Playing;
                true
            }
            Deferred::ClockTick => {
                if !self.timer.is_running() {
                    return false;
                }
                self.timer.record_tick(now_ms);

                // Coalesce missed ticks instead of replaying each of them.
                let tick = (self.config.tick_ms as u64).max(1);
                let missed = now_ms.saturating_sub(fired.due_ms) / tick;
                let next = fired
                    .due_ms
                    .saturating_add(missed.saturating_add(1).saturating_mul(tick));
                // A saturated deadline would fire again at once.
                if next > now_ms {
                    self.scheduler
                        .schedule(next, self.episode_id, Deferred::ClockTick);
                }
                true
            }
        }
    }

    /// Discard the episode and start over on a fresh shuffle.
    pub fn restart(&mut self, now_ms: u64) {
        let cancelled = self.scheduler.cancel_all();
        self.episode_id = self.episode_id.wrapping_add(1);

        self.selected.clear();
        self.matched.clear();
        self.moves = 0;
        self.timer = GameTimer::new();
        self.summary = None;
        self.completion_pending = false;
        self.closed = false;

        debug!(episode = self.episode_id, cancelled, "session restart");
        self.begin_episode(now_ms);
    }

    /// Hosting view went away. Cancels all deferred work; only `Restart`
    /// is accepted afterwards.
    fn teardown(&mut self, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }
        self.closed = true;
        let cancelled = self.scheduler.cancel_all();
        self.timer.stop(now_ms);
        debug!(episode = self.episode_id, cancelled, "session teardown");
        true
    }

    fn face_of(&self, idx: usize) -> CardFace {
        let card = &self.layout[idx];
        if self.matched.contains(&card.pair_id) {
            CardFace::Matched
        } else if self.phase == Phase::Preview || self.study_mode() || self.selected.contains(&idx)
        {
            CardFace::Up
        } else {
            CardFace::Down
        }
    }

    pub fn face(&self, id: &CardId) -> Option<CardFace> {
        self.index_of(id).map(|i| self.face_of(i))
    }

    pub fn snapshot_into(&self, now_ms: u64, out: &mut SessionSnapshot) {
        out.episode_id = self.episode_id;
        out.phase = self.phase;

        out.cards.clear();
        for (idx, card) in self.layout.iter().enumerate() {
            let face = self.face_of(idx);
            let selected = self.selected.contains(&idx);
            out.cards.push(CardView {
                id: card.id.clone(),
                pair_id: card.pair_id.clone(),
                content: card.content.clone(),
                kind: card.kind,
                face,
                selected,
                selectable: !self.closed
                    && self.phase == Phase::Playing
                    && face != CardFace::Matched
                    && !selected,
            });
        }

        out.selected.clear();
        out.selected
            .extend(self.selected.iter().map(|&i| self.layout[i].id.clone()));
        out.matched_pairs = self.matched.len();
        out.total_pairs = self.total_pairs();
        out.moves = self.moves;
        out.elapsed_ms = self.timer.elapsed_ms(now_ms);
        out.displayed_secs = self.timer.displayed_secs();
        out.preview_remaining_ms = if self.phase == Phase::Preview {
            self.scheduler
                .due_of(Deferred::PreviewExpired)
                .map(|due| due.saturating_sub(now_ms))
        } else {
            None
        };
        out.study_mode = self.study_mode();
        out.closed = self.closed;
        out.summary = self.summary;
    }

    pub fn snapshot(&self, now_ms: u64) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(now_ms, &mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Tier;

    fn pairs(ids: &[&str]) -> Vec<Card> {
        ids.iter()
            .flat_map(|p| {
                [
                    Card::new(format!("{p}1"), *p, format!("{p} question")),
                    Card::new(format!("{p}2"), *p, format!("{p} answer")),
                ]
            })
            .collect()
    }

    fn no_preview() -> SessionConfig {
        SessionConfig::default().with_preview(PreviewMode::Off)
    }

    fn playing(ids: &[&str]) -> Session {
        Session::with_seed(pairs(ids), no_preview(), 12345, 0).unwrap()
    }

    fn sel(s: &mut Session, id: &str, now: u64) -> bool {
        s.apply(SessionEvent::select(id), now)
    }

    #[test]
    fn test_malformed_deck_refuses_to_start() {
        let mut cards = pairs(&["A"]);
        cards.pop();
        let err = Session::with_seed(cards, no_preview(), 1, 0).unwrap_err();
        assert_eq!(err, DeckError::OddCardCount(1));
    }

    #[test]
    fn test_new_session_state() {
        let s = playing(&["A", "B"]);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.moves(), 0);
        assert!(s.matched_pairs().is_empty());
        assert!(s.selected().is_empty());
        assert_eq!(s.episode_id(), 0);
        assert_eq!(s.layout().len(), 4);
        assert!(s.timer().is_running());
    }

    #[test]
    fn test_single_selection_is_not_a_move() {
        let mut s = playing(&["A", "B"]);
        assert!(sel(&mut s, "A1", 10));
        assert_eq!(s.moves(), 0);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.selected(), vec![&CardId::from("A1")]);
    }

    #[test]
    fn test_reselecting_selected_card_is_noop() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 10);
        assert!(!sel(&mut s, "A1", 20));
        assert_eq!(s.moves(), 0);
        assert_eq!(s.selected().len(), 1);
    }

    #[test]
    fn test_unknown_card_is_noop() {
        let mut s = playing(&["A"]);
        assert!(!sel(&mut s, "Z9", 10));
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_match_returns_to_playing() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 10);
        sel(&mut s, "A2", 20);
        assert_eq!(s.moves(), 1);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.matched_pairs().contains(&PairId::from("A")));
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_mismatch_waits_for_reveal_delay() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 100);
        sel(&mut s, "B1", 200);
        assert_eq!(s.moves(), 1);
        assert_eq!(s.phase(), Phase::Evaluating);
        assert_eq!(s.selected().len(), 2);

        // Third card while evaluating is ignored, not queued.
        assert!(!sel(&mut s, "A2", 300));
        assert_eq!(s.selected().len(), 2);

        let reveal = s.config().mismatch_reveal_ms as u64;
        s.apply(SessionEvent::Tick, 200 + reveal - 1);
        assert_eq!(s.phase(), Phase::Evaluating);

        s.apply(SessionEvent::Tick, 200 + reveal);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.selected().is_empty());
        assert!(s.matched_pairs().is_empty());
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_zero_reveal_delay_clears_immediately() {
        let config = no_preview().with_mismatch_reveal_ms(0);
        let mut s = Session::with_seed(pairs(&["A", "B"]), config, 1, 0).unwrap();
        sel(&mut s, "A1", 10);
        sel(&mut s, "B2", 20);
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_matched_card_is_noop() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 10);
        sel(&mut s, "A2", 20);
        let moves = s.moves();
        let matched = s.matched_pairs().clone();

        assert!(!sel(&mut s, "A1", 30));
        assert!(!sel(&mut s, "A2", 40));
        assert_eq!(s.moves(), moves);
        assert_eq!(s.matched_pairs(), &matched);
        assert!(s.selected().is_empty());
    }

    #[test]
    fn test_single_pair_deck_completes_in_one_move() {
        let mut s = playing(&["A"]);
        sel(&mut s, "A2", 500);
        sel(&mut s, "A1", 900);
        assert!(s.is_complete());
        let summary = s.take_completion().unwrap();
        assert_eq!(summary.moves, 1);
        assert!(summary.perfect_game());
        assert_eq!(summary.rating.tier, Tier::Top);
        assert_eq!(summary.elapsed_ms, 900);
    }

    #[test]
    fn test_completion_taken_exactly_once() {
        let mut s = playing(&["A"]);
        sel(&mut s, "A1", 1);
        sel(&mut s, "A2", 2);
        assert!(s.take_completion().is_some());
        assert!(s.take_completion().is_none());
        assert!(s.summary().is_some());
    }

    #[test]
    fn test_complete_ignores_input_and_stops_timer() {
        let mut s = playing(&["A"]);
        sel(&mut s, "A1", 1_000);
        sel(&mut s, "A2", 3_000);
        assert_eq!(s.pending_callbacks(), 0);
        assert!(!sel(&mut s, "A1", 4_000));
        assert!(!s.apply(SessionEvent::Tick, 60_000));
        assert_eq!(s.elapsed_ms(60_000), 3_000);
        assert!(s.timer().stopped());
    }

    #[test]
    fn test_preview_blocks_input_until_expiry() {
        let config = SessionConfig::default().with_preview(PreviewMode::Countdown { secs: 3 });
        let mut s = Session::with_seed(pairs(&["A", "B"]), config, 9, 1_000).unwrap();
        assert_eq!(s.phase(), Phase::Preview);
        assert!(!s.timer().is_running());
        assert!(!sel(&mut s, "A1", 1_500));

        let snap = s.snapshot(2_000);
        assert_eq!(snap.preview_remaining_ms, Some(2_000));
        assert!(snap.cards.iter().all(|c| c.face == CardFace::Up));

        s.apply(SessionEvent::Tick, 4_000);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.timer().started_at(), Some(4_000));
        let snap = s.snapshot(4_000);
        assert!(snap.cards.iter().all(|c| c.face == CardFace::Down));
    }

    #[test]
    fn test_skip_preview() {
        let mut s =
            Session::with_seed(pairs(&["A"]), SessionConfig::default(), 2, 0).unwrap();
        assert!(s.apply(SessionEvent::SkipPreview, 500));
        assert_eq!(s.phase(), Phase::Playing);
        assert!(!s.apply(SessionEvent::SkipPreview, 600));

        // The cancelled expiry must not fire later.
        s.apply(SessionEvent::Tick, 10_000);
        assert_eq!(s.timer().started_at(), Some(500));
    }

    #[test]
    fn test_study_mode_keeps_cards_face_up() {
        let config = SessionConfig::default().with_preview(PreviewMode::from_secs(0));
        let mut s = Session::with_seed(pairs(&["A", "B"]), config, 3, 0).unwrap();
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.study_mode());
        assert!(!s.scheduler.is_pending(Deferred::PreviewExpired));

        sel(&mut s, "A1", 10);
        sel(&mut s, "B1", 20);
        s.apply(SessionEvent::Tick, 5_000);
        let snap = s.snapshot(5_000);
        assert!(snap.cards.iter().all(|c| c.face == CardFace::Up));
    }

    #[test]
    fn test_zero_countdown_is_study_mode() {
        let config = SessionConfig::default().with_preview(PreviewMode::Countdown { secs: 0 });
        let s = Session::with_seed(pairs(&["A", "B"]), config, 3, 0).unwrap();
        assert_eq!(s.phase(), Phase::Playing);
        assert!(s.study_mode());
        assert_eq!(s.config().preview, PreviewMode::AlwaysVisible);
        let snap = s.snapshot(0);
        assert!(snap.study_mode);
        assert!(snap.cards.iter().all(|c| c.face == CardFace::Up));
    }

    #[test]
    fn test_deadlines_saturate_near_clock_limit() {
        let config = SessionConfig::default().with_preview(PreviewMode::Countdown { secs: 3 });
        let start = u64::MAX - 10;
        let mut s = Session::with_seed(pairs(&["A", "B"]), config, 4, start).unwrap();
        assert_eq!(s.next_deadline(), Some(u64::MAX));

        assert!(s.apply(SessionEvent::Tick, u64::MAX));
        assert_eq!(s.phase(), Phase::Playing);
        sel(&mut s, "A1", u64::MAX);
        sel(&mut s, "B1", u64::MAX);
        assert_eq!(s.phase(), Phase::Evaluating);
        s.apply(SessionEvent::Tick, u64::MAX);
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.moves(), 1);
    }

    #[test]
    fn test_clock_ticks_refresh_display() {
        let mut s = playing(&["A", "B"]);
        s.apply(SessionEvent::Tick, 1_000);
        s.apply(SessionEvent::Tick, 2_000);
        assert_eq!(s.timer().ticks(), 2);
        assert_eq!(s.snapshot(2_500).displayed_secs, 2);
        assert_eq!(s.snapshot(2_500).elapsed_ms, 2_500);
    }

    #[test]
    fn test_missed_ticks_coalesce() {
        let mut s = playing(&["A", "B"]);
        s.apply(SessionEvent::Tick, 10_500);
        assert_eq!(s.timer().ticks(), 1);
        assert_eq!(s.next_deadline(), Some(11_000));
        assert_eq!(s.elapsed_ms(10_500), 10_500);
    }

    #[test]
    fn test_restart_resets_and_cancels() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 10);
        sel(&mut s, "B1", 20);
        assert_eq!(s.phase(), Phase::Evaluating);

        s.apply(SessionEvent::Restart, 30);
        assert_eq!(s.episode_id(), 1);
        assert_eq!(s.moves(), 0);
        assert!(s.selected().is_empty());
        assert_eq!(s.phase(), Phase::Playing);
        // Only the new episode's clock tick remains.
        assert_eq!(s.pending_callbacks(), 1);
        assert_eq!(s.timer().started_at(), Some(30));
    }

    #[test]
    fn test_stale_episode_callbacks_are_dropped() {
        let mut s = playing(&["A", "B"]);
        s.restart(0);
        // Inject an entry as if left behind by episode 0.
        s.scheduler.schedule(50, 0, Deferred::RevealExpired);
        sel(&mut s, "A1", 10);
        sel(&mut s, "B1", 20);
        s.apply(SessionEvent::Tick, 60);
        // The stale reveal must not have flipped the new pair back.
        assert_eq!(s.phase(), Phase::Evaluating);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 10);
        sel(&mut s, "B1", 20);
        assert!(s.apply(SessionEvent::Teardown, 30));
        assert_eq!(s.pending_callbacks(), 0);
        assert!(s.is_closed());

        assert!(!s.apply(SessionEvent::Tick, 5_000));
        assert_eq!(s.selected().len(), 2);
        assert!(!sel(&mut s, "A2", 5_000));
        assert!(!s.apply(SessionEvent::Teardown, 5_000));
    }

    #[test]
    fn test_restart_reopens_after_teardown() {
        let mut s = playing(&["A"]);
        s.apply(SessionEvent::Teardown, 10);
        s.apply(SessionEvent::Restart, 20);
        assert!(!s.is_closed());
        assert!(sel(&mut s, "A1", 30));
    }

    #[test]
    fn test_restart_reshuffles_from_original_order() {
        let mut s = playing(&["A", "B", "C", "D", "E", "F"]);
        let original: Vec<Card> = s.deck().cards().to_vec();
        let first = s.layout().to_vec();
        s.restart(0);
        assert_eq!(s.deck().cards(), original.as_slice());
        // Same multiset, new ordering from the advanced RNG.
        assert_eq!(s.layout().len(), first.len());
        assert_ne!(s.layout(), first.as_slice());
    }

    #[test]
    fn test_snapshot_selectable_flags() {
        let mut s = playing(&["A", "B"]);
        sel(&mut s, "A1", 1);
        sel(&mut s, "A2", 2);
        sel(&mut s, "B1", 3);
        let snap = s.snapshot(3);
        let a1 = snap.card(&CardId::from("A1")).unwrap();
        assert_eq!(a1.face, CardFace::Matched);
        assert!(!a1.selectable);
        let b1 = snap.card(&CardId::from("B1")).unwrap();
        assert!(b1.selected);
        assert_eq!(b1.face, CardFace::Up);
        assert!(!b1.selectable);
        let b2 = snap.card(&CardId::from("B2")).unwrap();
        assert!(b2.selectable);
        assert_eq!(snap.face_up_count(), 3);
    }

    #[test]
    fn test_transition_is_deterministic() {
        let events = [
            SessionEvent::select("A1"),
            SessionEvent::select("B1"),
            SessionEvent::Tick,
            SessionEvent::select("B2"),
        ];
        let run = || {
            let mut s = playing(&["A", "B"]);
            for (i, e) in events.iter().enumerate() {
                s = s.transition(e.clone(), (i as u64 + 1) * 1_000);
            }
            s.snapshot(10_000)
        };
        assert_eq!(run(), run());
    }
}
