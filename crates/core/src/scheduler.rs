//! Deferred callback queue
//!
//! Preview expiry, the mismatch reveal delay and the game clock tick are all
//! deferred work. They live here as deadline entries rather than as real
//! timers, and fire only when the owner advances time past their deadline.
//!
//! Every entry remembers the episode that scheduled it. Owners drop entries
//! from an older episode, and `cancel_all` on restart/teardown guarantees no
//! entry outlives the session that created it.

/// Kind of deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Deferred {
    /// Preview countdown finished
    PreviewExpired,
    /// Mismatched pair may be flipped back
    RevealExpired,
    /// Game clock display refresh
    ClockTick,
}

/// Handle returned by [`Scheduler::schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// An entry whose deadline has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: Deferred,
    pub episode: u32,
    pub due_ms: u64,
}

#[derive(Debug, Clone)]
struct Entry {
    id: TimerId,
    due_ms: u64,
    episode: u32,
    kind: Deferred,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, episode: u32, kind: Deferred) -> TimerId {
        self.next_id = self.next_id.wrapping_add(1);
        let id = TimerId(self.next_id);
        self.entries.push(Entry {
            id,
            due_ms,
            episode,
            kind,
        });
        id
    }

    /// Cancel one entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Cancel every pending entry of one kind.
    pub fn cancel_kind(&mut self, kind: Deferred) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        before - self.entries.len()
    }

    /// Cancel everything. Returns how many entries were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, kind: Deferred) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Deadline of a pending entry of `kind`, if any.
    pub fn due_of(&self, kind: Deferred) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.due_ms)
            .min()
    }

    /// Earliest pending deadline.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }

    /// Remove and return the earliest entry due at or before `now_ms`.
    ///
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Fired> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.id))
            .map(|(i, _)| i)?;

        let e = self.entries.swap_remove(idx);
        Some(Fired {
            id: e.id,
            kind: e.kind,
            episode: e.episode,
            due_ms: e.due_ms,
        })
    }
}
