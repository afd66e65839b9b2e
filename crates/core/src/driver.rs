//! Host-side driver
//!
//! Wraps a [`Session`] with a [`Clock`] and keeps the latest snapshot. Every
//! event that changes the session re-snapshots and notifies the optional
//! observer, which is where a host plugs in its renderer.

use std::fmt;
use std::time::Duration;

use crate::clock::Clock;
use crate::rng::{RandomSource, SimpleRng};
use crate::session::Session;
use crate::snapshot::{SessionSnapshot, SessionSummary};
use crate::types::SessionEvent;

type Observer = Box<dyn FnMut(&SessionSnapshot)>;

pub struct Driver<C: Clock, R: RandomSource = SimpleRng> {
    session: Session<R>,
    clock: C,
    frame: SessionSnapshot,
    frames: u64,
    observer: Option<Observer>,
}

impl<C: Clock, R: RandomSource> Driver<C, R> {
    pub fn new(session: Session<R>, clock: C) -> Self {
        let frame = session.snapshot(clock.now_ms());
        Self {
            session,
            clock,
            frame,
            frames: 1,
            observer: None,
        }
    }

    /// Install a render hook; it is called once immediately.
    pub fn with_observer<F>(mut self, mut observer: F) -> Self
    where
        F: FnMut(&SessionSnapshot) + 'static,
    {
        observer(&self.frame);
        self.observer = Some(Box::new(observer));
        self
    }

    /// Apply an event at the clock's current time.
    pub fn dispatch(&mut self, event: SessionEvent) -> bool {
        let now = self.clock.now_ms();
        let changed = self.session.apply(event, now);
        if changed {
            self.refresh(now);
        }
        changed
    }

    /// Fire whatever deferred work is due.
    pub fn poll(&mut self) -> bool {
        self.dispatch(SessionEvent::Tick)
    }

    fn refresh(&mut self, now: u64) {
        self.session.snapshot_into(now, &mut self.frame);
        self.frames += 1;
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.frame);
        }
    }

    pub fn frame(&self) -> &SessionSnapshot {
        &self.frame
    }

    /// Number of snapshots produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn take_completion(&mut self) -> Option<SessionSummary> {
        self.session.take_completion()
    }

    /// How long a host loop may sleep before the next deferred callback.
    pub fn until_next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.session
            .next_deadline()
            .map(|due| Duration::from_millis(due.saturating_sub(now)))
    }
}

impl<C: Clock, R: RandomSource> fmt::Debug for Driver<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Driver")
            .field("episode_id", &self.frame.episode_id)
            .field("phase", &self.frame.phase)
            .field("frames", &self.frames)
            .finish()
    }
}
