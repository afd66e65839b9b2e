//! Game clock
//!
//! Elapsed time is always `now - started_at`. Ticks only refresh the value a
//! host displays, so a late or missed tick never skews the reported duration.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameTimer {
    started_at: Option<u64>,
    stopped_at: Option<u64>,
    displayed_ms: u64,
    ticks: u32,
}

impl GameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. A second call is ignored.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now_ms);
        self.displayed_ms = 0;
        true
    }

    /// Freeze the clock. Only the first call has an effect.
    pub fn stop(&mut self, now_ms: u64) -> bool {
        if self.started_at.is_none() || self.stopped_at.is_some() {
            return false;
        }
        self.stopped_at = Some(now_ms);
        self.displayed_ms = self.elapsed_ms(now_ms);
        true
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    pub fn started_at(&self) -> Option<u64> {
        self.started_at
    }

    pub fn stopped(&self) -> bool {
        self.stopped_at.is_some()
    }

    /// Precise elapsed time as of `now_ms` (frozen once stopped).
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let Some(start) = self.started_at else {
            return 0;
        };
        let end = self.stopped_at.unwrap_or(now_ms);
        end.saturating_sub(start)
    }

    /// Refresh the displayed value.
    pub fn record_tick(&mut self, now_ms: u64) {
        if !self.is_running() {
            return;
        }
        self.displayed_ms = self.elapsed_ms(now_ms);
        self.ticks = self.ticks.wrapping_add(1);
    }

    /// Last displayed value in whole seconds.
    pub fn displayed_secs(&self) -> u64 {
        self.displayed_ms / 1000
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
