//! Session configuration

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_PREVIEW_SECS, MISMATCH_REVEAL_MS, TIMER_TICK_MS};

/// What happens before play begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode")]
pub enum PreviewMode {
    /// Show every card for `secs` seconds, then flip all face-down.
    Countdown { secs: u32 },
    /// Study mode: play starts at once and unmatched cards stay face-up.
    AlwaysVisible,
    /// No preview; play starts face-down.
    Off,
}

impl PreviewMode {
    /// Map the host's integer setting: `0` means study mode.
    pub fn from_secs(secs: u32) -> Self {
        if secs == 0 {
            PreviewMode::AlwaysVisible
        } else {
            PreviewMode::Countdown { secs }
        }
    }

    /// Collapse `Countdown { secs: 0 }` into study mode.
    pub fn normalized(self) -> Self {
        match self {
            PreviewMode::Countdown { secs: 0 } => PreviewMode::AlwaysVisible,
            other => other,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            PreviewMode::Countdown { secs } => *secs as u64 * 1000,
            PreviewMode::AlwaysVisible | PreviewMode::Off => 0,
        }
    }
}

impl Default for PreviewMode {
    fn default() -> Self {
        PreviewMode::Countdown {
            secs: DEFAULT_PREVIEW_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub preview: PreviewMode,
    /// How long a mismatched pair stays face-up. `0` flips back at once.
    pub mismatch_reveal_ms: u32,
    /// Game clock display refresh interval.
    pub tick_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            preview: PreviewMode::default(),
            mismatch_reveal_ms: MISMATCH_REVEAL_MS,
            tick_ms: TIMER_TICK_MS,
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    ///
    /// - `MEMORY_MATCH_PREVIEW_SECS`: preview length, `0` for study mode
    /// - `MEMORY_MATCH_REVEAL_MS`: mismatch reveal delay
    /// - `MEMORY_MATCH_TICK_MS`: clock refresh interval
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());

        let preview = parse("MEMORY_MATCH_PREVIEW_SECS")
            .map(PreviewMode::from_secs)
            .unwrap_or(defaults.preview);
        let mismatch_reveal_ms =
            parse("MEMORY_MATCH_REVEAL_MS").unwrap_or(defaults.mismatch_reveal_ms);
        let tick_ms = parse("MEMORY_MATCH_TICK_MS")
            .filter(|&ms| ms > 0)
            .unwrap_or(defaults.tick_ms);

        Self {
            preview,
            mismatch_reveal_ms,
            tick_ms,
        }
    }

    /// Same config with the preview mode in canonical form.
    pub fn normalized(mut self) -> Self {
        self.preview = self.preview.normalized();
        self
    }

    pub fn with_preview(mut self, preview: PreviewMode) -> Self {
        self.preview = preview;
        self
    }

    pub fn with_mismatch_reveal_ms(mut self, ms: u32) -> Self {
        self.mismatch_reveal_ms = ms;
        self
    }
}
