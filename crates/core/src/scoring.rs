//! Scoring module - star rating and perfect-game detection
//!
//! A perfect game takes exactly one comparison per pair. Ratings are tiered
//! against that minimum:
//! - `moves <= pairs` earns three stars
//! - `moves <= pairs * 1.5` earns two stars
//! - anything else earns one star
//!
//! Boundaries resolve to the better tier. All arithmetic is integer so the
//! 1.5x threshold never suffers rounding.

use serde::{Deserialize, Serialize};

use crate::types::MAX_STARS;

/// Rating tier, ordered worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bottom,
    Middle,
    Top,
}

impl Tier {
    pub fn stars(&self) -> u8 {
        match self {
            Tier::Bottom => 1,
            Tier::Middle => 2,
            Tier::Top => MAX_STARS,
        }
    }
}

/// End-of-session rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub tier: Tier,
    pub perfect_game: bool,
}

impl Rating {
    pub fn stars(&self) -> u8 {
        self.tier.stars()
    }
}

/// A game is perfect when no comparison was wasted.
pub fn is_perfect_game(moves: u32, total_pairs: u32) -> bool {
    moves == total_pairs
}

/// Rate a finished game against the deck's own pair count.
pub fn rate(moves: u32, total_pairs: u32) -> Rating {
    let moves = moves as u64;
    let pairs = total_pairs as u64;

    let tier = if moves <= pairs {
        Tier::Top
    } else if moves * 2 <= pairs * 3 {
        Tier::Middle
    } else {
        Tier::Bottom
    };

    Rating {
        tier,
        perfect_game: moves == pairs,
    }
}

/// Format a duration as `m:ss` (minutes unpadded, seconds zero-padded).
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let seconds = elapsed_ms / 1000;
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
