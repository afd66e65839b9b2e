//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-game rules, session state machine and
//! scoring. It has **no dependencies** on rendering, networking or storage:
//!
//! - **Deterministic**: same deck, seed and event sequence give the same game
//! - **Clock-free**: every transition receives `now` in milliseconds
//! - **Cancellation-safe**: deferred work is owned by the session and dropped
//!   on restart or teardown
//!
//! # Module Structure
//!
//! - [`deck`]: deck validation (every pair id on exactly two cards)
//! - [`rng`]: injectable random sources and the Fisher-Yates shuffle
//! - [`session`]: the Preview → Playing ⇄ Evaluating → Complete state machine
//! - [`scheduler`]: cancellable deferred callbacks keyed by deadline
//! - [`timer`]: timestamp-based game clock
//! - [`scoring`]: star rating and perfect-game detection
//! - [`snapshot`]: render-ready session state and the completion summary
//! - [`driver`]: thin host adapter pairing a session with a clock
//!
//! # Example
//!
//! ```
//! use memory_match_core::{PreviewMode, Session, SessionConfig};
//! use memory_match_types::{Card, Phase, SessionEvent};
//!
//! let cards = vec![Card::new("a1", "a", "Sun"), Card::new("a2", "a", "Sol")];
//! let config = SessionConfig::default().with_preview(PreviewMode::Off);
//! let mut session = Session::with_seed(cards, config, 12345, 0).unwrap();
//!
//! session.apply(SessionEvent::select("a1"), 400);
//! session.apply(SessionEvent::select("a2"), 900);
//!
//! assert_eq!(session.phase(), Phase::Complete);
//! let summary = session.take_completion().unwrap();
//! assert!(summary.perfect_game());
//! ```

pub mod clock;
pub mod config;
pub mod deck;
pub mod driver;
pub mod rng;
pub mod scheduler;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{PreviewMode, SessionConfig};
pub use deck::{Deck, DeckError};
pub use driver::Driver;
pub use rng::{shuffle, EntropyRng, RandomSource, SimpleRng};
pub use scheduler::{Deferred, Scheduler};
pub use scoring::{format_elapsed, is_perfect_game, rate, Rating, Tier};
pub use session::Session;
pub use snapshot::{CardView, SessionSnapshot, SessionSummary};
pub use timer::GameTimer;
