//! Memory match (workspace facade crate).
//!
//! Exposes `memory_match::{types, core, report}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use memory_match_core as core;
pub use memory_match_report as report;
pub use memory_match_types as types;
