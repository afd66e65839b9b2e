//! Shared helpers for integration tests.

#![allow(dead_code)]

use memory_match::types::{Card, CardKind};

pub mod logging {
    //! Test logging initialization
    //!
    //! Level comes from `TEST_LOG`, then `RUST_LOG`, then `warn`.

    use once_cell::sync::OnceCell;
    use tracing_subscriber::{fmt, EnvFilter};

    static INITIALIZED: OnceCell<()> = OnceCell::new();

    pub fn init() {
        INITIALIZED.get_or_init(|| {
            let filter = std::env::var("TEST_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .map(EnvFilter::new)
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .without_time()
                .try_init()
                .ok();
        });
    }
}

/// Two cards per pair id: `<p>1` (question) and `<p>2` (answer).
pub fn pair_deck(pair_ids: &[&str]) -> Vec<Card> {
    pair_ids
        .iter()
        .flat_map(|p| {
            [
                Card::new(format!("{p}1"), *p, format!("{p}?")).with_kind(CardKind::Question),
                Card::new(format!("{p}2"), *p, format!("{p}!")).with_kind(CardKind::Answer),
            ]
        })
        .collect()
}
