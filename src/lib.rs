//! Cashlog keeps a personal ledger of money movements (profits and
//! losses) in a flat semicolon-delimited text store, and offers
//! filtering and aggregation over it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod time;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive("cashlog=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}
