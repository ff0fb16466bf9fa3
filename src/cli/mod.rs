//! Thin command-line layer over the ledger core: flag parsing,
//! interactive entry, and colorized listing output.

mod args;
mod entry;
mod output;

pub use args::Args;
pub use output::format_amount;

use clap::Parser;
use tracing::info;

use crate::config::ConfigManager;
use crate::errors::LedgerError;
use crate::storage::FlatFileStore;

/// Runs the CLI end to end. Returns an error only for fatal conditions;
/// a missing store is an empty ledger, not a failure.
pub fn run_cli() -> Result<(), LedgerError> {
    let args = Args::parse();
    let config = ConfigManager::new().load()?;
    let store = FlatFileStore::new(config.store_path(args.file.as_deref()));

    if args.new {
        let movement = entry::prompt_new_movement()?;
        store.append(&movement)?;
        info!(path = %store.path().display(), "movement appended");
        output::print_appended(&movement, &config.currency, store.path());
        return Ok(());
    }

    let report = store.load()?;
    output::print_skipped(store.path(), &report.skipped);

    let mut ledger = report.ledger;
    for filter in args.filters()? {
        ledger = ledger.filter(&filter);
    }
    output::print_listing(&ledger, &config.currency);
    Ok(())
}
