use std::path::Path;

use colored::Colorize;

use crate::ledger::{Ledger, Movement, MovementKind};
use crate::storage::SkippedRecord;
use crate::time::format_timestamp;

/// Renders an amount with two decimal digits and the currency symbol.
/// Each call returns a freshly owned string.
pub fn format_amount(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

/// Prints one line per movement followed by the signed total.
pub fn print_listing(ledger: &Ledger, currency: &str) {
    if ledger.is_empty() {
        println!("(no movements)");
    }
    for movement in ledger {
        println!("{}", movement_row(movement, currency));
    }
    let total = ledger.sum();
    let total_text = format_amount(total, currency);
    let total_text = if total < 0.0 {
        total_text.red()
    } else {
        total_text.green()
    };
    println!("-- Sum: {total_text}");
}

fn movement_row(movement: &Movement, currency: &str) -> String {
    // Pad before colorizing so the escape codes do not break alignment.
    let amount = format!("{:>12}", format_amount(movement.amount(), currency));
    let amount = match movement.kind() {
        MovementKind::Profit => amount.green(),
        MovementKind::Loss => amount.red(),
    };
    format!(
        "{:<6} {} {} {:<9} {}",
        movement.kind().name(),
        amount,
        format_timestamp(&movement.occurred_at()),
        movement.category().name(),
        movement.label(),
    )
}

/// Reports records the loader had to skip, one warning per line.
pub fn print_skipped(store_path: &Path, skipped: &[SkippedRecord]) {
    for record in skipped {
        eprintln!(
            "{}",
            format!(
                "WARNING: {}:{}: {} ({})",
                store_path.display(),
                record.line_number,
                record.reason,
                record.excerpt,
            )
            .yellow()
        );
    }
}

/// Confirmation after a successful interactive append.
pub fn print_appended(movement: &Movement, currency: &str, store_path: &Path) {
    println!(
        "{}",
        format!(
            "Recorded {} `{}` of {} at {} in {}",
            movement.kind().name(),
            movement.label(),
            format_amount(movement.amount(), currency),
            format_timestamp(&movement.occurred_at()),
            store_path.display(),
        )
        .green()
    );
}
