use std::fmt;

use chrono::{DateTime, Local};

use crate::errors::LedgerError;

/// Longest label accepted into the store, in bytes.
pub const MAX_LABEL_BYTES: usize = 128;

/// Whether a movement increases or decreases the balance. The amount
/// itself is always a non-negative magnitude; the sign is derived from
/// the kind during aggregation.
///
/// Codes 0/1 are stable: they round-trip through the flat store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    Profit,
    Loss,
}

impl MovementKind {
    pub fn code(self) -> u8 {
        match self {
            MovementKind::Profit => 0,
            MovementKind::Loss => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(MovementKind::Profit),
            1 => Some(MovementKind::Loss),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MovementKind::Profit => "Profit",
            MovementKind::Loss => "Loss",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Categorises movements for filtering and reporting.
///
/// Codes 0..=3 are stable: they round-trip through the flat store, so new
/// categories must extend the list, never renumber it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Job,
    Food,
    Transport,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Job,
        Category::Food,
        Category::Transport,
        Category::Other,
    ];

    pub fn code(self) -> u8 {
        match self {
            Category::Job => 0,
            Category::Food => 1,
            Category::Transport => 2,
            Category::Other => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Category::Job),
            1 => Some(Category::Food),
            2 => Some(Category::Transport),
            3 => Some(Category::Other),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Job => "Job",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup by display name, used for CLI input.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded financial event. Immutable once constructed; a ledger
/// only ever appends fresh movements.
#[derive(Debug, Clone, PartialEq)]
pub struct Movement {
    kind: MovementKind,
    category: Category,
    label: String,
    amount: f64,
    occurred_at: DateTime<Local>,
}

impl Movement {
    /// Builds a movement, validating the fields the store format relies
    /// on: a non-negative amount and a non-empty, single-line label of at
    /// most [`MAX_LABEL_BYTES`] bytes. The amount is normalized to cent
    /// precision, the granularity the store renders, so a movement always
    /// equals its own encode/decode round trip.
    pub fn new(
        kind: MovementKind,
        category: Category,
        label: impl Into<String>,
        amount: f64,
        occurred_at: DateTime<Local>,
    ) -> Result<Self, LedgerError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(LedgerError::malformed_record("label must not be empty"));
        }
        if label.contains('\n') || label.contains('\r') {
            return Err(LedgerError::malformed_record(
                "label must not contain line breaks",
            ));
        }
        if label.len() > MAX_LABEL_BYTES {
            return Err(LedgerError::malformed_record(format!(
                "label exceeds {MAX_LABEL_BYTES} bytes"
            )));
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::malformed_record(format!(
                "amount must be a non-negative number, got {amount}"
            )));
        }
        let amount = (amount * 100.0).round() / 100.0;
        Ok(Self {
            kind,
            category,
            label,
            amount,
            occurred_at,
        })
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn occurred_at(&self) -> DateTime<Local> {
        self.occurred_at
    }

    /// Amount with the aggregation sign applied: positive for profits,
    /// negative for losses.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            MovementKind::Profit => self.amount,
            MovementKind::Loss => -self.amount,
        }
    }
}
