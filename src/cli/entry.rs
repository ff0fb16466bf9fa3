use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::errors::LedgerError;
use crate::ledger::{Category, Movement, MovementKind, MAX_LABEL_BYTES};
use crate::time::{format_timestamp, parse_timestamp};

/// Prompts for every field of one movement. Each prompt validates its
/// input and re-asks on rejection, so a movement is only ever built from
/// fully validated values.
pub fn prompt_new_movement() -> Result<Movement, LedgerError> {
    let theme = ColorfulTheme::default();

    let kind_index = Select::with_theme(&theme)
        .with_prompt("Kind")
        .items(&[MovementKind::Profit.name(), MovementKind::Loss.name()])
        .default(0)
        .interact()
        .map_err(into_io)?;
    let kind = if kind_index == 0 {
        MovementKind::Profit
    } else {
        MovementKind::Loss
    };

    let category_names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
    let category_index = Select::with_theme(&theme)
        .with_prompt("Category")
        .items(&category_names)
        .default(0)
        .interact()
        .map_err(into_io)?;
    let category = Category::ALL[category_index];

    let label: String = Input::with_theme(&theme)
        .with_prompt("Label")
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() {
                return Err("label must not be empty".into());
            }
            if input.len() > MAX_LABEL_BYTES {
                return Err(format!("label must be at most {MAX_LABEL_BYTES} bytes"));
            }
            Ok(())
        })
        .interact_text()
        .map_err(into_io)?;

    let amount: f64 = Input::with_theme(&theme)
        .with_prompt("Amount")
        .validate_with(|input: &f64| -> Result<(), &str> {
            if input.is_finite() && *input >= 0.0 {
                Ok(())
            } else {
                Err("amount must be a non-negative number")
            }
        })
        .interact_text()
        .map_err(into_io)?;

    let timestamp_text: String = Input::with_theme(&theme)
        .with_prompt("Timestamp (YYYY-MM-DD HH:MM:SS)")
        .default(format_timestamp(&Local::now()))
        .validate_with(|input: &String| parse_timestamp(input).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .map_err(into_io)?;
    let occurred_at = parse_timestamp(&timestamp_text)?;

    Movement::new(kind, category, label.trim(), amount, occurred_at)
}

fn into_io(err: dialoguer::Error) -> LedgerError {
    match err {
        dialoguer::Error::IO(source) => LedgerError::Io(source),
    }
}
