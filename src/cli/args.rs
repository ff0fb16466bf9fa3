use std::path::PathBuf;

use clap::Parser;

use crate::errors::LedgerError;
use crate::ledger::{Category, MovementFilter};

/// Command-line surface: without flags the store is loaded, filtered and
/// listed with its total; `--new` switches to interactive entry.
#[derive(Debug, Parser)]
#[command(name = "cashlog", version, about = "Personal ledger of money movements")]
pub struct Args {
    /// Record one new movement interactively and exit
    #[arg(short = 'n', long = "new")]
    pub new: bool,

    /// Path of the flat store file (overrides the configured location)
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Keep only profits
    #[arg(long, conflicts_with = "losses")]
    pub profits: bool,

    /// Keep only losses
    #[arg(long)]
    pub losses: bool,

    /// Keep only movements of this category (Job, Food, Transport, Other)
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Keep only movements in this calendar year
    #[arg(long, value_name = "YEAR")]
    pub year: Option<i32>,

    /// Keep only movements in this calendar month (1-12)
    #[arg(long, value_name = "MONTH", value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,
}

impl Args {
    /// Translates the filter flags into filter passes, applied in a fixed
    /// order. The predicates cover disjoint fields, so the order does not
    /// affect the result.
    pub fn filters(&self) -> Result<Vec<MovementFilter>, LedgerError> {
        let mut filters = Vec::new();
        if self.profits {
            filters.push(MovementFilter::profits());
        }
        if self.losses {
            filters.push(MovementFilter::losses());
        }
        if let Some(name) = &self.category {
            let category = Category::from_name(name).ok_or_else(|| {
                LedgerError::InvalidArgument(format!(
                    "unknown category `{name}` (expected Job, Food, Transport or Other)"
                ))
            })?;
            filters.push(MovementFilter::Category(category));
        }
        if let Some(year) = self.year {
            filters.push(MovementFilter::Year(year));
        }
        if let Some(month) = self.month {
            filters.push(MovementFilter::Month(month));
        }
        Ok(filters)
    }
}
