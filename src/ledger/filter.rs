use chrono::Datelike;

use super::movement::{Category, Movement, MovementKind};
use super::Ledger;

/// A boolean test over a single movement, carrying its own typed
/// parameter. Evaluated by one dispatcher so callers never encode
/// parameters into anything untyped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementFilter {
    Kind(MovementKind),
    Category(Category),
    /// Matches the local calendar year of the movement.
    Year(i32),
    /// Matches the local calendar month (1..=12) of the movement.
    Month(u32),
}

impl MovementFilter {
    pub fn profits() -> Self {
        Self::Kind(MovementKind::Profit)
    }

    pub fn losses() -> Self {
        Self::Kind(MovementKind::Loss)
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        match self {
            MovementFilter::Kind(kind) => movement.kind() == *kind,
            MovementFilter::Category(category) => movement.category() == *category,
            MovementFilter::Year(year) => movement.occurred_at().year() == *year,
            MovementFilter::Month(month) => movement.occurred_at().month() == *month,
        }
    }
}

impl Ledger {
    /// Returns a new ledger holding clones of every movement the filter
    /// matches, in their original relative order. The source ledger is
    /// left untouched.
    pub fn filter(&self, filter: &MovementFilter) -> Ledger {
        self.filter_with(|movement| filter.matches(movement))
    }

    /// Closure-based variant of [`Ledger::filter`]; successive passes
    /// compose and commute for predicates over disjoint fields.
    pub fn filter_with<P>(&self, predicate: P) -> Ledger
    where
        P: Fn(&Movement) -> bool,
    {
        Ledger::from_movements(
            self.iter()
                .filter(|movement| predicate(movement))
                .cloned()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;

    fn movement(kind: MovementKind, category: Category, label: &str, when: &str) -> Movement {
        Movement::new(
            kind,
            category,
            label,
            10.0,
            parse_timestamp(when).unwrap(),
        )
        .unwrap()
    }

    fn sample() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.append(movement(
            MovementKind::Profit,
            Category::Job,
            "Salary",
            "2024-01-05 09:00:00",
        ));
        ledger.append(movement(
            MovementKind::Loss,
            Category::Food,
            "Lunch",
            "2024-01-05 13:00:00",
        ));
        ledger.append(movement(
            MovementKind::Loss,
            Category::Transport,
            "Bus",
            "2023-12-30 08:00:00",
        ));
        ledger
    }

    #[test]
    fn filters_by_kind() {
        let ledger = sample();
        let losses = ledger.filter(&MovementFilter::losses());
        assert_eq!(losses.len(), 2);
        assert!(losses.iter().all(|m| m.kind() == MovementKind::Loss));
    }

    #[test]
    fn filters_by_category() {
        let ledger = sample();
        let food = ledger.filter(&MovementFilter::Category(Category::Food));
        assert_eq!(food.len(), 1);
        assert_eq!(food.iter().next().unwrap().label(), "Lunch");
    }

    #[test]
    fn filters_by_local_calendar_year_and_month() {
        let ledger = sample();
        assert_eq!(ledger.filter(&MovementFilter::Year(2024)).len(), 2);
        assert_eq!(ledger.filter(&MovementFilter::Year(2023)).len(), 1);
        assert_eq!(ledger.filter(&MovementFilter::Month(12)).len(), 1);
    }

    #[test]
    fn filtering_leaves_source_untouched() {
        let ledger = sample();
        let before = ledger.clone();
        let _ = ledger.filter(&MovementFilter::profits());
        assert_eq!(ledger, before);
    }

    #[test]
    fn independent_filters_commute() {
        let ledger = sample();
        let year_then_kind = ledger
            .filter(&MovementFilter::Year(2024))
            .filter(&MovementFilter::losses());
        let kind_then_year = ledger
            .filter(&MovementFilter::losses())
            .filter(&MovementFilter::Year(2024));
        assert_eq!(year_then_kind, kind_then_year);
    }

    #[test]
    fn trivial_predicates() {
        let ledger = sample();
        assert_eq!(ledger.filter_with(|_| true), ledger);
        assert!(ledger.filter_with(|_| false).is_empty());
    }
}
