use cashlog::ledger::{Category, Movement, MovementKind};
use cashlog::time::parse_timestamp;

/// Builds a movement from literal field values, panicking on invalid
/// input since test data is expected to be well formed.
pub fn movement(
    kind: MovementKind,
    category: Category,
    label: &str,
    amount: f64,
    when: &str,
) -> Movement {
    Movement::new(
        kind,
        category,
        label,
        amount,
        parse_timestamp(when).expect("test timestamp"),
    )
    .expect("test movement")
}
