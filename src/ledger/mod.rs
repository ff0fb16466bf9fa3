//! The in-memory movement ledger: an ordered, owned, append-only
//! collection of movements with aggregation and filtering on top.

mod filter;
mod movement;

pub use filter::MovementFilter;
pub use movement::{Category, Movement, MovementKind, MAX_LABEL_BYTES};

/// An ordered sequence of movements, insertion order preserved. Appending
/// is the only mutation; filtering yields a fresh ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    movements: Vec<Movement>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_movements(movements: Vec<Movement>) -> Self {
        Self { movements }
    }

    /// Adds a movement at the tail. O(1) amortized.
    pub fn append(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.movements.iter()
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    /// Signed total of the ledger: profits add, losses subtract. An empty
    /// ledger sums to zero.
    pub fn sum(&self) -> f64 {
        self.movements
            .iter()
            .map(Movement::signed_amount)
            .sum()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Movement;
    type IntoIter = std::slice::Iter<'a, Movement>;

    fn into_iter(self) -> Self::IntoIter {
        self.movements.iter()
    }
}
