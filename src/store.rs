// RecordStore - owned, read-only access to the two snapshot tables
// Replaces the source's module-level mutable arrays with an explicitly
// owned instance: load once per session, look up any number of times,
// never mutate.

use crate::loader::Row;
use crate::records::{AnimalRecord, WeightObservation};

/// Trim the operator-entered tag. Extraction of a 10-digit tag from
/// scanner text happens before this layer; the store only normalizes.
pub fn normalize_tag(tag: &str) -> &str {
    tag.trim()
}

/// In-memory store over the master and weight tables.
pub struct RecordStore {
    animals: Vec<AnimalRecord>,
    weights: Vec<WeightObservation>,
}

impl RecordStore {
    /// Build the store from loader rows.
    ///
    /// This is the single coercion pass: rows without an identifier are
    /// dropped here, so every stored record is addressable.
    pub fn from_rows(master: &[Row], weight: &[Row]) -> Self {
        let animals = master.iter().filter_map(AnimalRecord::from_row).collect();
        let weights = weight
            .iter()
            .filter_map(WeightObservation::from_row)
            .collect();

        RecordStore { animals, weights }
    }

    /// Exact-match lookup on the normalized identifier.
    ///
    /// No partial or numeric-coerced matching; "0123" and "123" are
    /// different animals.
    pub fn find_animal(&self, tag: &str) -> Option<&AnimalRecord> {
        let tag = normalize_tag(tag);
        self.animals.iter().find(|a| a.id == tag)
    }

    /// All weight observations for the identifier, in table order.
    pub fn find_weights(&self, tag: &str) -> Vec<&WeightObservation> {
        let tag = normalize_tag(tag);
        self.weights.iter().filter(|w| w.id == tag).collect()
    }

    pub fn animal_count(&self) -> usize {
        self.animals.len()
    }

    pub fn weight_count(&self) -> usize {
        self.weights.len()
    }
}

// ============================================================================
// TESTS
// ============================================================================
