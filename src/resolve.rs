// Resolution - one lookup, one fresh ViewModel
// The session owns the store (or nothing, before load completes) and wires
// status rules → field composition → series merge. Lookups never mutate
// the tables, so repeat calls with the same inputs give identical output.

use crate::compose::{compose_fields, Field};
use crate::series::{build_series, WeightPoint};
use crate::status::{resolve_rules, Badge, LifecycleStatus};
use crate::store::{normalize_tag, RecordStore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

/// Lookup outcomes that are the caller's problem, not the data's.
///
/// Malformed cells never surface here — they degrade inside composition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("個体識別番号を入力してください。")]
    EmptyInput,

    #[error("該当する牛が見つかりませんでした。(個体識別番号: {tag})")]
    NotFound { tag: String },

    #[error("データがまだ読み込まれていません。")]
    NotLoaded,
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// Passive, presentation-ready result of one lookup. Owned by the caller;
/// the presenter paints badges, the field grid, and the weight series from
/// it without touching the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub id: String,
    pub status: LifecycleStatus,
    pub badges: Vec<Badge>,
    pub fields: Vec<Field>,
    /// Ascending (oldest first). Presenters wanting newest-first reverse
    /// this series instead of re-deriving it.
    pub weight_series: Vec<WeightPoint>,
}

// ============================================================================
// SESSION
// ============================================================================

/// One viewing session over the two snapshot tables.
///
/// Starts empty; `attach` installs the loaded store. Resolving before the
/// store is attached is a `NotLoaded` outcome, distinct from `NotFound`.
#[derive(Default)]
pub struct Session {
    store: Option<RecordStore>,
}

impl Session {
    pub fn new() -> Self {
        Session { store: None }
    }

    /// Install the loaded tables. Called once, after both files loaded.
    pub fn attach(&mut self, store: RecordStore) {
        self.store = Some(store);
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve one identifier into a fresh ViewModel.
    ///
    /// `today` is injected so derivations for animals still in the herd
    /// are reproducible in tests and idempotent across calls.
    pub fn resolve(&self, tag: &str, today: NaiveDate) -> Result<ViewModel, LookupError> {
        let store = self.store.as_ref().ok_or(LookupError::NotLoaded)?;

        let tag = normalize_tag(tag);
        if tag.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let animal = store.find_animal(tag).ok_or_else(|| LookupError::NotFound {
            tag: tag.to_string(),
        })?;

        let rules = resolve_rules(animal);
        let fields = compose_fields(animal, &rules, today);
        let history = store.find_weights(tag);
        let weight_series = build_series(animal, &history, rules.status.is_shipped());

        Ok(ViewModel {
            id: animal.id.clone(),
            status: rules.status,
            badges: rules.badges,
            fields,
            weight_series,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Row;
    use crate::records::{master_col, weight_col};
    use crate::series::Provenance;
    use crate::status::BadgeStyle;
    use std::collections::HashMap;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn shipped_session() -> Session {
        let master = vec![row(&[
            (master_col::ID, "1234567890"),
            (master_col::STATUS, "出荷"),
            (master_col::BIRTH_DATE, "2020/1/1"),
            (master_col::INTRO_DATE, "2024/1/1"),
            (master_col::INTRO_WEIGHT, "280"),
            (master_col::BARN, "A-3"),
            (master_col::CARCASS_WEIGHT, "450"),
            (master_col::UNIT_PRICE, "1,200"),
            (master_col::SHIP_WEIGHT, "750"),
            (master_col::SLAUGHTER_DATE, "2024/6/1"),
        ])];
        let weight = vec![
            row(&[
                (weight_col::ID, "1234567890"),
                (weight_col::MEASURED_DATE, "2024/2/1"),
                (weight_col::WEIGHT, "350"),
            ]),
            row(&[
                (weight_col::ID, "1234567890"),
                (weight_col::MEASURED_DATE, "2024/1/1"),
                (weight_col::WEIGHT, "300"),
            ]),
        ];

        let mut session = Session::new();
        session.attach(RecordStore::from_rows(&master, &weight));
        session
    }

    #[test]
    fn test_not_loaded_before_attach() {
        let session = Session::new();
        let result = session.resolve("1234567890", date(2024, 6, 10));
        assert_eq!(result.unwrap_err(), LookupError::NotLoaded);
    }

    #[test]
    fn test_empty_input() {
        let session = shipped_session();
        let result = session.resolve("   ", date(2024, 6, 10));
        assert_eq!(result.unwrap_err(), LookupError::EmptyInput);
    }

    #[test]
    fn test_not_found_is_outcome_not_panic() {
        let session = shipped_session();
        let result = session.resolve("0000000000", date(2024, 6, 10));
        assert_eq!(
            result.unwrap_err(),
            LookupError::NotFound {
                tag: "0000000000".to_string()
            }
        );
    }

    #[test]
    fn test_shipped_view_model_complete() {
        let session = shipped_session();
        let vm = session.resolve("1234567890", date(2024, 6, 10)).unwrap();

        assert_eq!(vm.id, "1234567890");
        assert_eq!(vm.status, LifecycleStatus::Shipped);
        assert_eq!(vm.badges.len(), 1);
        assert_eq!(vm.badges[0].style, BadgeStyle::Ship);

        // Raw ship weight and barn suppressed; derived fields appended.
        assert!(vm.fields.iter().all(|f| f.label != master_col::SHIP_WEIGHT));
        assert!(vm.fields.iter().all(|f| f.label != master_col::BARN));
        let price = vm.fields.iter().find(|f| f.label == "枝肉金額").unwrap();
        assert_eq!(price.value, "540,000");
        let yield_field = vm.fields.iter().find(|f| f.label == "歩留まり").unwrap();
        assert_eq!(yield_field.value, "60.0%");

        // Series still carries the shipment boundary point.
        assert_eq!(vm.weight_series.len(), 4);
        assert_eq!(vm.weight_series[0].date, date(2024, 1, 1));
        assert_eq!(vm.weight_series[0].provenance, Provenance::History);
        assert_eq!(vm.weight_series[1].provenance, Provenance::Intake);
        assert_eq!(vm.weight_series[2].date, date(2024, 2, 1));
        assert_eq!(vm.weight_series[3].provenance, Provenance::Shipment);
        assert_eq!(vm.weight_series[3].weight, 750.0);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let session = shipped_session();
        let today = date(2024, 6, 10);
        let first = session.resolve("1234567890", today).unwrap();
        let second = session.resolve("1234567890", today).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_intake_date_never_a_raw_field() {
        // Bookkeeping columns surface as series points, not grid fields.
        let session = shipped_session();
        let vm = session.resolve("1234567890", date(2024, 6, 10)).unwrap();
        assert!(vm.fields.iter().all(|f| f.label != master_col::INTRO_DATE));
        assert!(vm
            .fields
            .iter()
            .all(|f| f.label != master_col::INTRO_WEIGHT));
    }

    #[test]
    fn test_active_watch_view_model() {
        let master = vec![row(&[
            (master_col::ID, "5555555555"),
            (master_col::WATCH, "○"),
            (master_col::BIRTH_DATE, "2023/6/10"),
            (master_col::BARN, "B-1"),
        ])];
        let mut session = Session::new();
        session.attach(RecordStore::from_rows(&master, &[]));

        let vm = session.resolve("5555555555", date(2024, 6, 10)).unwrap();
        assert_eq!(vm.status, LifecycleStatus::Active);
        assert_eq!(vm.badges.len(), 2);
        assert_eq!(vm.badges[1].style, BadgeStyle::Watch);

        // Active animals keep the barn field; age runs to today.
        let barn = vm.fields.iter().find(|f| f.label == master_col::BARN);
        assert!(barn.is_some());
        let birth = vm
            .fields
            .iter()
            .find(|f| f.label == master_col::BIRTH_DATE)
            .unwrap();
        assert_eq!(birth.value, "2023/6/10 (1.0才)");
    }
}
