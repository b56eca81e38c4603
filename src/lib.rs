// Cattle Lookup - Core Library
// Record resolution and lifecycle-aware aggregation over the two snapshot
// tables (master.csv, weight.csv). Exposes all modules for the CLI and tests.

pub mod loader;
pub mod records;
pub mod store;
pub mod status;
pub mod compose;
pub mod series;
pub mod resolve;

// Re-export commonly used types
pub use loader::{load_table, Row};
pub use records::{master_col, weight_col, AnimalRecord, WeightObservation, DISPLAY_ORDER};
pub use store::{normalize_tag, RecordStore};
pub use status::{
    is_watch_flagged, resolve_rules, Badge, BadgeStyle, LifecycleStatus, ReferenceDate,
    StatusRules, WATCH_MARKS,
};
pub use compose::{
    age_years, compose_fields, elapsed_days, format_thousands, parse_date, parse_number, Field,
};
pub use series::{build_series, Provenance, WeightPoint};
pub use resolve::{LookupError, Session, ViewModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
