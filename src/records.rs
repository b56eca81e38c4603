// Typed Records - one coercion pass at the store boundary
// Rows arrive as string maps from the loader; everything downstream
// (status rules, field composition, series merge) works on typed
// optional fields instead of untyped maps.

use crate::loader::Row;
use serde::{Deserialize, Serialize};

// ============================================================================
// SOURCE COLUMN NAMES
// ============================================================================

/// Master table columns (headers as they appear in master.csv).
pub mod master_col {
    pub const ID: &str = "個体識別番号";
    pub const STATUS: &str = "ステータス";
    pub const WATCH: &str = "注視";
    pub const BIRTH_DATE: &str = "生年月日";
    pub const INTRO_DATE: &str = "導入日";
    pub const INTRO_WEIGHT: &str = "導入時";
    pub const BARN: &str = "牛舎";
    pub const MARKET: &str = "市場";
    pub const AUCTION_PRICE: &str = "落札金額";
    pub const SLAUGHTER_DATE: &str = "屠畜日";
    pub const CARCASS_WEIGHT: &str = "枝肉重量";
    pub const UNIT_PRICE: &str = "単価";
    pub const SHIP_WEIGHT: &str = "出荷時体重";
    pub const OMEGA_START: &str = "オメガ開始日";
    pub const COMMENT: &str = "コメント";
    pub const CAUTION: &str = "注意";
}

/// Weight table columns (headers as they appear in weight.csv).
pub mod weight_col {
    pub const ID: &str = "個体識別番号";
    pub const MEASURED_DATE: &str = "体重測定日";
    pub const WEIGHT: &str = "体重";
    pub const NOTE: &str = "報告";
}

/// Master columns shown in the field grid, in source column order.
/// Bookkeeping columns (id, status, watch mark, intake date/weight) are
/// surfaced as badges or series points instead and never listed here.
pub const DISPLAY_ORDER: &[&str] = &[
    master_col::BIRTH_DATE,
    master_col::BARN,
    master_col::MARKET,
    master_col::AUCTION_PRICE,
    master_col::SLAUGHTER_DATE,
    master_col::CARCASS_WEIGHT,
    master_col::UNIT_PRICE,
    master_col::SHIP_WEIGHT,
    master_col::OMEGA_START,
    master_col::COMMENT,
    master_col::CAUTION,
];

// ============================================================================
// ANIMAL RECORD
// ============================================================================

/// One row of the master table, typed.
///
/// Every cell is trimmed during coercion; a trimmed-empty cell becomes
/// `None`. `status_raw` keeps empty-string semantics (empty = active herd)
/// so it stays a plain `String`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub id: String,
    pub status_raw: String,
    pub watch_mark: Option<String>,
    pub birth_date: Option<String>,
    pub intro_date: Option<String>,
    pub intro_weight: Option<String>,
    pub barn: Option<String>,
    pub market: Option<String>,
    pub auction_price: Option<String>,
    pub slaughter_date: Option<String>,
    pub carcass_weight: Option<String>,
    pub unit_price: Option<String>,
    pub ship_weight: Option<String>,
    pub omega_start_date: Option<String>,
    pub comment: Option<String>,
    pub caution: Option<String>,
}

impl AnimalRecord {
    /// Coerce a string-keyed row into a typed record.
    ///
    /// Returns `None` when the identifier cell is blank — such rows cannot
    /// be looked up and are dropped at load time.
    pub fn from_row(row: &Row) -> Option<Self> {
        let id = trimmed(row, master_col::ID)?;

        Some(AnimalRecord {
            id,
            status_raw: row
                .get(master_col::STATUS)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            watch_mark: trimmed(row, master_col::WATCH),
            birth_date: trimmed(row, master_col::BIRTH_DATE),
            intro_date: trimmed(row, master_col::INTRO_DATE),
            intro_weight: trimmed(row, master_col::INTRO_WEIGHT),
            barn: trimmed(row, master_col::BARN),
            market: trimmed(row, master_col::MARKET),
            auction_price: trimmed(row, master_col::AUCTION_PRICE),
            slaughter_date: trimmed(row, master_col::SLAUGHTER_DATE),
            carcass_weight: trimmed(row, master_col::CARCASS_WEIGHT),
            unit_price: trimmed(row, master_col::UNIT_PRICE),
            ship_weight: trimmed(row, master_col::SHIP_WEIGHT),
            omega_start_date: trimmed(row, master_col::OMEGA_START),
            comment: trimmed(row, master_col::COMMENT),
            caution: trimmed(row, master_col::CAUTION),
        })
    }

    /// Raw value of a display column, by source column name.
    pub fn display_value(&self, column: &str) -> Option<&str> {
        let slot = match column {
            master_col::BIRTH_DATE => &self.birth_date,
            master_col::BARN => &self.barn,
            master_col::MARKET => &self.market,
            master_col::AUCTION_PRICE => &self.auction_price,
            master_col::SLAUGHTER_DATE => &self.slaughter_date,
            master_col::CARCASS_WEIGHT => &self.carcass_weight,
            master_col::UNIT_PRICE => &self.unit_price,
            master_col::SHIP_WEIGHT => &self.ship_weight,
            master_col::OMEGA_START => &self.omega_start_date,
            master_col::COMMENT => &self.comment,
            master_col::CAUTION => &self.caution,
            _ => return None,
        };
        slot.as_deref()
    }
}

// ============================================================================
// WEIGHT OBSERVATION
// ============================================================================

/// One row of the weight-history table, typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightObservation {
    pub id: String,
    pub measured_date: String,
    pub weight: String,
    pub note: String,
}

impl WeightObservation {
    /// Coerce a string-keyed row; rows without an identifier are dropped.
    pub fn from_row(row: &Row) -> Option<Self> {
        let id = trimmed(row, weight_col::ID)?;

        Some(WeightObservation {
            id,
            measured_date: row
                .get(weight_col::MEASURED_DATE)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            weight: row
                .get(weight_col::WEIGHT)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            note: row
                .get(weight_col::NOTE)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        })
    }
}

fn trimmed(row: &Row, key: &str) -> Option<String> {
    let value = row.get(key)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
