// Field Composer - numeric/date derivations over one record
// Pure functions: the reference date is injected, never read from a clock.
// Malformed cells degrade (the derived value is omitted); they never error.

use crate::records::{master_col, AnimalRecord, DISPLAY_ORDER};
use crate::status::{ReferenceDate, StatusRules};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One label/value pair of the field grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub value: String,
}

impl Field {
    fn new(label: &str, value: String) -> Self {
        Field {
            label: label.to_string(),
            value,
        }
    }
}

// ============================================================================
// PARSING HELPERS
// ============================================================================

/// Parse a snapshot date cell. The tables carry `YYYY/M/D` or `YYYY-M-D`;
/// anything else is treated as unparsable.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .ok()
}

/// Tolerant numeric parse: grouping separators (ASCII and full-width
/// comma) are stripped first. Returns `None` for anything non-numeric.
pub fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '，')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Whole days from `start` to `end` on the calendar (no time-of-day).
pub fn elapsed_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Age in years at `reference`, one decimal, astronomical-year divisor.
pub fn age_years(birth: NaiveDate, reference: NaiveDate) -> f64 {
    let days = elapsed_days(birth, reference) as f64;
    (days / 365.25 * 10.0).round() / 10.0
}

/// Group an integer with thousands separators: 540000 → "540,000".
pub fn format_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Build the field grid for one record under its status rule set.
///
/// Raw fields appear in source column order, minus the status's excluded
/// columns and minus empty cells; derived fields are appended last.
pub fn compose_fields(animal: &AnimalRecord, rules: &StatusRules, today: NaiveDate) -> Vec<Field> {
    let reference = match rules.reference {
        ReferenceDate::Today => Some(today),
        ReferenceDate::SlaughterDate => animal.slaughter_date.as_deref().and_then(parse_date),
    };

    let mut fields = Vec::new();

    for column in DISPLAY_ORDER {
        if rules.excluded_columns.contains(column) {
            continue;
        }
        let Some(raw) = animal.display_value(column) else {
            continue;
        };

        let value = match *column {
            master_col::BIRTH_DATE => annotate_age(raw, reference),
            master_col::OMEGA_START => annotate_elapsed(raw, reference),
            _ => raw.to_string(),
        };
        fields.push(Field::new(column, value));
    }

    if rules.status.is_shipped() {
        if let Some(price) = carcass_price(animal) {
            fields.push(Field::new("枝肉金額", price));
        }
        if let Some(yield_pct) = dressing_yield(animal) {
            fields.push(Field::new("歩留まり", yield_pct));
        }
    }

    fields
}

/// Birth date with `" (<age>才)"` appended when both dates parse.
fn annotate_age(raw: &str, reference: Option<NaiveDate>) -> String {
    match (parse_date(raw), reference) {
        (Some(birth), Some(reference)) => {
            format!("{} ({:.1}才)", raw, age_years(birth, reference))
        }
        _ => raw.to_string(),
    }
}

/// Omega start date with `" (<N>日)"` appended when both dates parse.
fn annotate_elapsed(raw: &str, reference: Option<NaiveDate>) -> String {
    match (parse_date(raw), reference) {
        (Some(start), Some(reference)) => {
            format!("{} ({}日)", raw, elapsed_days(start, reference))
        }
        _ => raw.to_string(),
    }
}

/// Carcass weight × unit price, floored, grouped. Shipped records only.
fn carcass_price(animal: &AnimalRecord) -> Option<String> {
    let carcass = animal.carcass_weight.as_deref().and_then(parse_number)?;
    let unit = animal.unit_price.as_deref().and_then(parse_number)?;
    Some(format_thousands((carcass * unit).floor() as i64))
}

/// Carcass weight / ship weight as a percentage, one decimal.
fn dressing_yield(animal: &AnimalRecord) -> Option<String> {
    let carcass = animal.carcass_weight.as_deref().and_then(parse_number)?;
    let ship = animal.ship_weight.as_deref().and_then(parse_number)?;
    if ship <= 0.0 {
        return None;
    }
    let pct = (carcass / ship * 100.0 * 10.0).round() / 10.0;
    Some(format!("{:.1}%", pct))
}

// ============================================================================
// TESTS
// ============================================================================
