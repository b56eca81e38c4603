// Lifecycle Status - classification rules as data
// Each status yields a rule set (badges, excluded columns, reference date)
// that the field composer consumes; the composer never hard-codes a rule.

use crate::records::{master_col, AnimalRecord};
use serde::{Deserialize, Serialize};

/// Watch-marker glyphs accepted as "flagged for attention".
/// Circle variants copied from the data convention; widening the set is a
/// data-owner decision, not a matching heuristic.
pub const WATCH_MARKS: &[&str] = &["○", "◯", "〇", "●", "◎"];

// ============================================================================
// LIFECYCLE STATUS
// ============================================================================

/// Lifecycle classification of one animal, derived from the raw status cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleStatus {
    Dead,
    Culled,
    Shipped,
    Active,
    /// Any other non-empty status cell, kept as a literal label.
    Unrecognized(String),
}

impl LifecycleStatus {
    /// Classify a raw status cell. Empty (after trim) means the animal is
    /// still in the herd.
    pub fn classify(status_raw: &str) -> Self {
        match status_raw.trim() {
            "死亡" => LifecycleStatus::Dead,
            "淘汰" => LifecycleStatus::Culled,
            "出荷" => LifecycleStatus::Shipped,
            "" => LifecycleStatus::Active,
            other => LifecycleStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn is_shipped(&self) -> bool {
        matches!(self, LifecycleStatus::Shipped)
    }
}

/// True iff the watch cell holds one of the accepted circle glyphs.
pub fn is_watch_flagged(watch_mark: Option<&str>) -> bool {
    match watch_mark {
        Some(mark) => WATCH_MARKS.contains(&mark.trim()),
        None => false,
    }
}

// ============================================================================
// BADGES
// ============================================================================

/// Visual kind of a badge; the presenter maps this to styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeStyle {
    Active,
    Watch,
    Ship,
    Cull,
    Dead,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub style: BadgeStyle,
}

impl Badge {
    fn new(label: &str, style: BadgeStyle) -> Self {
        Badge {
            label: label.to_string(),
            style,
        }
    }
}

// ============================================================================
// RULE SET
// ============================================================================

/// Which date the age/elapsed-day derivations run up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceDate {
    /// The injected "today" (animals still in the herd).
    Today,
    /// The slaughter date (animals that have left the herd).
    SlaughterDate,
}

/// Per-status rule set consumed by the field composer.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRules {
    pub status: LifecycleStatus,
    pub badges: Vec<Badge>,
    /// Master columns never shown raw for this status.
    pub excluded_columns: Vec<&'static str>,
    pub reference: ReferenceDate,
}

/// Resolve the rule set for one record. Pure: same record in, same rules
/// out — there is no transition history to consult.
pub fn resolve_rules(animal: &AnimalRecord) -> StatusRules {
    let status = LifecycleStatus::classify(&animal.status_raw);

    match &status {
        LifecycleStatus::Dead => StatusRules {
            status,
            badges: vec![Badge::new("死亡", BadgeStyle::Dead)],
            excluded_columns: vec![master_col::BARN],
            reference: ReferenceDate::SlaughterDate,
        },
        LifecycleStatus::Culled => StatusRules {
            status,
            badges: vec![Badge::new("淘汰", BadgeStyle::Cull)],
            excluded_columns: vec![master_col::BARN],
            reference: ReferenceDate::SlaughterDate,
        },
        LifecycleStatus::Shipped => StatusRules {
            status,
            badges: vec![Badge::new("出荷", BadgeStyle::Ship)],
            excluded_columns: vec![master_col::BARN, master_col::SHIP_WEIGHT],
            reference: ReferenceDate::SlaughterDate,
        },
        LifecycleStatus::Active => {
            let mut badges = vec![Badge::new("飼養中", BadgeStyle::Active)];
            if is_watch_flagged(animal.watch_mark.as_deref()) {
                badges.push(Badge::new("注視", BadgeStyle::Watch));
            }
            StatusRules {
                status,
                badges,
                excluded_columns: vec![],
                reference: ReferenceDate::Today,
            }
        }
        LifecycleStatus::Unrecognized(label) => StatusRules {
            badges: vec![Badge::new(label, BadgeStyle::Neutral)],
            status,
            excluded_columns: vec![],
            reference: ReferenceDate::Today,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
