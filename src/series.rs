// Weight Series Builder - merge observations from three provenances
// History rows plus the two synthetic boundary points (intake, shipment)
// become one ascending series. Unparsable weights or dates drop out
// rather than erroring or risking an undefined sort.

use crate::compose::{parse_date, parse_number};
use crate::records::{AnimalRecord, WeightObservation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a series point came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// A row of the weight-history table.
    History,
    /// Synthesized from the master row's intake date/weight.
    Intake,
    /// Synthesized from the master row's slaughter date/ship weight.
    Shipment,
}

/// One point of the merged weight series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    pub weight: f64,
    pub note: String,
    pub provenance: Provenance,
}

/// Build the merged series, ascending by date.
///
/// Append order is history → intake → shipment, and the sort is stable, so
/// date ties keep history points ahead of synthetic boundary points. The
/// shipment point is only attached for shipped animals; `include_shipment`
/// carries that status decision in from the resolver.
pub fn build_series(
    animal: &AnimalRecord,
    history: &[&WeightObservation],
    include_shipment: bool,
) -> Vec<WeightPoint> {
    let mut points = Vec::with_capacity(history.len() + 2);

    for obs in history {
        let Some(weight) = parse_number(&obs.weight) else {
            continue;
        };
        let Some(date) = parse_date(&obs.measured_date) else {
            continue;
        };
        points.push(WeightPoint {
            date,
            weight,
            note: obs.note.clone(),
            provenance: Provenance::History,
        });
    }

    if let Some(point) = boundary_point(
        animal.intro_date.as_deref(),
        animal.intro_weight.as_deref(),
        "導入時",
        Provenance::Intake,
    ) {
        points.push(point);
    }

    if include_shipment {
        if let Some(point) = boundary_point(
            animal.slaughter_date.as_deref(),
            animal.ship_weight.as_deref(),
            "出荷時",
            Provenance::Shipment,
        ) {
            points.push(point);
        }
    }

    points.sort_by_key(|p| p.date);
    points
}

fn boundary_point(
    date: Option<&str>,
    weight: Option<&str>,
    note: &str,
    provenance: Provenance,
) -> Option<WeightPoint> {
    let date = date.and_then(parse_date)?;
    let weight = weight.and_then(parse_number)?;
    Some(WeightPoint {
        date,
        weight,
        note: note.to_string(),
        provenance,
    })
}

// ============================================================================
// TESTS
// ============================================================================
