use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::calendar;
use super::domain::{WasteCategory, WasteManifest, WasteStatus};
use super::scoring::ScoringConfig;

/// Traffic-light state of a waste-code group's binding storage deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageHealth {
    Safe,
    Warning,
    Overdue,
}

impl StorageHealth {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Overdue => "Overdue",
        }
    }

    pub fn classify(days_left: i64, warning_days: i64) -> Self {
        if days_left < 0 {
            Self::Overdue
        } else if days_left <= warning_days {
            Self::Warning
        } else {
            Self::Safe
        }
    }
}

/// One calendar-month cell in a waste-code row (January = index 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCell {
    /// Month lies inside the active storage span.
    pub active: bool,
    /// Month of the oldest stored batch's generation date.
    pub starting: bool,
    /// Deadline month, carrying the group's health color.
    pub terminal: Option<StorageHealth>,
    /// A transport/processing event is recorded for this month,
    /// independent of the active coloring.
    pub completed: bool,
}

/// Yearly storage timeline for a single waste code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WasteTimelineRow {
    pub waste_code: String,
    pub waste_type: String,
    pub category: WasteCategory,
    pub deadline: Option<NaiveDate>,
    pub days_left: Option<i64>,
    pub health: Option<StorageHealth>,
    pub stored_count: usize,
    pub resolved_count: usize,
    pub cells: [MonthCell; 12],
}

/// Build the per-waste-code monthly cell matrix.
///
/// Within a group the single oldest stored batch is binding (FIFO): it is
/// first to breach the legal limit, and its own `max_storage_days` is used
/// since storage windows vary by generator classification. A group with no
/// stored records produces no active cells; a group with no resolved
/// records produces no completion markers.
pub fn classify(
    manifests: &[WasteManifest],
    today: NaiveDate,
    config: &ScoringConfig,
) -> Vec<WasteTimelineRow> {
    let mut groups: BTreeMap<&str, Vec<&WasteManifest>> = BTreeMap::new();
    for manifest in manifests {
        groups.entry(&manifest.waste_code).or_default().push(manifest);
    }

    groups
        .into_iter()
        .map(|(waste_code, records)| {
            let stored: Vec<&&WasteManifest> = records
                .iter()
                .filter(|record| record.status == WasteStatus::Stored)
                .collect();
            let resolved: Vec<&&WasteManifest> = records
                .iter()
                .filter(|record| record.status.is_resolved())
                .collect();

            let oldest = stored
                .iter()
                .min_by_key(|record| record.generation_date)
                .copied();

            let mut cells = [MonthCell::default(); 12];
            let mut deadline = None;
            let mut days_left = None;
            let mut health = None;

            if let Some(oldest) = oldest {
                let start = oldest.generation_date;
                let end = oldest.storage_deadline();
                let left = calendar::days_between(today, end);
                let state = StorageHealth::classify(left, config.storage_warning_days);

                for (index, active) in calendar::month_activity(start, end).into_iter().enumerate()
                {
                    cells[index].active = active;
                }
                cells[start.month0() as usize].starting = true;
                if end.year() - start.year() <= 1 {
                    let terminal = &mut cells[end.month0() as usize];
                    terminal.active = true;
                    terminal.terminal = Some(state);
                }

                deadline = Some(end);
                days_left = Some(left);
                health = Some(state);
            }

            for record in &resolved {
                cells[record.generation_date.month0() as usize].completed = true;
            }

            let representative = records.first().expect("group is never empty");
            WasteTimelineRow {
                waste_code: waste_code.to_string(),
                waste_type: representative.waste_type.clone(),
                category: representative.category,
                deadline,
                days_left,
                health,
                stored_count: stored.len(),
                resolved_count: resolved.len(),
                cells,
            }
        })
        .collect()
}
