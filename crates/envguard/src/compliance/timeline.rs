use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::domain::{
    AmdalRequirement, CapaStatus, ComplianceReport, CorrectiveAction, IsoAudit, IsoObjective,
    LegalRecord, ReportStatus, WasteManifest, WasteStatus,
};
use super::events::ComplianceEvent;

/// Private per-invocation snapshot of every compliance domain. The caller
/// fetches all collections before the aggregation runs; the engine itself
/// never touches storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceSnapshot {
    pub legal: Vec<LegalRecord>,
    pub reports: Vec<ComplianceReport>,
    pub amdal: Vec<AmdalRequirement>,
    pub objectives: Vec<IsoObjective>,
    pub audits: Vec<IsoAudit>,
    pub corrective_actions: Vec<CorrectiveAction>,
    pub manifests: Vec<WasteManifest>,
}

/// Merged obligation timeline split into dashboard buckets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    /// Events inside the horizon window, ascending by date.
    pub upcoming: Vec<ComplianceEvent>,
    /// Overdue pending reports, open corrective actions, and breached
    /// storage deadlines, concatenated per source without cross-list
    /// de-duplication.
    pub action_required: Vec<ComplianceEvent>,
}

/// Every dated event in fixed domain order (legal, reports, AMDAL,
/// objectives, audits, waste). Records lacking the relevant date are
/// excluded here, never passed downstream with a null date.
fn dated_events(snapshot: &ComplianceSnapshot) -> Vec<ComplianceEvent> {
    let mut events = Vec::new();
    events.extend(snapshot.legal.iter().filter_map(ComplianceEvent::from_legal));
    events.extend(snapshot.reports.iter().filter_map(ComplianceEvent::from_report));
    events.extend(snapshot.amdal.iter().filter_map(ComplianceEvent::from_amdal));
    events.extend(
        snapshot
            .objectives
            .iter()
            .filter_map(ComplianceEvent::from_objective),
    );
    events.extend(snapshot.audits.iter().filter_map(ComplianceEvent::from_audit));
    events.extend(
        snapshot
            .manifests
            .iter()
            .filter_map(ComplianceEvent::from_manifest),
    );
    events
}

/// Full-year calendar view: every dated event across all domains, no
/// horizon filter, ascending by date.
pub fn calendar_events(snapshot: &ComplianceSnapshot) -> Vec<ComplianceEvent> {
    let mut events = dated_events(snapshot);
    events.sort_by_key(|event| event.date);
    events
}

/// Merge all domains into the dashboard buckets for the window
/// `[today, today + horizon_days]` (boundaries inclusive).
pub fn aggregate(snapshot: &ComplianceSnapshot, today: NaiveDate, horizon_days: i64) -> Timeline {
    let mut upcoming: Vec<ComplianceEvent> = dated_events(snapshot)
        .into_iter()
        .filter(|event| calendar::within_window(event.date, today, horizon_days))
        .collect();
    // Stable sort keeps domain insertion order for same-day events.
    upcoming.sort_by_key(|event| event.date);

    let mut action_required = Vec::new();

    action_required.extend(
        snapshot
            .reports
            .iter()
            .filter(|report| {
                report.status == ReportStatus::Pending
                    && report.due_date.is_some_and(|due| due < today)
            })
            .filter_map(ComplianceEvent::from_report),
    );

    // Open corrective actions without a due date are dropped as malformed
    // rather than failing the whole run.
    action_required.extend(
        snapshot
            .corrective_actions
            .iter()
            .filter(|action| action.status == CapaStatus::Open)
            .filter_map(ComplianceEvent::from_corrective_action),
    );

    action_required.extend(
        snapshot
            .manifests
            .iter()
            .filter(|manifest| {
                manifest.status == WasteStatus::Stored && manifest.storage_deadline() < today
            })
            .filter_map(ComplianceEvent::from_manifest),
    );

    Timeline {
        upcoming,
        action_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{WasteCategory, WasteUnit};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn report(id: &str, due: Option<NaiveDate>, status: ReportStatus) -> ComplianceReport {
        ComplianceReport {
            id: id.to_string(),
            title: format!("Report {id}"),
            due_date: due,
            status,
            manager_email: None,
        }
    }

    fn manifest(id: &str, generated: NaiveDate, window: i64, status: WasteStatus) -> WasteManifest {
        WasteManifest {
            id: id.to_string(),
            manifest_number: None,
            waste_code: "B322-4".to_string(),
            waste_type: "Paint sludge".to_string(),
            category: WasteCategory::Two,
            weight: 10.0,
            unit: WasteUnit::Kg,
            generation_date: generated,
            max_storage_days: window,
            status,
            manager_email: None,
        }
    }

    #[test]
    fn upcoming_is_sorted_and_window_bounded() {
        let today = date(2026, 6, 1);
        let snapshot = ComplianceSnapshot {
            reports: vec![
                report("late", Some(date(2026, 8, 30)), ReportStatus::Pending),
                report("soon", Some(date(2026, 6, 2)), ReportStatus::Pending),
                report("beyond", Some(date(2026, 9, 15)), ReportStatus::Pending),
                report("dateless", None, ReportStatus::Pending),
            ],
            ..Default::default()
        };

        let timeline = aggregate(&snapshot, today, 90);
        let ids: Vec<&str> = timeline.upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "late"]);
        assert!(timeline
            .upcoming
            .windows(2)
            .all(|pair| pair[0].date <= pair[1].date));
    }

    #[test]
    fn horizon_boundaries_are_inclusive() {
        let today = date(2026, 6, 1);
        let snapshot = ComplianceSnapshot {
            reports: vec![
                report("on-start", Some(today), ReportStatus::Pending),
                report("on-horizon", Some(date(2026, 8, 30)), ReportStatus::Pending),
            ],
            ..Default::default()
        };
        let timeline = aggregate(&snapshot, today, 90);
        assert_eq!(timeline.upcoming.len(), 2);
    }

    #[test]
    fn same_day_events_keep_domain_order() {
        let today = date(2026, 6, 1);
        let day = date(2026, 6, 10);
        let snapshot = ComplianceSnapshot {
            legal: vec![LegalRecord {
                id: "legal-1".to_string(),
                title: "PP 22/2021 review".to_string(),
                next_review_date: Some(day),
                compliant: true,
            }],
            reports: vec![report("rep-1", Some(day), ReportStatus::Pending)],
            ..Default::default()
        };
        let timeline = aggregate(&snapshot, today, 90);
        let ids: Vec<&str> = timeline.upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["legal-1", "rep-1"]);
    }

    #[test]
    fn action_required_concatenates_three_sources() {
        let today = date(2026, 6, 1);
        let snapshot = ComplianceSnapshot {
            reports: vec![
                report("overdue", Some(date(2026, 5, 20)), ReportStatus::Pending),
                report("submitted", Some(date(2026, 5, 20)), ReportStatus::Submitted),
            ],
            corrective_actions: vec![
                CorrectiveAction {
                    id: "capa-open".to_string(),
                    title: "Bund wall repair".to_string(),
                    due_date: Some(date(2026, 6, 20)),
                    status: CapaStatus::Open,
                },
                CorrectiveAction {
                    id: "capa-closed".to_string(),
                    title: "Label refresh".to_string(),
                    due_date: Some(date(2026, 6, 20)),
                    status: CapaStatus::Closed,
                },
                CorrectiveAction {
                    id: "capa-dateless".to_string(),
                    title: "Training".to_string(),
                    due_date: None,
                    status: CapaStatus::Open,
                },
            ],
            manifests: vec![
                manifest("wm-overdue", date(2026, 1, 1), 90, WasteStatus::Stored),
                manifest("wm-cleared", date(2026, 1, 1), 90, WasteStatus::Transported),
            ],
            ..Default::default()
        };

        let timeline = aggregate(&snapshot, today, 90);
        let ids: Vec<&str> = timeline
            .action_required
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["overdue", "capa-open", "wm-overdue"]);
    }

    #[test]
    fn calendar_view_applies_no_horizon() {
        let snapshot = ComplianceSnapshot {
            reports: vec![
                report("next-year", Some(date(2027, 3, 1)), ReportStatus::Pending),
                report("past", Some(date(2025, 1, 1)), ReportStatus::Approved),
            ],
            ..Default::default()
        };
        let events = calendar_events(&snapshot);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "past");
    }
}
