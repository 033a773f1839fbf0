use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calendar;
use super::domain::{ComplianceReport, ReportStatus, WasteManifest, WasteStatus};

/// Outbound reminder payload; templating and delivery belong to the
/// dispatcher, the engine only decides which items qualify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub recipient: String,
    pub subject: String,
    pub template_data: BTreeMap<String, String>,
}

/// Reports due exactly `lead_days` from `today` that are still pending or
/// were rejected (rejected ones get reminded too).
///
/// The equality check is the only idempotence guard: there is no durable
/// "already sent" flag, so a cron trigger re-run within the same day can
/// dispatch duplicates.
pub fn due_report_reminders(
    reports: &[ComplianceReport],
    today: NaiveDate,
    lead_days: i64,
) -> Vec<Reminder> {
    reports
        .iter()
        .filter(|report| {
            matches!(report.status, ReportStatus::Pending | ReportStatus::Rejected)
        })
        .filter_map(|report| report.due_date.map(|due| (report, due)))
        .filter(|(_, due)| calendar::days_between(today, *due) == lead_days)
        .filter_map(|(report, due)| {
            let recipient = report.manager_email.clone()?;

            let mut template_data = BTreeMap::new();
            template_data.insert("report_id".to_string(), report.id.clone());
            template_data.insert("report_title".to_string(), report.title.clone());
            template_data.insert("due_date".to_string(), due.to_string());

            Some(Reminder {
                recipient,
                subject: format!("[Action Required] Deadline Approaching: {}", report.title),
                template_data,
            })
        })
        .collect()
}

/// Stored manifests whose TPS storage deadline is exactly `lead_days` away.
pub fn due_waste_reminders(
    manifests: &[WasteManifest],
    today: NaiveDate,
    lead_days: i64,
) -> Vec<Reminder> {
    manifests
        .iter()
        .filter(|manifest| manifest.status == WasteStatus::Stored)
        .filter(|manifest| {
            calendar::days_between(today, manifest.storage_deadline()) == lead_days
        })
        .filter_map(|manifest| {
            let recipient = manifest.manager_email.clone()?;

            let mut template_data = BTreeMap::new();
            template_data.insert(
                "manifest_number".to_string(),
                manifest
                    .manifest_number
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
            );
            template_data.insert("waste_type".to_string(), manifest.waste_type.clone());
            template_data.insert(
                "deadline_date".to_string(),
                manifest.storage_deadline().to_string(),
            );
            template_data.insert(
                "max_storage_days".to_string(),
                manifest.max_storage_days.to_string(),
            );

            Some(Reminder {
                recipient,
                subject: format!(
                    "[TPS Limit Alert] Less than {} days for {}",
                    lead_days, manifest.waste_type
                ),
                template_data,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{WasteCategory, WasteUnit};
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn report(id: &str, due: NaiveDate, status: ReportStatus, email: Option<&str>) -> ComplianceReport {
        ComplianceReport {
            id: id.to_string(),
            title: format!("Report {id}"),
            due_date: Some(due),
            status,
            manager_email: email.map(str::to_string),
        }
    }

    #[test]
    fn reminds_exactly_seven_days_ahead() {
        let today = date(2026, 6, 1);
        let reports = vec![
            report("hit", today + Duration::days(7), ReportStatus::Pending, Some("ehs@plant.example")),
            report("early", today + Duration::days(8), ReportStatus::Pending, Some("ehs@plant.example")),
            report("late", today + Duration::days(6), ReportStatus::Pending, Some("ehs@plant.example")),
        ];
        let reminders = due_report_reminders(&reports, today, 7);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].template_data["report_id"], "hit");
        assert_eq!(
            reminders[0].subject,
            "[Action Required] Deadline Approaching: Report hit"
        );
    }

    #[test]
    fn rejected_reports_are_reminded_fulfilled_are_not() {
        let today = date(2026, 6, 1);
        let due = today + Duration::days(7);
        let reports = vec![
            report("rejected", due, ReportStatus::Rejected, Some("ehs@plant.example")),
            report("approved", due, ReportStatus::Approved, Some("ehs@plant.example")),
            report("submitted", due, ReportStatus::Submitted, Some("ehs@plant.example")),
        ];
        let reminders = due_report_reminders(&reports, today, 7);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].template_data["report_id"], "rejected");
    }

    #[test]
    fn skips_reports_without_recipient() {
        let today = date(2026, 6, 1);
        let reports = vec![report("orphan", today + Duration::days(7), ReportStatus::Pending, None)];
        assert!(due_report_reminders(&reports, today, 7).is_empty());
    }

    #[test]
    fn dateless_reports_never_qualify() {
        let today = date(2026, 6, 1);
        let reports = vec![ComplianceReport {
            id: "dateless".to_string(),
            title: "Report dateless".to_string(),
            due_date: None,
            status: ReportStatus::Pending,
            manager_email: Some("ehs@plant.example".to_string()),
        }];
        assert!(due_report_reminders(&reports, today, 7).is_empty());
    }

    #[test]
    fn waste_reminder_targets_derived_deadline() {
        let today = date(2026, 6, 1);
        let manifest = WasteManifest {
            id: "wm-1".to_string(),
            manifest_number: Some("MF-0042".to_string()),
            waste_code: "A102d".to_string(),
            waste_type: "Used lead-acid batteries".to_string(),
            category: WasteCategory::One,
            weight: 80.0,
            unit: WasteUnit::Kg,
            // Deadline lands exactly 7 days out.
            generation_date: today - Duration::days(83),
            max_storage_days: 90,
            status: WasteStatus::Stored,
            manager_email: Some("tps@plant.example".to_string()),
        };

        let reminders = due_waste_reminders(&[manifest.clone()], today, 7);
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].template_data["manifest_number"], "MF-0042");
        assert_eq!(
            reminders[0].subject,
            "[TPS Limit Alert] Less than 7 days for Used lead-acid batteries"
        );

        let resolved = WasteManifest {
            status: WasteStatus::Transported,
            ..manifest
        };
        assert!(due_waste_reminders(&[resolved], today, 7).is_empty());
    }
}
