use std::sync::Arc;

use chrono::Duration;

use super::common::{date, manifest, report, FixtureRepository, RecordingDispatcher};
use crate::compliance::dashboard::DashboardService;
use crate::compliance::domain::{ReportStatus, WasteStatus};
use crate::compliance::scoring::ScoringConfig;

fn service(repository: FixtureRepository) -> DashboardService<FixtureRepository> {
    DashboardService::new(Arc::new(repository), ScoringConfig::default())
}

#[test]
fn sweep_dispatches_reports_and_waste_at_lead_time() {
    let today = date(2026, 6, 1);
    let repository = FixtureRepository {
        reports: vec![
            report(
                "due",
                Some(today + Duration::days(7)),
                ReportStatus::Pending,
                Some("ehs@plant.example"),
            ),
            report(
                "far",
                Some(today + Duration::days(20)),
                ReportStatus::Pending,
                Some("ehs@plant.example"),
            ),
        ],
        manifests: vec![manifest(
            "wm",
            "A102d",
            today - Duration::days(83),
            90,
            WasteStatus::Stored,
            Some("tps@plant.example"),
        )],
        ..Default::default()
    };

    let dispatcher = RecordingDispatcher::default();
    let run = service(repository)
        .run_reminders(&dispatcher, today)
        .expect("sources available");

    assert_eq!(run.considered, 2);
    assert_eq!(run.sent, 2);
    assert!(run.failures.is_empty());

    let recipients: Vec<String> = dispatcher
        .sent()
        .into_iter()
        .map(|reminder| reminder.recipient)
        .collect();
    assert_eq!(recipients, vec!["ehs@plant.example", "tps@plant.example"]);
}

#[test]
fn dispatch_failures_are_collected_not_fatal() {
    let today = date(2026, 6, 1);
    let repository = FixtureRepository {
        reports: vec![
            report(
                "ok",
                Some(today + Duration::days(7)),
                ReportStatus::Pending,
                Some("ehs@plant.example"),
            ),
            report(
                "bounce",
                Some(today + Duration::days(7)),
                ReportStatus::Rejected,
                Some("broken@plant.example"),
            ),
        ],
        ..Default::default()
    };

    let dispatcher = RecordingDispatcher {
        reject: Some("broken@plant.example".to_string()),
        ..Default::default()
    };
    let run = service(repository)
        .run_reminders(&dispatcher, today)
        .expect("sweep completes despite bounce");

    assert_eq!(run.considered, 2);
    assert_eq!(run.sent, 1);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].recipient, "broken@plant.example");
}

#[test]
fn rerunning_the_sweep_same_day_duplicates_dispatches() {
    // No durable sent-flag exists; the equality check alone gates sends.
    let today = date(2026, 6, 1);
    let repository = FixtureRepository {
        reports: vec![report(
            "due",
            Some(today + Duration::days(7)),
            ReportStatus::Pending,
            Some("ehs@plant.example"),
        )],
        ..Default::default()
    };

    let dispatcher = RecordingDispatcher::default();
    let service = service(repository);
    service.run_reminders(&dispatcher, today).expect("first run");
    service.run_reminders(&dispatcher, today).expect("second run");

    assert_eq!(dispatcher.sent().len(), 2);
}
