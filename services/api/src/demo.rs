use crate::infra::{InMemoryComplianceRepository, LoggingReminderDispatcher};
use chrono::{Local, NaiveDate};
use clap::Args;
use envguard::compliance::export::manifests_to_csv;
use envguard::compliance::{
    AggregationError, ComplianceRepository, DashboardService, DashboardStats, ScoringConfig,
    WasteTimelineRow,
};
use envguard::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Evaluation date for the aggregation (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include the monthly TPS storage matrix in the output
    #[arg(long)]
    pub(crate) waste_timeline: bool,
    /// Print the full-year calendar feed instead of horizon buckets
    #[arg(long)]
    pub(crate) calendar: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RemindersArgs {
    /// Evaluation date for the sweep (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the demo (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the reminder sweep portion of the demo
    #[arg(long)]
    pub(crate) skip_reminders: bool,
}

fn seeded_service(today: NaiveDate) -> DashboardService<InMemoryComplianceRepository> {
    let repository = Arc::new(InMemoryComplianceRepository::seeded(today));
    DashboardService::new(repository, ScoringConfig::default())
}

pub(crate) fn run_dashboard_report(args: DashboardArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let service = seeded_service(today);

    if args.calendar {
        let events = service.calendar_events()?;
        println!("Calendar feed ({} dated obligations)", events.len());
        for event in &events {
            println!(
                "- {} | {} | {} ({})",
                event.date,
                event.kind.label(),
                event.title,
                event.status
            );
        }
        return Ok(());
    }

    let stats = service.stats(today)?;
    render_dashboard(&stats, today);

    if args.waste_timeline {
        let rows = service.waste_timeline(today)?;
        render_waste_timeline(&rows);
    }

    Ok(())
}

pub(crate) fn run_reminder_sweep(args: RemindersArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(InMemoryComplianceRepository::seeded(today));
    let service = DashboardService::new(repository, ScoringConfig::default());
    let dispatcher = LoggingReminderDispatcher::default();

    let run = service.run_reminders(&dispatcher, today)?;

    println!("Reminder sweep for {today}");
    println!(
        "- {} candidates | {} dispatched | {} failed",
        run.considered,
        run.sent,
        run.failures.len()
    );
    for reminder in dispatcher.sent() {
        println!("  - {} <- {}", reminder.recipient, reminder.subject);
    }
    for failure in &run.failures {
        println!("  ! {}: {}", failure.recipient, failure.error);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(InMemoryComplianceRepository::seeded(today));
    let service = DashboardService::new(repository.clone(), ScoringConfig::default());

    println!("Compliance aggregation demo");
    let stats = service.stats(today)?;
    render_dashboard(&stats, today);

    let rows = service.waste_timeline(today)?;
    render_waste_timeline(&rows);

    let events = service.calendar_events()?;
    println!("\nCalendar feed ({} dated obligations)", events.len());
    for event in events.iter().take(8) {
        println!(
            "- {} | {} | {} ({})",
            event.date,
            event.kind.label(),
            event.title,
            event.status
        );
    }

    if !args.skip_reminders {
        println!();
        run_reminder_sweep(RemindersArgs { today: Some(today) })?;
    }

    let stored = rows.iter().map(|row| row.stored_count).sum::<usize>();
    println!("\nManifest export preview ({stored} stored batches)");
    let manifests = repository.waste_manifests().map_err(AggregationError::from)?;
    let csv = manifests_to_csv(&manifests)?;
    for line in csv.lines().take(4) {
        println!("  {line}");
    }

    Ok(())
}

fn render_dashboard(stats: &DashboardStats, today: NaiveDate) {
    println!("Dashboard aggregate (evaluated {today})");
    println!(
        "- Health score: {} | ESG {} ({}) | PROPER {}",
        stats.health_score,
        stats.esg.score,
        stats.esg.level.label(),
        stats.compliance.rating.label()
    );
    println!(
        "- GHG latest: {:.1} tCO2e | Waste balance: {:.0} kg hazardous / {:.0} kg domestic",
        stats.ghg.latest, stats.waste.hazardous_kg, stats.waste.domestic_kg
    );
    println!(
        "- Effluent: avg pH {:.2} over {} samples | ISO context items active: {}",
        stats.water.average_ph,
        stats.water.series.len(),
        stats.compliance.iso_active
    );

    println!("\nUpcoming deadlines");
    if stats.upcoming.is_empty() {
        println!("- none inside the horizon");
    }
    for event in &stats.upcoming {
        println!(
            "- {} | {} | {} ({})",
            event.date,
            event.kind.label(),
            event.title,
            event.status
        );
    }

    println!("\nAction required");
    if stats.action_required.is_empty() {
        println!("- none");
    }
    for event in &stats.action_required {
        println!(
            "- {} | {} | {} ({})",
            event.date,
            event.kind.label(),
            event.title,
            event.status
        );
    }
}

fn render_waste_timeline(rows: &[WasteTimelineRow]) {
    println!("\nTPS storage timeline");
    for row in rows {
        let status = match (row.days_left, row.health) {
            (Some(days), Some(health)) => format!("{} days left ({})", days, health.label()),
            _ => "cleared".to_string(),
        };
        println!(
            "- {} {} | {} stored / {} resolved | {}",
            row.waste_code, row.waste_type, row.stored_count, row.resolved_count, status
        );
    }
}
