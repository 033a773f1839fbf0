use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::domain::ProperRating;
use super::esg::MaturityLevel;
use super::events::ComplianceEvent;
use super::health;
use super::reminders;
use super::repository::{ComplianceRepository, ReminderDispatcher, RepositoryError};
use super::scoring::ScoringConfig;
use super::timeline::{self, ComplianceSnapshot, Timeline};
use super::waste::{self, WasteTimelineRow};

/// Page sizes applied at the service boundary; the aggregator itself never
/// truncates.
pub const UPCOMING_PAGE_SIZE: usize = 5;
pub const ACTION_REQUIRED_PAGE_SIZE: usize = 10;

const GHG_TREND_POINTS: usize = 12;
const WATER_SERIES_POINTS: usize = 10;

/// Aggregation failures are fail-fast: one unavailable collection aborts
/// the whole run so the dashboard never renders partially.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("upstream data unavailable: {0}")]
    Source(#[from] RepositoryError),
}

/// A dated point in a dashboard trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgSummary {
    pub score: u32,
    pub level: MaturityLevel,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhgSummary {
    /// Most recent monthly reading.
    pub latest: f64,
    pub trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub rating: ProperRating,
    pub iso_active: usize,
    pub amdal_progress: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteSummary {
    /// Historical balance including transported/processed batches.
    pub hazardous_kg: f64,
    pub domestic_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterSummary {
    pub average_ph: f64,
    pub series: Vec<TrendPoint>,
}

/// Per-request dashboard aggregate. Computed values are returned to the
/// caller and never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub health_score: u32,
    pub esg: EsgSummary,
    pub ghg: GhgSummary,
    pub compliance: ComplianceSummary,
    pub waste: WasteSummary,
    pub water: WaterSummary,
    pub upcoming: Vec<ComplianceEvent>,
    pub action_required: Vec<ComplianceEvent>,
}

/// Outcome of one reminder sweep. Per-item dispatch failures are collected
/// rather than aborting the sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderRun {
    pub considered: usize,
    pub sent: usize,
    pub failures: Vec<ReminderFailure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderFailure {
    pub recipient: String,
    pub error: String,
}

/// Service composing the repository seam with the scoring engines.
pub struct DashboardService<R> {
    repository: Arc<R>,
    config: ScoringConfig,
}

impl<R> DashboardService<R>
where
    R: ComplianceRepository,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self { repository, config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    fn snapshot(&self) -> Result<ComplianceSnapshot, AggregationError> {
        Ok(ComplianceSnapshot {
            legal: self.repository.legal_records()?,
            reports: self.repository.reports()?,
            amdal: self.repository.amdal_requirements()?,
            objectives: self.repository.iso_objectives()?,
            audits: self.repository.iso_audits()?,
            corrective_actions: self.repository.corrective_actions()?,
            manifests: self.repository.waste_manifests()?,
        })
    }

    /// Compute the full dashboard aggregate for `today`.
    pub fn stats(&self, today: NaiveDate) -> Result<DashboardStats, AggregationError> {
        let snapshot = self.snapshot()?;
        let latest_esg = self.repository.latest_esg_assessment()?;
        let latest_proper = self.repository.latest_proper_assessment()?;
        let mut ghg_readings = self.repository.ghg_readings()?;
        let mut water_logs = self.repository.wastewater_logs()?;
        let domestic_logs = self.repository.domestic_waste_logs()?;
        let iso_context = self.repository.iso_context()?;

        let esg = match &latest_esg {
            Some(assessment) => EsgSummary {
                score: assessment.overall_score,
                level: self.config.maturity_bands.level_for(assessment.overall_score),
                title: assessment.title.clone(),
            },
            None => EsgSummary {
                score: 0,
                level: MaturityLevel::Initial,
                title: "N/A".to_string(),
            },
        };

        let rating = latest_proper
            .as_ref()
            .and_then(|assessment| assessment.effective_rating());
        let health_score = health::compute_health(
            esg.score as f64,
            &snapshot.reports,
            rating,
            &self.config,
        );

        ghg_readings.sort_by_key(|reading| reading.date);
        let trend: Vec<TrendPoint> = ghg_readings
            .iter()
            .rev()
            .take(GHG_TREND_POINTS)
            .rev()
            .map(|reading| TrendPoint {
                date: reading.date,
                value: reading.co2e,
            })
            .collect();
        let ghg = GhgSummary {
            latest: trend.last().map(|point| point.value).unwrap_or(0.0),
            trend,
        };

        water_logs.sort_by_key(|log| log.log_date);
        let series: Vec<TrendPoint> = water_logs
            .iter()
            .rev()
            .take(WATER_SERIES_POINTS)
            .rev()
            .map(|log| TrendPoint {
                date: log.log_date,
                value: log.ph_level,
            })
            .collect();
        let average_ph = if series.is_empty() {
            7.0
        } else {
            series.iter().map(|point| point.value).sum::<f64>() / series.len() as f64
        };
        let water = WaterSummary { average_ph, series };

        let waste = WasteSummary {
            hazardous_kg: snapshot
                .manifests
                .iter()
                .map(|manifest| manifest.weight_kg())
                .sum(),
            domestic_kg: domestic_logs.iter().map(|log| log.weight).sum(),
        };

        let compliance = ComplianceSummary {
            rating: rating.unwrap_or(ProperRating::Blue),
            iso_active: iso_context.iter().filter(|item| item.active).count(),
            amdal_progress: snapshot
                .amdal
                .first()
                .map(|requirement| requirement.progress)
                .unwrap_or(0),
        };

        let Timeline {
            mut upcoming,
            mut action_required,
        } = timeline::aggregate(&snapshot, today, self.config.horizon_days);
        upcoming.truncate(UPCOMING_PAGE_SIZE);
        action_required.truncate(ACTION_REQUIRED_PAGE_SIZE);

        info!(
            health_score,
            upcoming = upcoming.len(),
            action_required = action_required.len(),
            "dashboard aggregation complete"
        );

        Ok(DashboardStats {
            health_score,
            esg,
            ghg,
            compliance,
            waste,
            water,
            upcoming,
            action_required,
        })
    }

    /// Full-year calendar feed, no horizon filter.
    pub fn calendar_events(&self) -> Result<Vec<ComplianceEvent>, AggregationError> {
        let snapshot = self.snapshot()?;
        Ok(timeline::calendar_events(&snapshot))
    }

    /// Monthly TPS storage matrix for every waste-code group.
    pub fn waste_timeline(&self, today: NaiveDate) -> Result<Vec<WasteTimelineRow>, AggregationError> {
        let manifests = self.repository.waste_manifests()?;
        Ok(waste::classify(&manifests, today, &self.config))
    }

    /// Daily reminder sweep: reports and stored waste exactly
    /// `reminder_lead_days` from their deadline.
    pub fn run_reminders<D>(
        &self,
        dispatcher: &D,
        today: NaiveDate,
    ) -> Result<ReminderRun, AggregationError>
    where
        D: ReminderDispatcher,
    {
        let reports = self.repository.reports()?;
        let manifests = self.repository.waste_manifests()?;

        let lead = self.config.reminder_lead_days;
        let mut due = reminders::due_report_reminders(&reports, today, lead);
        due.extend(reminders::due_waste_reminders(&manifests, today, lead));

        let considered = due.len();
        let mut sent = 0;
        let mut failures = Vec::new();

        for reminder in due {
            let recipient = reminder.recipient.clone();
            match dispatcher.dispatch(reminder) {
                Ok(()) => sent += 1,
                Err(err) => {
                    error!(%recipient, %err, "reminder dispatch failed");
                    failures.push(ReminderFailure {
                        recipient,
                        error: err.to_string(),
                    });
                }
            }
        }

        info!(considered, sent, failed = failures.len(), "reminder sweep complete");

        Ok(ReminderRun {
            considered,
            sent,
            failures,
        })
    }
}
