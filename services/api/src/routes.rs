use crate::infra::{deserialize_optional_date, AppState, InMemoryComplianceRepository, LoggingReminderDispatcher};
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use envguard::compliance::export::manifests_to_csv;
use envguard::compliance::{
    esg, ComplianceEvent, ComplianceRepository, DashboardService, DashboardStats, EsgAnswer,
    MaturityLevel, ReminderRun, WasteTimelineRow,
};
use envguard::compliance::dashboard::AggregationError;
use envguard::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) type SharedService = Arc<DashboardService<InMemoryComplianceRepository>>;
pub(crate) type SharedRepository = Arc<InMemoryComplianceRepository>;
pub(crate) type SharedDispatcher = Arc<LoggingReminderDispatcher>;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EvaluationDateQuery {
    /// Evaluation date override (YYYY-MM-DD); defaults to today.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
}

impl EvaluationDateQuery {
    fn resolve(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EsgScoreRequest {
    pub(crate) answers: Vec<EsgAnswer>,
    /// Question count of the standard version; defaults to the configured
    /// catalog size.
    #[serde(default)]
    pub(crate) question_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EsgScoreResponse {
    pub(crate) overall_score: u32,
    pub(crate) level: MaturityLevel,
    pub(crate) label: String,
}

pub(crate) fn with_compliance_routes(
    service: SharedService,
    repository: SharedRepository,
    dispatcher: SharedDispatcher,
) -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/dashboard/stats",
            axum::routing::get(dashboard_stats_endpoint),
        )
        .route(
            "/api/v1/dashboard/calendar",
            axum::routing::get(calendar_endpoint),
        )
        .route(
            "/api/v1/waste/timeline",
            axum::routing::get(waste_timeline_endpoint),
        )
        .route("/api/v1/esg/score", axum::routing::post(esg_score_endpoint))
        .route(
            "/api/v1/cron/reminders",
            axum::routing::post(reminder_sweep_endpoint),
        )
        .route(
            "/api/v1/export/manifests",
            axum::routing::get(export_manifests_endpoint),
        )
        .layer(Extension(service))
        .layer(Extension(repository))
        .layer(Extension(dispatcher))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn dashboard_stats_endpoint(
    Extension(service): Extension<SharedService>,
    Query(query): Query<EvaluationDateQuery>,
) -> Result<Json<DashboardStats>, AppError> {
    let stats = service.stats(query.resolve())?;
    Ok(Json(stats))
}

pub(crate) async fn calendar_endpoint(
    Extension(service): Extension<SharedService>,
) -> Result<Json<Vec<ComplianceEvent>>, AppError> {
    let events = service.calendar_events()?;
    Ok(Json(events))
}

pub(crate) async fn waste_timeline_endpoint(
    Extension(service): Extension<SharedService>,
    Query(query): Query<EvaluationDateQuery>,
) -> Result<Json<Vec<WasteTimelineRow>>, AppError> {
    let rows = service.waste_timeline(query.resolve())?;
    Ok(Json(rows))
}

pub(crate) async fn esg_score_endpoint(
    Extension(service): Extension<SharedService>,
    Json(payload): Json<EsgScoreRequest>,
) -> Json<EsgScoreResponse> {
    let config = service.config();
    let question_count = payload.question_count.unwrap_or(config.esg_question_count);
    let score = esg::score(&payload.answers, question_count, config);
    Json(EsgScoreResponse {
        overall_score: score.overall_score,
        level: score.level,
        label: score.level.label().to_string(),
    })
}

pub(crate) async fn reminder_sweep_endpoint(
    Extension(service): Extension<SharedService>,
    Extension(dispatcher): Extension<SharedDispatcher>,
    Query(query): Query<EvaluationDateQuery>,
) -> Result<Json<ReminderRun>, AppError> {
    let run = service.run_reminders(dispatcher.as_ref(), query.resolve())?;
    Ok(Json(run))
}

pub(crate) async fn export_manifests_endpoint(
    Extension(repository): Extension<SharedRepository>,
) -> Result<impl IntoResponse, AppError> {
    let manifests = repository
        .waste_manifests()
        .map_err(AggregationError::from)?;
    let csv = manifests_to_csv(&manifests)?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"waste-manifests.csv\"",
            ),
        ],
        csv,
    ))
}
