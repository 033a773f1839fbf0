//! Compliance aggregation core: normalization of heterogeneous regulatory
//! records into a single obligation timeline, FIFO hazardous-waste storage
//! deadlines, ESG maturity scoring, and the composite health index.
//!
//! Everything here is synchronous, pure-function computation over a private
//! snapshot of already-fetched collections; the calling layer owns fetching
//! and any concurrency.

pub mod calendar;
pub mod dashboard;
pub mod domain;
pub mod esg;
pub mod events;
pub mod export;
pub mod health;
pub mod reminders;
pub mod repository;
pub mod scoring;
pub mod timeline;
pub mod waste;

#[cfg(test)]
mod tests;

pub use dashboard::{
    AggregationError, DashboardService, DashboardStats, ReminderRun, ACTION_REQUIRED_PAGE_SIZE,
    UPCOMING_PAGE_SIZE,
};
pub use domain::{
    max_storage_days, AmdalRequirement, ComplianceReport, CorrectiveAction, DomesticWasteLog,
    EsgAnswer, EsgAssessment, GeneratorScale, GhgReading, IsoAudit, IsoContextItem, IsoObjective,
    LegalRecord, ProperAssessment, ProperRating, ReportStatus, WasteCategory, WasteManifest,
    WasteStatus, WasteUnit, WastewaterLog,
};
pub use esg::{EsgScore, MaturityLevel, PillarScore};
pub use events::{ComplianceEvent, EventKind};
pub use reminders::Reminder;
pub use repository::{ComplianceRepository, DispatchError, ReminderDispatcher, RepositoryError};
pub use scoring::ScoringConfig;
pub use timeline::{ComplianceSnapshot, Timeline};
pub use waste::{MonthCell, StorageHealth, WasteTimelineRow};
