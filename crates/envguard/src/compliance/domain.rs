use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Five-tier PROPER environmental performance rating (best to worst).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProperRating {
    Gold,
    Green,
    Blue,
    Red,
    Black,
}

impl ProperRating {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gold => "GOLD",
            Self::Green => "GREEN",
            Self::Blue => "BLUE",
            Self::Red => "RED",
            Self::Black => "BLACK",
        }
    }
}

/// Lifecycle of a regulatory compliance report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Submitted,
    Approved,
    Rejected,
}

impl ReportStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Statuses that count toward the compliance submission ratio.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Submitted | Self::Approved)
    }
}

/// Lifecycle of a hazardous-waste batch. Once transported or processed a
/// manifest leaves the active storage-deadline computation but remains in
/// historical balance totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteStatus {
    Stored,
    Transported,
    Processed,
}

impl WasteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Transported => "transported",
            Self::Processed => "processed",
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Transported | Self::Processed)
    }
}

/// Regulatory hazardous-waste category (category 1 is the more hazardous).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WasteCategory {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl WasteCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }
}

/// Weight unit for manifest entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WasteUnit {
    Kg,
    Ton,
}

/// Generator-size classification driving the legal storage window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorScale {
    /// Below 50 kg of hazardous waste per day.
    Small,
    Large,
}

/// Maximum legal TPS dwell time in days, fixed at manifest creation and
/// never recalculated retroactively.
pub fn max_storage_days(category: WasteCategory, scale: GeneratorScale) -> i64 {
    match (category, scale) {
        (WasteCategory::One, GeneratorScale::Large) => 90,
        (WasteCategory::One, GeneratorScale::Small) => 180,
        (WasteCategory::Two, GeneratorScale::Large) => 90,
        (WasteCategory::Two, GeneratorScale::Small) => 365,
    }
}

/// Status of an ISO 14001 corrective action (CAPA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapaStatus {
    Open,
    Verified,
    Closed,
}

impl CapaStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Verified => "Verified",
            Self::Closed => "Closed",
        }
    }
}

/// Status of an ISO 14001 environmental objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    OnTrack,
    AtRisk,
    Canceled,
    Achieved,
}

impl ObjectiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Canceled => "Canceled",
            Self::Achieved => "Achieved",
        }
    }
}

/// Status of a scheduled ISO audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditStatus {
    Planned,
    InProgress,
    Completed,
    Closed,
}

impl AuditStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Planned => "Planned",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Closed => "Closed",
        }
    }
}

/// Entry in the legal register tracking periodic regulation reviews.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalRecord {
    pub id: String,
    pub title: String,
    pub next_review_date: Option<NaiveDate>,
    pub compliant: bool,
}

/// Regulatory report with a submission deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub status: ReportStatus,
    pub manager_email: Option<String>,
}

/// RKL-RPL obligation from the AMDAL management plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmdalRequirement {
    pub id: String,
    pub title: String,
    pub next_due_date: Option<NaiveDate>,
    /// Completion percentage of the implementation plan, 0..=100.
    pub progress: u32,
}

/// ISO 14001 environmental objective with a target deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoObjective {
    pub id: String,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub status: ObjectiveStatus,
}

/// Scheduled internal or external ISO audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoAudit {
    pub id: String,
    pub title: String,
    pub audit_date: Option<NaiveDate>,
    pub status: AuditStatus,
}

/// Corrective/preventive action raised from an audit finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectiveAction {
    pub id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub status: CapaStatus,
}

/// Hazardous-waste batch logged into temporary storage (TPS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteManifest {
    pub id: String,
    pub manifest_number: Option<String>,
    pub waste_code: String,
    pub waste_type: String,
    pub category: WasteCategory,
    pub weight: f64,
    pub unit: WasteUnit,
    pub generation_date: NaiveDate,
    pub max_storage_days: i64,
    pub status: WasteStatus,
    pub manager_email: Option<String>,
}

impl WasteManifest {
    /// Legal storage deadline for this batch.
    pub fn storage_deadline(&self) -> NaiveDate {
        self.generation_date + Duration::days(self.max_storage_days)
    }

    /// Weight normalized to kilograms for balance totals.
    pub fn weight_kg(&self) -> f64 {
        match self.unit {
            WasteUnit::Kg => self.weight,
            WasteUnit::Ton => self.weight * 1000.0,
        }
    }
}

/// One ESG questionnaire answer; upserted per (assessment, question) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgAnswer {
    pub question_id: String,
    /// Stored 0..=3 but clamped again before aggregation.
    pub maturity_score: i32,
    pub evidence_url: Option<String>,
}

/// Snapshot of the latest completed ESG self-assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgAssessment {
    pub title: String,
    pub overall_score: u32,
    pub maturity_level: String,
}

/// PROPER self-assessment snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProperAssessment {
    pub title: String,
    pub final_rating: Option<ProperRating>,
    pub predicted_rating: Option<ProperRating>,
}

impl ProperAssessment {
    /// Verified rating when present, otherwise the self-assessed prediction.
    pub fn effective_rating(&self) -> Option<ProperRating> {
        self.final_rating.or(self.predicted_rating)
    }
}

/// Monthly greenhouse-gas reading feeding the dashboard trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhgReading {
    pub date: NaiveDate,
    pub co2e: f64,
}

/// IPAL effluent log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastewaterLog {
    pub log_date: NaiveDate,
    pub ph_level: f64,
}

/// Domestic (non-hazardous) waste log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticWasteLog {
    pub log_date: NaiveDate,
    pub weight: f64,
}

/// ISO 14001 context-of-the-organization register entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoContextItem {
    pub id: String,
    pub title: String,
    pub active: bool,
}
