use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    AmdalRequirement, ComplianceReport, CorrectiveAction, IsoAudit, IsoObjective, LegalRecord,
    WasteManifest, WasteStatus,
};

/// Source domain of a normalized obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Legal,
    Report,
    Amdal,
    Objective,
    Audit,
    Waste,
    Certification,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Legal => "Legal",
            Self::Report => "Report",
            Self::Amdal => "AMDAL",
            Self::Objective => "Objective",
            Self::Audit => "Audit",
            Self::Waste => "Waste",
            Self::Certification => "Certification",
        }
    }
}

/// A dated obligation normalized from any compliance domain. The date is
/// always concrete; records lacking one never produce an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub status: String,
    pub source_link: String,
}

impl ComplianceEvent {
    pub fn from_legal(record: &LegalRecord) -> Option<Self> {
        let date = record.next_review_date?;
        Some(Self {
            id: record.id.clone(),
            title: record.title.clone(),
            date,
            kind: EventKind::Legal,
            status: if record.compliant {
                "Compliant".to_string()
            } else {
                "Non-Compliant".to_string()
            },
            source_link: format!("/dashboard/legal-register/{}", record.id),
        })
    }

    pub fn from_report(report: &ComplianceReport) -> Option<Self> {
        let date = report.due_date?;
        Some(Self {
            id: report.id.clone(),
            title: report.title.clone(),
            date,
            kind: EventKind::Report,
            status: report.status.label().to_string(),
            source_link: format!("/dashboard/compliance/{}", report.id),
        })
    }

    pub fn from_amdal(requirement: &AmdalRequirement) -> Option<Self> {
        let date = requirement.next_due_date?;
        Some(Self {
            id: requirement.id.clone(),
            title: requirement.title.clone(),
            date,
            kind: EventKind::Amdal,
            status: format!("{}% complete", requirement.progress),
            source_link: format!("/dashboard/amdal/{}", requirement.id),
        })
    }

    pub fn from_objective(objective: &IsoObjective) -> Option<Self> {
        let date = objective.deadline?;
        Some(Self {
            id: objective.id.clone(),
            title: objective.title.clone(),
            date,
            kind: EventKind::Objective,
            status: objective.status.label().to_string(),
            source_link: format!("/dashboard/iso14001/{}", objective.id),
        })
    }

    pub fn from_audit(audit: &IsoAudit) -> Option<Self> {
        let date = audit.audit_date?;
        Some(Self {
            id: audit.id.clone(),
            title: audit.title.clone(),
            date,
            kind: EventKind::Audit,
            status: audit.status.label().to_string(),
            source_link: format!("/dashboard/audit/{}", audit.id),
        })
    }

    pub fn from_corrective_action(action: &CorrectiveAction) -> Option<Self> {
        let date = action.due_date?;
        Some(Self {
            id: action.id.clone(),
            title: action.title.clone(),
            date,
            kind: EventKind::Audit,
            status: action.status.label().to_string(),
            source_link: format!("/dashboard/audit/{}", action.id),
        })
    }

    /// Storage-deadline event for a manifest still sitting in TPS. Resolved
    /// manifests carry no remaining obligation.
    pub fn from_manifest(manifest: &WasteManifest) -> Option<Self> {
        if manifest.status != WasteStatus::Stored {
            return None;
        }
        Some(Self {
            id: manifest.id.clone(),
            title: format!("TPS limit: {}", manifest.waste_type),
            date: manifest.storage_deadline(),
            kind: EventKind::Waste,
            status: manifest.status.label().to_string(),
            source_link: format!("/dashboard/waste/{}", manifest.id),
        })
    }
}
