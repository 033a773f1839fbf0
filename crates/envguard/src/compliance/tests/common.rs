use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::compliance::domain::{
    AmdalRequirement, ComplianceReport, CorrectiveAction, DomesticWasteLog, EsgAssessment,
    GhgReading, IsoAudit, IsoContextItem, IsoObjective, LegalRecord, ProperAssessment,
    ProperRating, ReportStatus, WasteCategory, WasteManifest, WasteStatus, WasteUnit,
    WastewaterLog,
};
use crate::compliance::reminders::Reminder;
use crate::compliance::repository::{
    ComplianceRepository, DispatchError, ReminderDispatcher, RepositoryError,
};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn report(
    id: &str,
    due: Option<NaiveDate>,
    status: ReportStatus,
    email: Option<&str>,
) -> ComplianceReport {
    ComplianceReport {
        id: id.to_string(),
        title: format!("Report {id}"),
        due_date: due,
        status,
        manager_email: email.map(str::to_string),
    }
}

pub(super) fn manifest(
    id: &str,
    code: &str,
    generated: NaiveDate,
    window: i64,
    status: WasteStatus,
    email: Option<&str>,
) -> WasteManifest {
    WasteManifest {
        id: id.to_string(),
        manifest_number: Some(format!("MF-{id}")),
        waste_code: code.to_string(),
        waste_type: "Used oil".to_string(),
        category: WasteCategory::Two,
        weight: 50.0,
        unit: WasteUnit::Kg,
        generation_date: generated,
        max_storage_days: window,
        status,
        manager_email: email.map(str::to_string),
    }
}

/// Fixture-backed repository; every collection is cloned per fetch so runs
/// operate on private snapshots.
#[derive(Default, Clone)]
pub(super) struct FixtureRepository {
    pub legal: Vec<LegalRecord>,
    pub reports: Vec<ComplianceReport>,
    pub amdal: Vec<AmdalRequirement>,
    pub objectives: Vec<IsoObjective>,
    pub audits: Vec<IsoAudit>,
    pub corrective_actions: Vec<CorrectiveAction>,
    pub manifests: Vec<WasteManifest>,
    pub esg: Option<EsgAssessment>,
    pub proper: Option<ProperAssessment>,
    pub ghg: Vec<GhgReading>,
    pub water: Vec<WastewaterLog>,
    pub domestic: Vec<DomesticWasteLog>,
    pub iso_context: Vec<IsoContextItem>,
    /// When set, the named collection fails to fetch.
    pub unavailable: Option<&'static str>,
}

impl FixtureRepository {
    fn guard(&self, collection: &'static str) -> Result<(), RepositoryError> {
        if self.unavailable == Some(collection) {
            return Err(RepositoryError::Unavailable(collection.to_string()));
        }
        Ok(())
    }
}

impl ComplianceRepository for FixtureRepository {
    fn legal_records(&self) -> Result<Vec<LegalRecord>, RepositoryError> {
        self.guard("legal")?;
        Ok(self.legal.clone())
    }

    fn reports(&self) -> Result<Vec<ComplianceReport>, RepositoryError> {
        self.guard("reports")?;
        Ok(self.reports.clone())
    }

    fn amdal_requirements(&self) -> Result<Vec<AmdalRequirement>, RepositoryError> {
        self.guard("amdal")?;
        Ok(self.amdal.clone())
    }

    fn iso_objectives(&self) -> Result<Vec<IsoObjective>, RepositoryError> {
        self.guard("objectives")?;
        Ok(self.objectives.clone())
    }

    fn iso_audits(&self) -> Result<Vec<IsoAudit>, RepositoryError> {
        self.guard("audits")?;
        Ok(self.audits.clone())
    }

    fn corrective_actions(&self) -> Result<Vec<CorrectiveAction>, RepositoryError> {
        self.guard("capa")?;
        Ok(self.corrective_actions.clone())
    }

    fn waste_manifests(&self) -> Result<Vec<WasteManifest>, RepositoryError> {
        self.guard("manifests")?;
        Ok(self.manifests.clone())
    }

    fn latest_esg_assessment(&self) -> Result<Option<EsgAssessment>, RepositoryError> {
        self.guard("esg")?;
        Ok(self.esg.clone())
    }

    fn latest_proper_assessment(&self) -> Result<Option<ProperAssessment>, RepositoryError> {
        self.guard("proper")?;
        Ok(self.proper.clone())
    }

    fn ghg_readings(&self) -> Result<Vec<GhgReading>, RepositoryError> {
        self.guard("ghg")?;
        Ok(self.ghg.clone())
    }

    fn wastewater_logs(&self) -> Result<Vec<WastewaterLog>, RepositoryError> {
        self.guard("water")?;
        Ok(self.water.clone())
    }

    fn domestic_waste_logs(&self) -> Result<Vec<DomesticWasteLog>, RepositoryError> {
        self.guard("domestic")?;
        Ok(self.domestic.clone())
    }

    fn iso_context(&self) -> Result<Vec<IsoContextItem>, RepositoryError> {
        self.guard("iso_context")?;
        Ok(self.iso_context.clone())
    }
}

/// Records dispatched reminders; optionally rejects a specific recipient.
#[derive(Default, Clone)]
pub(super) struct RecordingDispatcher {
    pub sent: Arc<Mutex<Vec<Reminder>>>,
    pub reject: Option<String>,
}

impl ReminderDispatcher for RecordingDispatcher {
    fn dispatch(&self, reminder: Reminder) -> Result<(), DispatchError> {
        if self.reject.as_deref() == Some(reminder.recipient.as_str()) {
            return Err(DispatchError::Transport("smtp refused".to_string()));
        }
        self.sent.lock().expect("dispatcher mutex poisoned").push(reminder);
        Ok(())
    }
}

impl RecordingDispatcher {
    pub(super) fn sent(&self) -> Vec<Reminder> {
        self.sent.lock().expect("dispatcher mutex poisoned").clone()
    }
}

pub(super) fn proper(rating: ProperRating) -> ProperAssessment {
    ProperAssessment {
        title: "PROPER 2026".to_string(),
        final_rating: Some(rating),
        predicted_rating: None,
    }
}
