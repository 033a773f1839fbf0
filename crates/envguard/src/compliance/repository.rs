use super::domain::{
    AmdalRequirement, ComplianceReport, CorrectiveAction, DomesticWasteLog, EsgAssessment,
    GhgReading, IsoAudit, IsoContextItem, IsoObjective, LegalRecord, ProperAssessment,
    WasteManifest, WastewaterLog,
};
use super::reminders::Reminder;

/// Read seam over the persistence layer. Each accessor returns one
/// already-deserialized collection; the dashboard service fetches all of
/// them before computing, and any single failure aborts the whole
/// aggregation.
pub trait ComplianceRepository: Send + Sync {
    fn legal_records(&self) -> Result<Vec<LegalRecord>, RepositoryError>;
    fn reports(&self) -> Result<Vec<ComplianceReport>, RepositoryError>;
    fn amdal_requirements(&self) -> Result<Vec<AmdalRequirement>, RepositoryError>;
    fn iso_objectives(&self) -> Result<Vec<IsoObjective>, RepositoryError>;
    fn iso_audits(&self) -> Result<Vec<IsoAudit>, RepositoryError>;
    fn corrective_actions(&self) -> Result<Vec<CorrectiveAction>, RepositoryError>;
    fn waste_manifests(&self) -> Result<Vec<WasteManifest>, RepositoryError>;
    fn latest_esg_assessment(&self) -> Result<Option<EsgAssessment>, RepositoryError>;
    fn latest_proper_assessment(&self) -> Result<Option<ProperAssessment>, RepositoryError>;
    fn ghg_readings(&self) -> Result<Vec<GhgReading>, RepositoryError>;
    fn wastewater_logs(&self) -> Result<Vec<WastewaterLog>, RepositoryError>;
    fn domestic_waste_logs(&self) -> Result<Vec<DomesticWasteLog>, RepositoryError>;
    fn iso_context(&self) -> Result<Vec<IsoContextItem>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("collection unavailable: {0}")]
    Unavailable(String),
}

/// Outbound side-channel for deadline reminders (e.g., a transactional
/// e-mail adapter). Delivery and templating live behind this trait.
pub trait ReminderDispatcher: Send + Sync {
    fn dispatch(&self, reminder: Reminder) -> Result<(), DispatchError>;
}

/// Reminder dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("reminder transport unavailable: {0}")]
    Transport(String),
}
