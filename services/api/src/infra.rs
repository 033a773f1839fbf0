use chrono::{Duration, NaiveDate};
use envguard::compliance::{
    AmdalRequirement, ComplianceReport, ComplianceRepository, CorrectiveAction, DispatchError,
    DomesticWasteLog, EsgAssessment, GhgReading, IsoAudit, IsoContextItem, IsoObjective,
    LegalRecord, ProperAssessment, ProperRating, Reminder, ReminderDispatcher, ReportStatus,
    RepositoryError, WasteCategory, WasteManifest, WasteStatus, WasteUnit,
};
use envguard::compliance::domain::{
    AuditStatus, CapaStatus, ObjectiveStatus, WastewaterLog,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
struct Store {
    legal: Vec<LegalRecord>,
    reports: Vec<ComplianceReport>,
    amdal: Vec<AmdalRequirement>,
    objectives: Vec<IsoObjective>,
    audits: Vec<IsoAudit>,
    corrective_actions: Vec<CorrectiveAction>,
    manifests: Vec<WasteManifest>,
    esg: Option<EsgAssessment>,
    proper: Option<ProperAssessment>,
    ghg: Vec<GhgReading>,
    water: Vec<WastewaterLog>,
    domestic: Vec<DomesticWasteLog>,
    iso_context: Vec<IsoContextItem>,
}

/// In-memory repository backing the service until a database adapter lands.
#[derive(Default, Clone)]
pub(crate) struct InMemoryComplianceRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryComplianceRepository {
    /// Repository pre-loaded with a representative sample plant, anchored to
    /// `today` so deadlines land inside the dashboard horizon.
    pub(crate) fn seeded(today: NaiveDate) -> Self {
        let repository = Self::default();
        {
            let mut store = repository
                .store
                .lock()
                .expect("repository mutex poisoned");
            *store = sample_plant(today);
        }
        repository
    }
}

impl ComplianceRepository for InMemoryComplianceRepository {
    fn legal_records(&self) -> Result<Vec<LegalRecord>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").legal.clone())
    }

    fn reports(&self) -> Result<Vec<ComplianceReport>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").reports.clone())
    }

    fn amdal_requirements(&self) -> Result<Vec<AmdalRequirement>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").amdal.clone())
    }

    fn iso_objectives(&self) -> Result<Vec<IsoObjective>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").objectives.clone())
    }

    fn iso_audits(&self) -> Result<Vec<IsoAudit>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").audits.clone())
    }

    fn corrective_actions(&self) -> Result<Vec<CorrectiveAction>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .expect("repository mutex poisoned")
            .corrective_actions
            .clone())
    }

    fn waste_manifests(&self) -> Result<Vec<WasteManifest>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").manifests.clone())
    }

    fn latest_esg_assessment(&self) -> Result<Option<EsgAssessment>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").esg.clone())
    }

    fn latest_proper_assessment(&self) -> Result<Option<ProperAssessment>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").proper.clone())
    }

    fn ghg_readings(&self) -> Result<Vec<GhgReading>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").ghg.clone())
    }

    fn wastewater_logs(&self) -> Result<Vec<WastewaterLog>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").water.clone())
    }

    fn domestic_waste_logs(&self) -> Result<Vec<DomesticWasteLog>, RepositoryError> {
        Ok(self.store.lock().expect("repository mutex poisoned").domestic.clone())
    }

    fn iso_context(&self) -> Result<Vec<IsoContextItem>, RepositoryError> {
        Ok(self
            .store
            .lock()
            .expect("repository mutex poisoned")
            .iso_context
            .clone())
    }
}

/// Dispatcher that records reminders and logs them instead of calling a
/// transactional e-mail provider.
#[derive(Default, Clone)]
pub(crate) struct LoggingReminderDispatcher {
    sent: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderDispatcher for LoggingReminderDispatcher {
    fn dispatch(&self, reminder: Reminder) -> Result<(), DispatchError> {
        info!(recipient = %reminder.recipient, subject = %reminder.subject, "reminder dispatched");
        self.sent
            .lock()
            .expect("dispatcher mutex poisoned")
            .push(reminder);
        Ok(())
    }
}

impl LoggingReminderDispatcher {
    pub(crate) fn sent(&self) -> Vec<Reminder> {
        self.sent.lock().expect("dispatcher mutex poisoned").clone()
    }
}

fn sample_plant(today: NaiveDate) -> Store {
    Store {
        legal: vec![
            LegalRecord {
                id: "legal-pp22".to_string(),
                title: "PP 22/2021 implementation review".to_string(),
                next_review_date: Some(today + Duration::days(45)),
                compliant: true,
            },
            LegalRecord {
                id: "legal-permen6".to_string(),
                title: "Permen LHK 6/2021 waste manifest procedure".to_string(),
                next_review_date: Some(today - Duration::days(12)),
                compliant: false,
            },
        ],
        reports: vec![
            ComplianceReport {
                id: "rep-rklrpl".to_string(),
                title: "RKL-RPL Semester Report".to_string(),
                due_date: Some(today + Duration::days(7)),
                status: ReportStatus::Pending,
                manager_email: Some("ehs@plant.example".to_string()),
            },
            ComplianceReport {
                id: "rep-sparing".to_string(),
                title: "SPARING quarterly upload".to_string(),
                due_date: Some(today + Duration::days(30)),
                status: ReportStatus::Submitted,
                manager_email: Some("ehs@plant.example".to_string()),
            },
            ComplianceReport {
                id: "rep-siraja".to_string(),
                title: "SIRAJA hazardous waste balance".to_string(),
                due_date: Some(today - Duration::days(3)),
                status: ReportStatus::Pending,
                manager_email: Some("waste@plant.example".to_string()),
            },
        ],
        amdal: vec![AmdalRequirement {
            id: "amdal-air".to_string(),
            title: "Ambient air quality monitoring".to_string(),
            next_due_date: Some(today + Duration::days(21)),
            progress: 65,
        }],
        objectives: vec![IsoObjective {
            id: "obj-energy".to_string(),
            title: "Reduce energy intensity by 5%".to_string(),
            deadline: Some(today + Duration::days(80)),
            status: ObjectiveStatus::OnTrack,
        }],
        audits: vec![IsoAudit {
            id: "audit-internal".to_string(),
            title: "Internal EMS audit".to_string(),
            audit_date: Some(today + Duration::days(14)),
            status: AuditStatus::Planned,
        }],
        corrective_actions: vec![CorrectiveAction {
            id: "capa-bund".to_string(),
            title: "Repair secondary containment bund".to_string(),
            due_date: Some(today - Duration::days(5)),
            status: CapaStatus::Open,
        }],
        manifests: vec![
            WasteManifest {
                id: "wm-batt".to_string(),
                manifest_number: Some("MF-0107".to_string()),
                waste_code: "A102d".to_string(),
                waste_type: "Used lead-acid batteries".to_string(),
                category: WasteCategory::One,
                weight: 140.0,
                unit: WasteUnit::Kg,
                generation_date: today - Duration::days(83),
                max_storage_days: 90,
                status: WasteStatus::Stored,
                manager_email: Some("waste@plant.example".to_string()),
            },
            WasteManifest {
                id: "wm-oil".to_string(),
                manifest_number: Some("MF-0098".to_string()),
                waste_code: "B105d".to_string(),
                waste_type: "Used oil".to_string(),
                category: WasteCategory::Two,
                weight: 1.2,
                unit: WasteUnit::Ton,
                generation_date: today - Duration::days(40),
                max_storage_days: 365,
                status: WasteStatus::Stored,
                manager_email: Some("waste@plant.example".to_string()),
            },
            WasteManifest {
                id: "wm-sludge".to_string(),
                manifest_number: Some("MF-0076".to_string()),
                waste_code: "B413".to_string(),
                waste_type: "WWTP sludge".to_string(),
                category: WasteCategory::Two,
                weight: 800.0,
                unit: WasteUnit::Kg,
                generation_date: today - Duration::days(120),
                max_storage_days: 90,
                status: WasteStatus::Transported,
                manager_email: None,
            },
        ],
        esg: Some(EsgAssessment {
            title: "ESG Maturity Self-Assessment 2026".to_string(),
            overall_score: 62,
            maturity_level: "Strategic".to_string(),
        }),
        proper: Some(ProperAssessment {
            title: "PROPER Self-Assessment 2026".to_string(),
            final_rating: None,
            predicted_rating: Some(ProperRating::Blue),
        }),
        ghg: (0..14)
            .map(|i| GhgReading {
                date: today - Duration::days(30 * (14 - i)),
                co2e: 210.0 - i as f64 * 2.5,
            })
            .collect(),
        water: (0..12)
            .map(|i| WastewaterLog {
                log_date: today - Duration::days(7 * (12 - i)),
                ph_level: 6.8 + (i % 3) as f64 * 0.2,
            })
            .collect(),
        domestic: vec![
            DomesticWasteLog {
                log_date: today - Duration::days(10),
                weight: 320.0,
            },
            DomesticWasteLog {
                log_date: today - Duration::days(3),
                weight: 280.0,
            },
        ],
        iso_context: vec![
            IsoContextItem {
                id: "ctx-regulatory".to_string(),
                title: "Tightened effluent standard".to_string(),
                active: true,
            },
            IsoContextItem {
                id: "ctx-community".to_string(),
                title: "Community noise complaint (closed)".to_string(),
                active: false,
            },
        ],
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
