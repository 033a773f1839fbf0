use super::domain::{ComplianceReport, WasteManifest};

/// CSV serialization failure.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv output was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

fn to_csv<T: serde::Serialize>(rows: &[T]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Csv(err.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Flatten waste manifests into a downloadable CSV document.
pub fn manifests_to_csv(manifests: &[WasteManifest]) -> Result<String, ExportError> {
    to_csv(manifests)
}

/// Flatten compliance reports into a downloadable CSV document.
pub fn reports_to_csv(reports: &[ComplianceReport]) -> Result<String, ExportError> {
    to_csv(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::domain::{ReportStatus, WasteCategory, WasteStatus, WasteUnit};
    use chrono::NaiveDate;

    #[test]
    fn manifest_export_includes_header_and_rows() {
        let manifests = vec![WasteManifest {
            id: "wm-1".to_string(),
            manifest_number: Some("MF-0001".to_string()),
            waste_code: "A102d".to_string(),
            waste_type: "Used lead-acid batteries".to_string(),
            category: WasteCategory::One,
            weight: 120.0,
            unit: WasteUnit::Kg,
            generation_date: NaiveDate::from_ymd_opt(2026, 1, 10).expect("valid date"),
            max_storage_days: 90,
            status: WasteStatus::Stored,
            manager_email: None,
        }];

        let csv = manifests_to_csv(&manifests).expect("manifests serialize");
        let mut lines = csv.lines();
        let header = lines.next().expect("header row");
        assert!(header.contains("waste_code"));
        let row = lines.next().expect("data row");
        assert!(row.contains("A102d"));
        assert!(row.contains("2026-01-10"));
    }

    #[test]
    fn empty_report_export_is_empty() {
        let csv = reports_to_csv(&[]).expect("empty set serializes");
        assert!(csv.is_empty());
    }

    #[test]
    fn report_export_round_trips_status_labels() {
        let reports = vec![ComplianceReport {
            id: "rep-1".to_string(),
            title: "SPARING quarterly upload".to_string(),
            due_date: Some(NaiveDate::from_ymd_opt(2026, 9, 30).expect("valid date")),
            status: ReportStatus::Pending,
            manager_email: Some("ehs@plant.example".to_string()),
        }];
        let csv = reports_to_csv(&reports).expect("reports serialize");
        assert!(csv.contains("Pending"));
    }
}
