use crate::core::PractitionerRecord;
use crate::utils::error::{DirectoryError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    specialties: String,
    experience_years: u32,
    fee_amount: u64,
    consultation_modes: String,
    qualifications: String,
    clinic_name: &'a str,
    clinic_city: &'a str,
}

impl<'a> From<&'a PractitionerRecord> for CsvRow<'a> {
    fn from(record: &'a PractitionerRecord) -> Self {
        Self {
            id: &record.id,
            name: &record.name,
            specialties: record.specialties.join("; "),
            experience_years: record.experience_years,
            fee_amount: record.fee_amount,
            consultation_modes: record
                .consultation_modes
                .iter()
                .map(|m| m.as_query_value())
                .collect::<Vec<_>>()
                .join("; "),
            qualifications: record.qualifications.join("; "),
            clinic_name: record.clinic_name.as_deref().unwrap_or(""),
            clinic_city: record.clinic_city.as_deref().unwrap_or(""),
        }
    }
}

/// The current view as CSV, one row per practitioner, header included.
pub fn to_csv(records: &[&PractitionerRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        writer.write_record([
            "id",
            "name",
            "specialties",
            "experience_years",
            "fee_amount",
            "consultation_modes",
            "qualifications",
            "clinic_name",
            "clinic_city",
        ])?;
    }
    for record in records {
        writer.serialize(CsvRow::from(*record))?;
    }

    let bytes = writer.into_inner().map_err(|e| DirectoryError::ProcessingError {
        message: format!("failed to flush CSV output: {}", e),
    })?;
    String::from_utf8(bytes).map_err(|e| DirectoryError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn to_json(records: &[&PractitionerRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
