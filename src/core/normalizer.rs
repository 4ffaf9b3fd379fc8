use crate::core::{ConsultationMode, PractitionerRecord};
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

const UNKNOWN_NAME: &str = "Unknown";

/// Normalizes every object in the feed. Non-object items are skipped.
pub fn normalize_records(items: &[Value]) -> Vec<PractitionerRecord> {
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        if !item.is_object() {
            tracing::warn!("Skipping non-object feed item at position {}", index);
            continue;
        }
        records.push(normalize_record(index, item));
    }

    tracing::debug!("Normalized {} of {} feed items", records.len(), items.len());
    records
}

/// Maps one upstream item onto a [`PractitionerRecord`]. Every field falls
/// back to a safe default instead of failing the record.
pub fn normalize_record(index: usize, item: &Value) -> PractitionerRecord {
    let id = match item.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("#{}", index),
    };

    let name = non_blank(item.get("name"))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let specialties: Vec<String> = item
        .get("specialities")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|s| non_blank(s.get("name")))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut consultation_modes = BTreeSet::new();
    if truthy(item.get("video_consult")) {
        consultation_modes.insert(ConsultationMode::VideoConsult);
    }
    if truthy(item.get("in_clinic")) {
        consultation_modes.insert(ConsultationMode::InClinic);
    }

    let qualifications: Vec<String> = item
        .get("languages")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let clinic = item.get("clinic");

    PractitionerRecord {
        id,
        name,
        image_url: non_blank(item.get("photo")).map(str::to_string),
        specialties,
        experience_years: parse_experience(item.get("experience")),
        fee_amount: parse_fee(item.get("fees")),
        consultation_modes,
        qualifications,
        clinic_name: non_blank(clinic.and_then(|c| c.get("name"))).map(str::to_string),
        clinic_city: non_blank(
            clinic
                .and_then(|c| c.get("address"))
                .and_then(|a| a.get("city")),
        )
        .map(str::to_string),
    }
}

/// `"₹ 1,200"` → 1200. All non-digit characters are dropped before parsing.
pub fn parse_fee(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::String(s)) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(0)
        }
        Some(Value::Number(n)) => number_or_zero(n),
        _ => 0,
    }
}

/// `"7 Years of experience"` → 7. Only the first run of digits counts.
pub fn parse_experience(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::String(s)) => FIRST_NUMBER
            .find(s)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0),
        Some(Value::Number(n)) => u32::try_from(number_or_zero(n)).unwrap_or(0),
        _ => 0,
    }
}

fn number_or_zero(n: &serde_json::Number) -> u64 {
    if let Some(v) = n.as_u64() {
        return v;
    }
    match n.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 && v < u64::MAX as f64 => v.trunc() as u64,
        _ => 0,
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1"
        ),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

fn non_blank(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
