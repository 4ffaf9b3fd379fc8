use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Ways a practitioner can be consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConsultationMode {
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    pub const ALL: [ConsultationMode; 2] =
        [ConsultationMode::VideoConsult, ConsultationMode::InClinic];

    /// Value carried by the `consultation` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "Video Consult" => Some(ConsultationMode::VideoConsult),
            "In Clinic" => Some(ConsultationMode::InClinic),
            _ => None,
        }
    }
}

impl fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Lowest fee first.
    Fee,
    /// Most experienced first.
    Experience,
}

impl SortKey {
    pub const ALL: [SortKey; 2] = [SortKey::Fee, SortKey::Experience];

    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Fee => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fee),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Fee => "Price: Low → High",
            SortKey::Experience => "Experience: Most Experience first",
        }
    }
}

/// A practitioner after normalization of the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractitionerRecord {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub fee_amount: u64,
    pub consultation_modes: BTreeSet<ConsultationMode>,
    /// Sourced from the feed's `languages` list.
    pub qualifications: Vec<String>,
    pub clinic_name: Option<String>,
    pub clinic_city: Option<String>,
}

impl PractitionerRecord {
    pub fn offers(&self, mode: ConsultationMode) -> bool {
        self.consultation_modes.contains(&mode)
    }

    pub fn has_any_specialty(&self, selected: &BTreeSet<String>) -> bool {
        self.specialties.iter().any(|s| selected.contains(s))
    }
}

/// Search, filter and sort selections as carried by the page address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub search_text: Option<String>,
    pub consultation_mode: Option<ConsultationMode>,
    /// Raw `consultation` value that names no known mode. No record matches it.
    pub unknown_consultation: Option<String>,
    pub specialties: BTreeSet<String>,
    pub sort_key: Option<SortKey>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    fn apply_to(self, slot: &mut Option<T>) {
        *slot = match self {
            FieldUpdate::Set(value) => Some(value),
            FieldUpdate::Clear => None,
        };
    }
}

/// A partial update of [`QueryState`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryDelta {
    pub search_text: Option<FieldUpdate<String>>,
    pub consultation_mode: Option<FieldUpdate<ConsultationMode>>,
    pub specialties: Option<FieldUpdate<BTreeSet<String>>>,
    pub sort_key: Option<FieldUpdate<SortKey>>,
}

impl QueryDelta {
    /// Sets `search`, or deletes it when the text is blank.
    pub fn search(text: &str) -> Self {
        let update = if text.trim().is_empty() {
            FieldUpdate::Clear
        } else {
            FieldUpdate::Set(text.to_string())
        };
        Self {
            search_text: Some(update),
            ..Self::default()
        }
    }

    pub fn consultation(mode: Option<ConsultationMode>) -> Self {
        Self {
            consultation_mode: Some(mode.map_or(FieldUpdate::Clear, FieldUpdate::Set)),
            ..Self::default()
        }
    }

    pub fn specialties(selected: BTreeSet<String>) -> Self {
        let update = if selected.is_empty() {
            FieldUpdate::Clear
        } else {
            FieldUpdate::Set(selected)
        };
        Self {
            specialties: Some(update),
            ..Self::default()
        }
    }

    pub fn sort(key: Option<SortKey>) -> Self {
        Self {
            sort_key: Some(key.map_or(FieldUpdate::Clear, FieldUpdate::Set)),
            ..Self::default()
        }
    }
}

impl QueryState {
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_none()
            && self.consultation_mode.is_none()
            && self.unknown_consultation.is_none()
            && self.specialties.is_empty()
            && self.sort_key.is_none()
    }

    /// Value of this state with `delta` applied on top.
    pub fn merge(&self, delta: &QueryDelta) -> QueryState {
        let mut next = self.clone();

        if let Some(update) = &delta.search_text {
            update.clone().apply_to(&mut next.search_text);
            // Blank text never survives a decode, so it does not survive a merge either.
            if next.search_text.as_deref().is_some_and(|s| s.trim().is_empty()) {
                next.search_text = None;
            }
        }
        if let Some(update) = &delta.consultation_mode {
            update.clone().apply_to(&mut next.consultation_mode);
            next.unknown_consultation = None;
        }
        if let Some(update) = &delta.specialties {
            next.specialties = match update {
                FieldUpdate::Set(selected) => selected.clone(),
                FieldUpdate::Clear => BTreeSet::new(),
            };
        }
        if let Some(update) = &delta.sort_key {
            update.clone().apply_to(&mut next.sort_key);
        }

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_values_round_trip() {
        for mode in ConsultationMode::ALL {
            assert_eq!(ConsultationMode::from_query_value(mode.as_query_value()), Some(mode));
        }
        for key in SortKey::ALL {
            assert_eq!(SortKey::from_query_value(key.as_query_value()), Some(key));
        }
        assert_eq!(ConsultationMode::from_query_value("video consult"), None);
        assert_eq!(SortKey::from_query_value("price"), None);
    }

    #[test]
    fn test_merge_leaves_untouched_fields() {
        let state = QueryState {
            search_text: Some("sharma".to_string()),
            consultation_mode: Some(ConsultationMode::InClinic),
            specialties: BTreeSet::from(["Dentist".to_string()]),
            ..QueryState::default()
        };

        let merged = state.merge(&QueryDelta::sort(Some(SortKey::Experience)));

        assert_eq!(merged.search_text.as_deref(), Some("sharma"));
        assert_eq!(merged.consultation_mode, Some(ConsultationMode::InClinic));
        assert_eq!(merged.specialties.len(), 1);
        assert_eq!(merged.sort_key, Some(SortKey::Experience));
    }

    #[test]
    fn test_blank_search_clears() {
        let state = QueryState {
            search_text: Some("dr".to_string()),
            ..QueryState::default()
        };
        assert_eq!(QueryDelta::search("   ").search_text, Some(FieldUpdate::Clear));
        assert!(state.merge(&QueryDelta::search("   ")).is_unfiltered());
    }

    #[test]
    fn test_consultation_update_replaces_unknown_value() {
        let state = QueryState {
            unknown_consultation: Some("video".to_string()),
            ..QueryState::default()
        };
        assert!(!state.is_unfiltered());

        let merged = state.merge(&QueryDelta::consultation(Some(ConsultationMode::VideoConsult)));
        assert_eq!(merged.consultation_mode, Some(ConsultationMode::VideoConsult));
        assert_eq!(merged.unknown_consultation, None);

        assert!(state.merge(&QueryDelta::consultation(None)).is_unfiltered());
        assert_eq!(state.merge(&QueryDelta::sort(None)), state);
    }
}
