//! Query-string codec for [`QueryState`].
//!
//! The page address carries four keys: `search`, `consultation`, `specialty`
//! (repeatable) and `sort`. Decoding ignores everything else; encoding is a
//! merge that rewrites only the keys a [`QueryDelta`] names and keeps every
//! other pair where it was.

use crate::core::{ConsultationMode, FieldUpdate, QueryDelta, QueryState, SortKey};
use std::collections::BTreeSet;
use url::form_urlencoded;

pub const SEARCH_KEY: &str = "search";
pub const CONSULTATION_KEY: &str = "consultation";
pub const SPECIALTY_KEY: &str = "specialty";
pub const SORT_KEY: &str = "sort";

/// Reads the query state out of a query string (leading `?` allowed).
pub fn decode(query: &str) -> QueryState {
    let mut state = QueryState::default();
    let mut search_seen = false;
    let mut consultation_seen = false;
    let mut sort_seen = false;

    for (key, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        match key.as_ref() {
            SEARCH_KEY if !search_seen => {
                search_seen = true;
                if !value.trim().is_empty() {
                    state.search_text = Some(value.into_owned());
                }
            }
            CONSULTATION_KEY if !consultation_seen => {
                consultation_seen = true;
                state.consultation_mode = ConsultationMode::from_query_value(&value);
                if state.consultation_mode.is_none() && !value.is_empty() {
                    state.unknown_consultation = Some(value.into_owned());
                }
            }
            SPECIALTY_KEY => {
                state.specialties.insert(value.into_owned());
            }
            SORT_KEY if !sort_seen => {
                sort_seen = true;
                state.sort_key = SortKey::from_query_value(&value);
            }
            _ => {}
        }
    }

    state
}

/// Applies `delta` to `current_query` and returns the new query string.
pub fn encode(current_query: &str, delta: &QueryDelta) -> String {
    let mut pairs: Vec<(String, String)> =
        form_urlencoded::parse(strip_question_mark(current_query).as_bytes())
            .into_owned()
            .collect();

    if let Some(update) = &delta.search_text {
        let value = match update {
            FieldUpdate::Set(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        };
        replace_single(&mut pairs, SEARCH_KEY, value);
    }
    if let Some(update) = &delta.consultation_mode {
        let value = match update {
            FieldUpdate::Set(mode) => Some(mode.as_query_value()),
            FieldUpdate::Clear => None,
        };
        replace_single(&mut pairs, CONSULTATION_KEY, value);
    }
    if let Some(update) = &delta.specialties {
        pairs.retain(|(k, _)| k != SPECIALTY_KEY);
        if let FieldUpdate::Set(selected) = update {
            pairs.extend(
                selected
                    .iter()
                    .map(|s| (SPECIALTY_KEY.to_string(), s.clone())),
            );
        }
    }
    if let Some(update) = &delta.sort_key {
        let value = match update {
            FieldUpdate::Set(key) => Some(key.as_query_value()),
            FieldUpdate::Clear => None,
        };
        replace_single(&mut pairs, SORT_KEY, value);
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

impl QueryState {
    /// Encodes this state on its own, e.g. for a shareable link.
    pub fn to_query(&self) -> String {
        let delta = QueryDelta {
            search_text: self.search_text.clone().map(FieldUpdate::Set),
            consultation_mode: self.consultation_mode.map(FieldUpdate::Set),
            specialties: (!self.specialties.is_empty())
                .then(|| FieldUpdate::Set(self.specialties.clone())),
            sort_key: self.sort_key.map(FieldUpdate::Set),
        };
        let base = match &self.unknown_consultation {
            Some(raw) => form_urlencoded::Serializer::new(String::new())
                .append_pair(CONSULTATION_KEY, raw)
                .finish(),
            None => String::new(),
        };
        encode(&base, &delta)
    }

    pub fn toggled_consultation(&self, mode: ConsultationMode) -> QueryDelta {
        let next = (self.consultation_mode != Some(mode)).then_some(mode);
        QueryDelta::consultation(next)
    }

    pub fn toggled_specialty(&self, specialty: &str) -> QueryDelta {
        let mut selected: BTreeSet<String> = self.specialties.clone();
        if !selected.remove(specialty) {
            selected.insert(specialty.to_string());
        }
        QueryDelta::specialties(selected)
    }

    pub fn toggled_sort(&self, key: SortKey) -> QueryDelta {
        let next = (self.sort_key != Some(key)).then_some(key);
        QueryDelta::sort(next)
    }
}

/// Drops every pair for `key`, then puts the new value where the first one was.
fn replace_single(pairs: &mut Vec<(String, String)>, key: &str, value: Option<&str>) {
    let position = pairs.iter().position(|(k, _)| k == key);
    pairs.retain(|(k, _)| k != key);

    if let Some(value) = value {
        let entry = (key.to_string(), value.to_string());
        match position {
            Some(i) => pairs.insert(i, entry),
            None => pairs.push(entry),
        }
    }
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
