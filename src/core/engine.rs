use crate::core::{PractitionerRecord, QueryState, SortKey};
use std::collections::BTreeSet;

/// Produces the visible list for `state`: search, then consultation mode,
/// then specialties, then the sort. Sorts are stable, so ties keep feed order.
/// An unrecognized consultation value matches nothing.
pub fn apply<'a>(
    records: &'a [PractitionerRecord],
    state: &QueryState,
) -> Vec<&'a PractitionerRecord> {
    let needle = state.search_text.as_deref().map(str::to_lowercase);

    let mut view: Vec<&PractitionerRecord> = records
        .iter()
        .filter(|r| {
            needle
                .as_deref()
                .is_none_or(|n| r.name.to_lowercase().contains(n))
        })
        .filter(|_| state.unknown_consultation.is_none())
        .filter(|r| state.consultation_mode.is_none_or(|mode| r.offers(mode)))
        .filter(|r| state.specialties.is_empty() || r.has_any_specialty(&state.specialties))
        .collect();

    match state.sort_key {
        Some(SortKey::Fee) => view.sort_by_key(|r| r.fee_amount),
        Some(SortKey::Experience) => {
            view.sort_by(|a, b| b.experience_years.cmp(&a.experience_years))
        }
        None => {}
    }

    tracing::debug!(
        "Filtered {} practitioners down to {} for {:?}",
        records.len(),
        view.len(),
        state
    );
    view
}

/// Every distinct specialty in the record set, sorted.
pub fn specialty_options(records: &[PractitionerRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.specialties.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query_codec::decode;
    use crate::core::ConsultationMode;

    fn record(
        name: &str,
        fee: u64,
        exp: u32,
        specialties: &[&str],
        modes: &[ConsultationMode],
    ) -> PractitionerRecord {
        PractitionerRecord {
            id: name.to_string(),
            name: name.to_string(),
            image_url: None,
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            experience_years: exp,
            fee_amount: fee,
            consultation_modes: modes.iter().copied().collect(),
            qualifications: vec![],
            clinic_name: None,
            clinic_city: None,
        }
    }

    fn sample() -> Vec<PractitionerRecord> {
        vec![
            record("Dr A", 500, 10, &["Cardiologist"], &[ConsultationMode::InClinic]),
            record("Dr B", 300, 5, &["Dermatologist"], &[ConsultationMode::VideoConsult]),
        ]
    }

    fn names(view: &[&PractitionerRecord]) -> Vec<String> {
        view.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_no_filters_is_identity() {
        let records = sample();
        let view = apply(&records, &QueryState::default());
        assert_eq!(names(&view), vec!["Dr A", "Dr B"]);
        assert!(apply(&[], &decode("sort=fees&search=x")).is_empty());
    }

    #[test]
    fn test_sort_by_fee() {
        let records = sample();
        assert_eq!(names(&apply(&records, &decode("sort=fees"))), vec!["Dr B", "Dr A"]);
    }

    #[test]
    fn test_sort_by_experience_is_descending() {
        let mut records = sample();
        records.push(record("Dr C", 100, 20, &[], &[]));
        assert_eq!(
            names(&apply(&records, &decode("sort=experience"))),
            vec!["Dr C", "Dr A", "Dr B"]
        );
    }

    #[test]
    fn test_sorts_are_stable() {
        let records = vec![
            record("First", 200, 3, &[], &[]),
            record("Second", 100, 7, &[], &[]),
            record("Third", 200, 7, &[], &[]),
            record("Fourth", 100, 3, &[], &[]),
        ];

        assert_eq!(
            names(&apply(&records, &decode("sort=fees"))),
            vec!["Second", "Fourth", "First", "Third"]
        );
        assert_eq!(
            names(&apply(&records, &decode("sort=experience"))),
            vec!["Second", "Third", "First", "Fourth"]
        );
    }

    #[test]
    fn test_specialty_filter() {
        let records = sample();
        assert_eq!(
            names(&apply(&records, &decode("specialty=Cardiologist"))),
            vec!["Dr A"]
        );
    }

    #[test]
    fn test_specialties_are_or_within_category() {
        let mut records = sample();
        records.push(record("Dr C", 100, 1, &["ENT"], &[]));
        let view = apply(&records, &decode("specialty=Cardiologist&specialty=Dermatologist"));
        assert_eq!(names(&view), vec!["Dr A", "Dr B"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let records = sample();
        assert_eq!(names(&apply(&records, &decode("search=dr"))), vec!["Dr A", "Dr B"]);
        assert_eq!(names(&apply(&records, &decode("search=DR%20b"))), vec!["Dr B"]);
        assert!(apply(&records, &decode("search=smith")).is_empty());
    }

    #[test]
    fn test_categories_compose_with_and() {
        let records = sample();
        let view = apply(&records, &decode("consultation=Video+Consult&specialty=Cardiologist"));
        assert!(view.is_empty());

        let view = apply(&records, &decode("consultation=In+Clinic&specialty=Cardiologist"));
        assert_eq!(names(&view), vec!["Dr A"]);
    }

    #[test]
    fn test_unrecognized_consultation_matches_nothing() {
        let records = sample();
        assert!(apply(&records, &decode("consultation=video")).is_empty());
        assert!(apply(&records, &decode("consultation=Phone&sort=fees")).is_empty());
        assert_eq!(names(&apply(&records, &decode("consultation="))), vec!["Dr A", "Dr B"]);
    }

    #[test]
    fn test_specialty_options_are_distinct_and_sorted() {
        let records = vec![
            record("A", 0, 0, &["ENT", "Dentist"], &[]),
            record("B", 0, 0, &["Dentist"], &[]),
        ];
        assert_eq!(specialty_options(&records), vec!["Dentist", "ENT"]);
    }
}
