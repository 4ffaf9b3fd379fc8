use doctor_directory::core::normalizer::{normalize_records, parse_experience, parse_fee};
use doctor_directory::query_codec::{decode, encode};
use doctor_directory::{apply, suggest, ConsultationMode, QueryDelta, QueryState, SortKey};
use std::collections::BTreeSet;

fn records() -> Vec<doctor_directory::PractitionerRecord> {
    normalize_records(&[
        serde_json::json!({"name": "Dr A", "fees": "500", "experience": "10 Years of experience",
                           "specialities": [{"name": "Cardiologist"}], "in_clinic": true}),
        serde_json::json!({"name": "Dr B", "fees": "300", "experience": "5 Years of experience",
                           "specialities": [{"name": "Dermatologist"}], "video_consult": true}),
    ])
}

fn names(view: &[&doctor_directory::PractitionerRecord]) -> Vec<String> {
    view.iter().map(|r| r.name.clone()).collect()
}

#[test]
fn test_listed_scenarios() {
    let records = records();

    assert_eq!(names(&apply(&records, &decode("sort=fees"))), vec!["Dr B", "Dr A"]);
    assert_eq!(names(&apply(&records, &decode("specialty=Cardiologist"))), vec!["Dr A"]);
    assert_eq!(names(&apply(&records, &decode("search=DR"))), vec!["Dr A", "Dr B"]);

    assert_eq!(parse_fee(Some(&serde_json::json!("₹ 1,200"))), 1200);
    assert_eq!(parse_experience(Some(&serde_json::json!("7 Years of experience"))), 7);
}

#[test]
fn test_consultation_toggle_semantics() {
    let mut query = String::new();

    let delta = decode(&query).toggled_consultation(ConsultationMode::VideoConsult);
    query = encode(&query, &delta);
    assert_eq!(decode(&query).consultation_mode, Some(ConsultationMode::VideoConsult));

    let delta = decode(&query).toggled_consultation(ConsultationMode::InClinic);
    query = encode(&query, &delta);
    assert_eq!(query, "consultation=In+Clinic");

    let delta = decode(&query).toggled_consultation(ConsultationMode::InClinic);
    query = encode(&query, &delta);
    assert_eq!(query, "");
}

#[test]
fn test_round_trip_over_many_states() {
    let queries = [
        "",
        "search=dr",
        "specialty=ENT&specialty=Dentist&sort=experience",
        "consultation=Video+Consult&foo=bar&search=x",
    ];
    let specialty_sets = [
        BTreeSet::new(),
        BTreeSet::from(["ENT".to_string()]),
        BTreeSet::from(["Dentist".to_string(), "General Physician".to_string()]),
    ];

    for query in queries {
        for specialties in &specialty_sets {
            for sort in [None, Some(SortKey::Fee), Some(SortKey::Experience)] {
                let delta = QueryDelta {
                    specialties: QueryDelta::specialties(specialties.clone()).specialties,
                    sort_key: QueryDelta::sort(sort).sort_key,
                    ..QueryDelta::search("Dr. O'Neil & Sons")
                };
                let expected: QueryState = decode(query).merge(&delta);
                assert_eq!(decode(&encode(query, &delta)), expected);
            }
        }
    }
}

#[test]
fn test_suggestions_are_capped() {
    let records = records();
    assert_eq!(suggest(&records, "dr", 1).len(), 1);
    assert!(suggest(&records, "", 3).is_empty());
}
