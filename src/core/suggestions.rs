use crate::core::PractitionerRecord;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

/// Autocomplete matches for the search box: names containing `partial`
/// (case-insensitive), in feed order, at most `limit` of them. Blank input
/// suggests nothing.
pub fn suggest<'a>(
    records: &'a [PractitionerRecord],
    partial: &str,
    limit: usize,
) -> Vec<&'a PractitionerRecord> {
    if partial.trim().is_empty() {
        return Vec::new();
    }

    let needle = partial.to_lowercase();
    records
        .iter()
        .filter(|r| r.name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::normalizer::normalize_records;
    use serde_json::json;

    fn records() -> Vec<PractitionerRecord> {
        normalize_records(&[
            json!({"name": "Dr. Aditi Sharma"}),
            json!({"name": "Dr. Rahul Verma"}),
            json!({"name": "Dr. Sharmila Rao"}),
            json!({"name": "Dr. Vikram Sharma"}),
            json!({"name": "Dr. Ananya Iyer"}),
        ])
    }

    #[test]
    fn test_blank_input_suggests_nothing() {
        let records = records();
        assert!(suggest(&records, "", DEFAULT_SUGGESTION_LIMIT).is_empty());
        assert!(suggest(&records, "   ", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn test_matches_keep_feed_order_and_limit() {
        let records = records();
        let names: Vec<&str> = suggest(&records, "SHARM", DEFAULT_SUGGESTION_LIMIT)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dr. Aditi Sharma", "Dr. Sharmila Rao", "Dr. Vikram Sharma"]);

        assert_eq!(suggest(&records, "dr", DEFAULT_SUGGESTION_LIMIT).len(), 3);
        assert_eq!(suggest(&records, "dr", 10).len(), 5);
        assert!(suggest(&records, "dr", 0).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(suggest(&records(), "smith", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }
}
