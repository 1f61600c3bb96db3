//! Version label sequencing for evidence uploads.

use crate::data_model::EvidenceVersion;

/// Next label in the `v1`, `v2`, ... sequence: highest existing numeric
/// suffix plus one, `v1` for an empty history. Labels without a numeric
/// suffix are ignored.
pub fn next_version_label(versions: &[EvidenceVersion]) -> String {
    let max = versions
        .iter()
        .filter_map(|v| v.version_label.trim_start_matches('v').parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("v{}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn version(label: &str) -> EvidenceVersion {
        let day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        EvidenceVersion {
            id: format!("ev_test_{}", label),
            version_label: label.to_string(),
            uploaded_at: day,
            uploader: "tester".to_string(),
            notes: String::new(),
            file_size_bytes: 1,
            expiry_date: day,
        }
    }

    #[test]
    fn test_next_label_from_max_suffix() {
        let versions = vec![version("v3"), version("v1")];
        assert_eq!(next_version_label(&versions), "v4");
    }

    #[test]
    fn test_next_label_for_empty_history() {
        assert_eq!(next_version_label(&[]), "v1");
    }

    #[test]
    fn test_non_numeric_labels_are_ignored() {
        let versions = vec![version("draft"), version("v2")];
        assert_eq!(next_version_label(&versions), "v3");
    }
}
