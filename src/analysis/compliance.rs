//! Tagging Compliance
//! Completeness scoring, missing-field counts and the untagged worklist.

use crate::data::{ResourceRecord, TAG_FIELDS};
use rayon::prelude::*;

/// One row of the lowest-completeness table.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletenessRow {
    pub resource_id: String,
    pub service: String,
    pub completeness_pct: f64,
    pub monthly_cost: f64,
}

/// One row of the untagged-resources worklist.
#[derive(Debug, Clone, PartialEq)]
pub struct UntaggedRow {
    pub resource_id: String,
    pub service: String,
    pub department: Option<String>,
    pub monthly_cost: f64,
}

/// Compliance view over one table copy.
#[derive(Debug, Clone)]
pub struct ComplianceOverview {
    /// Bottom-N resources by completeness, expensive ones first within a tie.
    pub lowest_completeness: Vec<CompletenessRow>,
    /// Missing count per tag field, sorted descending.
    pub missing_fields: Vec<(String, usize)>,
    /// Untagged resources sorted by monthly cost descending.
    pub untagged: Vec<UntaggedRow>,
    /// Resource count per completeness bucket (0, 20, 40, 60, 80, 100 percent).
    pub histogram: [usize; 6],
}

pub fn analyze_compliance(records: &[ResourceRecord], lowest_n: usize) -> ComplianceOverview {
    let scores: Vec<usize> = records.par_iter().map(|r| r.tag_completeness()).collect();

    let mut histogram = [0usize; 6];
    for &score in &scores {
        histogram[score.min(5)] += 1;
    }

    let mut ranked: Vec<CompletenessRow> = records
        .iter()
        .zip(&scores)
        .map(|(r, &score)| CompletenessRow {
            resource_id: r.resource_id.clone(),
            service: r.service.clone(),
            completeness_pct: score as f64 / TAG_FIELDS.len() as f64 * 100.0,
            monthly_cost: r.monthly_cost,
        })
        .collect();
    ranked.sort_by(|a, b| {
        a.completeness_pct
            .partial_cmp(&b.completeness_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.monthly_cost
                    .partial_cmp(&a.monthly_cost)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });
    ranked.truncate(lowest_n);

    let mut missing_fields: Vec<(String, usize)> = TAG_FIELDS
        .iter()
        .enumerate()
        .map(|(idx, field)| {
            let missing = records
                .iter()
                .filter(|r| {
                    r.tag_fields()[idx]
                        .as_deref()
                        .map_or(true, |v| v.trim().is_empty())
                })
                .count();
            (field.to_string(), missing)
        })
        .collect();
    missing_fields.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut untagged: Vec<UntaggedRow> = records
        .iter()
        .filter(|r| !r.tagged.is_tagged())
        .map(|r| UntaggedRow {
            resource_id: r.resource_id.clone(),
            service: r.service.clone(),
            department: r.department.clone(),
            monthly_cost: r.monthly_cost,
        })
        .collect();
    untagged.sort_by(|a, b| {
        b.monthly_cost
            .partial_cmp(&a.monthly_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ComplianceOverview {
        lowest_completeness: ranked,
        missing_fields,
        untagged,
        histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::resource;

    fn sample() -> Vec<ResourceRecord> {
        vec![
            // 3/5 fields set
            resource("i-1", "EC2", "111", Some("Eng"), Some("Atlas"), Some("Prod"), 100.0, true),
            // 0/5, cheap
            resource("i-2", "S3", "111", None, None, None, 10.0, false),
            // 0/5, expensive
            resource("i-3", "RDS", "222", None, None, None, 500.0, false),
            // 1/5
            resource("i-4", "EC2", "222", Some("Fin"), None, None, 50.0, false),
        ]
    }

    #[test]
    fn lowest_completeness_breaks_ties_by_cost() {
        let overview = analyze_compliance(&sample(), 3);
        let ids: Vec<&str> = overview
            .lowest_completeness
            .iter()
            .map(|r| r.resource_id.as_str())
            .collect();
        // Both zero-score rows first, the expensive one leading.
        assert_eq!(ids, vec!["i-3", "i-2", "i-4"]);
        assert_eq!(overview.lowest_completeness[0].completeness_pct, 0.0);
        assert_eq!(overview.lowest_completeness[2].completeness_pct, 20.0);
    }

    #[test]
    fn missing_fields_sorted_descending() {
        let overview = analyze_compliance(&sample(), 5);
        let missing: std::collections::HashMap<_, _> =
            overview.missing_fields.iter().cloned().collect();
        assert_eq!(missing["Owner"], 4);
        assert_eq!(missing["CostCenter"], 4);
        assert_eq!(missing["Department"], 2);
        assert!(overview.missing_fields[0].1 >= overview.missing_fields[4].1);
    }

    #[test]
    fn untagged_worklist_sorted_by_cost() {
        let overview = analyze_compliance(&sample(), 5);
        let ids: Vec<&str> = overview
            .untagged
            .iter()
            .map(|r| r.resource_id.as_str())
            .collect();
        assert_eq!(ids, vec!["i-3", "i-4", "i-2"]);
    }

    #[test]
    fn histogram_buckets_by_field_count() {
        let overview = analyze_compliance(&sample(), 5);
        assert_eq!(overview.histogram, [2, 1, 0, 1, 0, 0]);
        assert_eq!(overview.histogram.iter().sum::<usize>(), 4);
    }
}
