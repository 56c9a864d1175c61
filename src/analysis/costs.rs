//! Cost Visibility
//! Cost totals and per-dimension breakdowns split by tagging status.

use crate::data::ResourceRecord;
use std::collections::HashMap;

/// Bucket label for rows with no value in a grouped tag dimension.
pub const UNASSIGNED: &str = "(unassigned)";

/// Monthly cost totals split by tagging status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub total: f64,
    pub tagged_cost: f64,
    pub untagged_cost: f64,
    pub untagged_cost_pct: f64,
}

pub fn cost_summary(records: &[ResourceRecord]) -> CostSummary {
    let (mut tagged_cost, mut untagged_cost) = (0.0, 0.0);
    for r in records {
        if r.tagged.is_tagged() {
            tagged_cost += r.monthly_cost;
        } else {
            untagged_cost += r.monthly_cost;
        }
    }
    let total = tagged_cost + untagged_cost;
    CostSummary {
        total,
        tagged_cost,
        untagged_cost,
        untagged_cost_pct: if total > 0.0 {
            untagged_cost / total * 100.0
        } else {
            0.0
        },
    }
}

/// Tagged/untagged cost pair for one category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TagSplit {
    pub tagged: f64,
    pub untagged: f64,
}

impl TagSplit {
    pub fn total(&self) -> f64 {
        self.tagged + self.untagged
    }
}

/// Sum cost per bucket, keyed by `key`, split by tagging status.
/// Buckets come back sorted by name.
fn cost_split_by<F>(records: &[ResourceRecord], key: F) -> Vec<(String, TagSplit)>
where
    F: Fn(&ResourceRecord) -> Option<String>,
{
    let mut buckets: HashMap<String, TagSplit> = HashMap::new();
    for r in records {
        let Some(bucket) = key(r) else { continue };
        let split = buckets.entry(bucket).or_default();
        if r.tagged.is_tagged() {
            split.tagged += r.monthly_cost;
        } else {
            split.untagged += r.monthly_cost;
        }
    }
    let mut out: Vec<(String, TagSplit)> = buckets.into_iter().collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Untagged cost per department, sorted descending by cost.
/// Rows without a department land in the `UNASSIGNED` bucket.
pub fn untagged_cost_by_department(records: &[ResourceRecord]) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = cost_split_by(records, |r| {
        Some(r.department.clone().unwrap_or_else(|| UNASSIGNED.to_string()))
    })
    .into_iter()
    .filter(|(_, split)| split.untagged > 0.0)
    .map(|(dept, split)| (dept, split.untagged))
    .collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Total cost per project, sorted descending. Rows without a project are skipped.
pub fn cost_by_project(records: &[ResourceRecord]) -> Vec<(String, f64)> {
    let mut out: Vec<(String, f64)> = cost_split_by(records, |r| r.project.clone())
        .into_iter()
        .map(|(project, split)| (project, split.total()))
        .collect();
    out.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// The four dashboard chart breakdowns over one (possibly filtered) subset.
#[derive(Debug, Clone)]
pub struct DashboardBreakdowns {
    /// Cost per department split by tag status (alphabetical, unassigned bucketed).
    pub department_split: Vec<(String, TagSplit)>,
    /// Total cost per service, sorted ascending for the horizontal bar chart.
    pub service_costs: Vec<(String, f64)>,
    /// Total cost per environment (rows without one are skipped), alphabetical.
    pub environment_costs: Vec<(String, f64)>,
    /// Cost per account split by tag status, alphabetical.
    pub account_split: Vec<(String, TagSplit)>,
    /// Cost per environment split by tag status, alphabetical.
    pub environment_split: Vec<(String, TagSplit)>,
}

/// Compute all dashboard breakdowns, fanning out across two rayon jobs.
pub fn dashboard_breakdowns(records: &[ResourceRecord]) -> DashboardBreakdowns {
    let ((department_split, service_costs), (environment_costs, account_split, environment_split)) =
        rayon::join(
            || {
                let department_split = cost_split_by(records, |r| {
                    Some(r.department.clone().unwrap_or_else(|| UNASSIGNED.to_string()))
                });
                let mut service_costs: Vec<(String, f64)> =
                    cost_split_by(records, |r| Some(r.service.clone()))
                        .into_iter()
                        .map(|(service, split)| (service, split.total()))
                        .collect();
                service_costs
                    .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
                (department_split, service_costs)
            },
            || {
                let environment_split = cost_split_by(records, |r| r.environment.clone());
                let environment_costs = environment_split
                    .iter()
                    .map(|(env, split)| (env.clone(), split.total()))
                    .collect();
                let account_split = cost_split_by(records, |r| Some(r.account_id.clone()));
                (environment_costs, account_split, environment_split)
            },
        );

    DashboardBreakdowns {
        department_split,
        service_costs,
        environment_costs,
        account_split,
        environment_split,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::resource;

    fn sample() -> Vec<ResourceRecord> {
        vec![
            resource("i-1", "EC2", "111", Some("Eng"), Some("Atlas"), Some("Prod"), 100.0, true),
            resource("i-2", "EC2", "111", Some("Eng"), Some("Atlas"), Some("Dev"), 50.0, false),
            resource("i-3", "S3", "222", Some("Fin"), Some("Ledger"), Some("Prod"), 30.0, false),
            resource("i-4", "RDS", "222", None, None, None, 20.0, false),
        ]
    }

    #[test]
    fn summary_splits_costs_by_status() {
        let summary = cost_summary(&sample());
        assert_eq!(summary.total, 200.0);
        assert_eq!(summary.tagged_cost, 100.0);
        assert_eq!(summary.untagged_cost, 100.0);
        assert_eq!(summary.untagged_cost_pct, 50.0);
    }

    #[test]
    fn summary_of_empty_set_has_zero_pct() {
        let summary = cost_summary(&[]);
        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.untagged_cost_pct, 0.0);
    }

    #[test]
    fn untagged_by_department_sorted_desc_with_unassigned_bucket() {
        let by_dept = untagged_cost_by_department(&sample());
        assert_eq!(
            by_dept,
            vec![
                ("Eng".to_string(), 50.0),
                ("Fin".to_string(), 30.0),
                (UNASSIGNED.to_string(), 20.0),
            ]
        );
    }

    #[test]
    fn project_costs_sorted_desc_skipping_missing() {
        let by_project = cost_by_project(&sample());
        assert_eq!(
            by_project,
            vec![("Atlas".to_string(), 150.0), ("Ledger".to_string(), 30.0)]
        );
    }

    #[test]
    fn breakdowns_cover_all_four_dimensions() {
        let b = dashboard_breakdowns(&sample());

        let eng = b
            .department_split
            .iter()
            .find(|(d, _)| d == "Eng")
            .map(|(_, s)| *s)
            .unwrap();
        assert_eq!(eng.tagged, 100.0);
        assert_eq!(eng.untagged, 50.0);

        // Services ascending by total cost.
        assert_eq!(
            b.service_costs,
            vec![
                ("RDS".to_string(), 20.0),
                ("S3".to_string(), 30.0),
                ("EC2".to_string(), 150.0),
            ]
        );

        // Environment totals skip the row with no environment.
        let env_total: f64 = b.environment_costs.iter().map(|(_, c)| c).sum();
        assert_eq!(env_total, 180.0);

        assert_eq!(b.account_split.len(), 2);
        let acct_222 = b
            .account_split
            .iter()
            .find(|(a, _)| a == "222")
            .map(|(_, s)| *s)
            .unwrap();
        assert_eq!(acct_222.untagged, 50.0);
    }
}
