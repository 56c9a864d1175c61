//! Dashboard Filters
//! Multi-select filtering across five dimensions.

use crate::data::ResourceRecord;
use std::collections::HashSet;

/// Sorted distinct values of one dimension, skipping missing cells.
pub fn distinct_values<F>(records: &[ResourceRecord], key: F) -> Vec<String>
where
    F: Fn(&ResourceRecord) -> Option<&str>,
{
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|r| key(r))
        .map(str::to_string)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    values.sort();
    values
}

/// Selected values per dimension for the dashboard tab.
///
/// Service and region must match the selection. For the tag-field
/// dimensions (department, environment, project) rows with a missing value
/// pass the filter so untagged resources stay visible.
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub services: HashSet<String>,
    pub regions: HashSet<String>,
    pub departments: HashSet<String>,
    pub environments: HashSet<String>,
    pub projects: HashSet<String>,
}

impl ResourceFilter {
    /// A filter with every distinct value selected (everything passes).
    pub fn select_all(records: &[ResourceRecord]) -> Self {
        Self {
            services: distinct_values(records, |r| Some(r.service.as_str()))
                .into_iter()
                .collect(),
            regions: distinct_values(records, |r| Some(r.region.as_str()))
                .into_iter()
                .collect(),
            departments: distinct_values(records, |r| r.department.as_deref())
                .into_iter()
                .collect(),
            environments: distinct_values(records, |r| r.environment.as_deref())
                .into_iter()
                .collect(),
            projects: distinct_values(records, |r| r.project.as_deref())
                .into_iter()
                .collect(),
        }
    }

    pub fn matches(&self, r: &ResourceRecord) -> bool {
        let tag_dim_ok = |selected: &HashSet<String>, value: &Option<String>| match value {
            Some(v) => selected.contains(v),
            None => true,
        };

        self.services.contains(&r.service)
            && self.regions.contains(&r.region)
            && tag_dim_ok(&self.departments, &r.department)
            && tag_dim_ok(&self.environments, &r.environment)
            && tag_dim_ok(&self.projects, &r.project)
    }

    pub fn apply(&self, records: &[ResourceRecord]) -> Vec<ResourceRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::resource;

    fn sample() -> Vec<ResourceRecord> {
        vec![
            resource("i-1", "EC2", "111", Some("Eng"), Some("Atlas"), Some("Prod"), 10.0, true),
            resource("i-2", "S3", "111", Some("Fin"), Some("Ledger"), Some("Dev"), 20.0, true),
            resource("i-3", "RDS", "222", None, None, None, 30.0, false),
        ]
    }

    #[test]
    fn select_all_passes_everything() {
        let records = sample();
        let filter = ResourceFilter::select_all(&records);
        assert_eq!(filter.apply(&records).len(), 3);
    }

    #[test]
    fn service_filter_is_strict() {
        let records = sample();
        let mut filter = ResourceFilter::select_all(&records);
        filter.services.remove("S3");
        let ids: Vec<_> = filter
            .apply(&records)
            .into_iter()
            .map(|r| r.resource_id)
            .collect();
        assert_eq!(ids, vec!["i-1", "i-3"]);
    }

    #[test]
    fn rows_with_missing_tag_values_always_pass_tag_dimensions() {
        let records = sample();
        let mut filter = ResourceFilter::select_all(&records);
        filter.departments.clear();
        // Only the row with no department survives a cleared department filter.
        let ids: Vec<_> = filter
            .apply(&records)
            .into_iter()
            .map(|r| r.resource_id)
            .collect();
        assert_eq!(ids, vec!["i-3"]);
    }

    #[test]
    fn distinct_values_sorted_and_deduped() {
        let records = sample();
        let services = distinct_values(&records, |r| Some(r.service.as_str()));
        assert_eq!(services, vec!["EC2", "RDS", "S3"]);
        let departments = distinct_values(&records, |r| r.department.as_deref());
        assert_eq!(departments, vec!["Eng", "Fin"]);
    }
}
