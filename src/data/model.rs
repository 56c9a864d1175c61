//! Resource Record Model
//! Typed view of one row of the billing export.

use serde::Serialize;

/// The five descriptive tag fields tracked for completeness.
pub const TAG_FIELDS: [&str; 5] = ["Department", "Project", "Environment", "Owner", "CostCenter"];

/// Tagging status flag for a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TagStatus {
    Tagged,
    Untagged,
}

impl TagStatus {
    /// Parse the export's "Yes"/"No" flag. Anything unrecognized counts as untagged.
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("yes") {
            TagStatus::Tagged
        } else {
            TagStatus::Untagged
        }
    }

    pub fn as_flag(&self) -> &'static str {
        match self {
            TagStatus::Tagged => "Yes",
            TagStatus::Untagged => "No",
        }
    }

    pub fn is_tagged(&self) -> bool {
        matches!(self, TagStatus::Tagged)
    }
}

/// One cloud resource from the billing export.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub resource_id: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub department: Option<String>,
    pub project: Option<String>,
    pub environment: Option<String>,
    pub owner: Option<String>,
    pub cost_center: Option<String>,
    pub monthly_cost: f64,
    pub tagged: TagStatus,
}

impl ResourceRecord {
    /// The five tag fields in `TAG_FIELDS` order.
    pub fn tag_fields(&self) -> [&Option<String>; 5] {
        [
            &self.department,
            &self.project,
            &self.environment,
            &self.owner,
            &self.cost_center,
        ]
    }

    /// Count of non-empty tag fields (0..=5).
    pub fn tag_completeness(&self) -> usize {
        self.tag_fields()
            .iter()
            .filter(|f| f.as_deref().is_some_and(|v| !v.trim().is_empty()))
            .count()
    }

    /// Completeness expressed as a percentage of the five tag fields.
    pub fn tag_completeness_pct(&self) -> f64 {
        self.tag_completeness() as f64 / TAG_FIELDS.len() as f64 * 100.0
    }
}

/// Normalize a raw cell: empty/whitespace-only becomes `None`.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn record(id: &str, tagged: TagStatus) -> ResourceRecord {
        ResourceRecord {
            resource_id: id.to_string(),
            service: "EC2".to_string(),
            region: "us-east-1".to_string(),
            account_id: "111111111111".to_string(),
            department: Some("Engineering".to_string()),
            project: Some("Atlas".to_string()),
            environment: Some("Production".to_string()),
            owner: Some("alice".to_string()),
            cost_center: Some("CC-100".to_string()),
            monthly_cost: 120.0,
            tagged,
        }
    }

    #[test]
    fn tag_status_parses_flags() {
        assert_eq!(TagStatus::from_flag("Yes"), TagStatus::Tagged);
        assert_eq!(TagStatus::from_flag("yes "), TagStatus::Tagged);
        assert_eq!(TagStatus::from_flag("No"), TagStatus::Untagged);
        assert_eq!(TagStatus::from_flag(""), TagStatus::Untagged);
    }

    #[test]
    fn completeness_counts_non_empty_fields() {
        let mut r = record("i-1", TagStatus::Tagged);
        assert_eq!(r.tag_completeness(), 5);
        assert_eq!(r.tag_completeness_pct(), 100.0);

        r.owner = None;
        r.cost_center = Some("  ".to_string());
        assert_eq!(r.tag_completeness(), 3);
        assert_eq!(r.tag_completeness_pct(), 60.0);
    }

    #[test]
    fn non_empty_normalizes_blank_cells() {
        assert_eq!(non_empty(Some("Finance")), Some("Finance".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
