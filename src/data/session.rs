//! Session State
//! Holds the original load and the mutable remediated copy for one session.

use crate::data::model::{ResourceRecord, TagStatus};

/// A user-supplied tag override for one untagged resource.
#[derive(Debug, Clone, Default)]
pub struct TagEdit {
    pub resource_id: String,
    pub department: Option<String>,
    pub project: Option<String>,
    pub environment: Option<String>,
    pub owner: Option<String>,
    pub cost_center: Option<String>,
}

/// The two table copies held for the lifetime of one session.
///
/// `original` never changes after load; `remediated` starts as a copy and
/// absorbs tag edits. Both hold the same resource ids in the same order.
pub struct SessionData {
    original: Vec<ResourceRecord>,
    remediated: Vec<ResourceRecord>,
}

impl SessionData {
    pub fn new(records: Vec<ResourceRecord>) -> Self {
        Self {
            remediated: records.clone(),
            original: records,
        }
    }

    pub fn original(&self) -> &[ResourceRecord] {
        &self.original
    }

    pub fn remediated(&self) -> &[ResourceRecord] {
        &self.remediated
    }

    /// Untagged rows of the remediated copy, for the edit grid.
    pub fn untagged_remediated(&self) -> Vec<&ResourceRecord> {
        self.remediated
            .iter()
            .filter(|r| !r.tagged.is_tagged())
            .collect()
    }

    /// Merge tag edits into the remediated copy.
    ///
    /// Only rows that are currently untagged accept edits, and only the five
    /// tag fields move. A row flips to tagged when both department and
    /// project are present afterwards. Returns the number of rows flipped.
    pub fn apply_edits(&mut self, edits: &[TagEdit]) -> usize {
        let mut flipped = 0;

        for edit in edits {
            let Some(row) = self
                .remediated
                .iter_mut()
                .find(|r| r.resource_id == edit.resource_id && !r.tagged.is_tagged())
            else {
                continue;
            };

            row.department = edit.department.clone();
            row.project = edit.project.clone();
            row.environment = edit.environment.clone();
            row.owner = edit.owner.clone();
            row.cost_center = edit.cost_center.clone();

            if row.department.is_some() && row.project.is_some() {
                row.tagged = TagStatus::Tagged;
                flipped += 1;
            }
        }

        flipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged(id: &str, cost: f64) -> ResourceRecord {
        ResourceRecord {
            resource_id: id.to_string(),
            service: "EC2".to_string(),
            region: "us-east-1".to_string(),
            account_id: "111".to_string(),
            department: None,
            project: None,
            environment: None,
            owner: None,
            cost_center: None,
            monthly_cost: cost,
            tagged: TagStatus::Untagged,
        }
    }

    fn edit(id: &str, dept: Option<&str>, proj: Option<&str>) -> TagEdit {
        TagEdit {
            resource_id: id.to_string(),
            department: dept.map(str::to_string),
            project: proj.map(str::to_string),
            ..TagEdit::default()
        }
    }

    #[test]
    fn apply_flips_rows_with_department_and_project() {
        let mut session = SessionData::new(vec![untagged("i-1", 10.0), untagged("i-2", 20.0)]);

        let flipped = session.apply_edits(&[
            edit("i-1", Some("Eng"), Some("Atlas")),
            edit("i-2", Some("Eng"), None),
        ]);

        assert_eq!(flipped, 1);
        assert!(session.remediated()[0].tagged.is_tagged());
        assert!(!session.remediated()[1].tagged.is_tagged());
        // Partial edit still lands even without the flip.
        assert_eq!(session.remediated()[1].department.as_deref(), Some("Eng"));
    }

    #[test]
    fn apply_ignores_tagged_and_unknown_rows() {
        let mut tagged_row = untagged("i-3", 5.0);
        tagged_row.tagged = TagStatus::Tagged;
        tagged_row.department = Some("Sales".to_string());

        let mut session = SessionData::new(vec![tagged_row]);
        let flipped = session.apply_edits(&[
            edit("i-3", Some("Eng"), Some("Atlas")),
            edit("i-404", Some("Eng"), Some("Atlas")),
        ]);

        assert_eq!(flipped, 0);
        assert_eq!(session.remediated()[0].department.as_deref(), Some("Sales"));
    }

    #[test]
    fn original_is_untouched_and_ids_stay_aligned() {
        let mut session = SessionData::new(vec![untagged("i-1", 10.0), untagged("i-2", 20.0)]);
        session.apply_edits(&[edit("i-1", Some("Eng"), Some("Atlas"))]);

        assert!(!session.original()[0].tagged.is_tagged());
        let orig_ids: Vec<_> = session.original().iter().map(|r| &r.resource_id).collect();
        let rem_ids: Vec<_> = session
            .remediated()
            .iter()
            .map(|r| &r.resource_id)
            .collect();
        assert_eq!(orig_ids, rem_ids);
    }

    #[test]
    fn untagged_view_tracks_remediation() {
        let mut session = SessionData::new(vec![untagged("i-1", 10.0), untagged("i-2", 20.0)]);
        assert_eq!(session.untagged_remediated().len(), 2);

        session.apply_edits(&[edit("i-1", Some("Eng"), Some("Atlas"))]);
        let remaining = session.untagged_remediated();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].resource_id, "i-2");
    }
}
