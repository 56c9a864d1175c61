//! Dataset Exploration
//! Shape, missing-value counts and tagging-status breakdown.

use crate::data::{ResourceRecord, REQUIRED_COLUMNS};
use std::collections::HashSet;

/// Overview of the loaded dataset.
#[derive(Debug, Clone)]
pub struct ExplorationSummary {
    pub rows: usize,
    pub columns: usize,
    /// Missing-cell count per column, sorted descending.
    pub missing_by_column: Vec<(String, usize)>,
    pub tagged: usize,
    pub untagged: usize,
    pub untagged_pct: f64,
    pub account_count: usize,
}

pub fn explore(records: &[ResourceRecord]) -> ExplorationSummary {
    let rows = records.len();
    let tagged = records.iter().filter(|r| r.tagged.is_tagged()).count();
    let untagged = rows - tagged;

    let mut missing_by_column: Vec<(String, usize)> = REQUIRED_COLUMNS
        .iter()
        .map(|col| {
            let missing = records
                .iter()
                .filter(|r| match *col {
                    "Department" => r.department.is_none(),
                    "Project" => r.project.is_none(),
                    "Environment" => r.environment.is_none(),
                    "Owner" => r.owner.is_none(),
                    "CostCenter" => r.cost_center.is_none(),
                    _ => false,
                })
                .count();
            (col.to_string(), missing)
        })
        .collect();
    missing_by_column.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let account_count = records
        .iter()
        .map(|r| r.account_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    ExplorationSummary {
        rows,
        columns: REQUIRED_COLUMNS.len(),
        missing_by_column,
        tagged,
        untagged,
        untagged_pct: if rows > 0 {
            untagged as f64 / rows as f64 * 100.0
        } else {
            0.0
        },
        account_count,
    }
}
