//! Analysis module - aggregations over the typed resource table

mod compliance;
mod costs;
mod exploration;
mod filters;

pub use compliance::{analyze_compliance, ComplianceOverview, CompletenessRow, UntaggedRow};
pub use costs::{
    cost_by_project, cost_summary, dashboard_breakdowns, untagged_cost_by_department, CostSummary,
    DashboardBreakdowns, TagSplit, UNASSIGNED,
};
pub use exploration::{explore, ExplorationSummary};
pub use filters::{distinct_values, ResourceFilter};

use crate::data::ResourceRecord;
use serde::Serialize;

/// Governance counters over one table copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GovernanceSnapshot {
    pub tagged: usize,
    pub untagged: usize,
    pub untagged_cost: f64,
}

impl GovernanceSnapshot {
    pub fn of(records: &[ResourceRecord]) -> Self {
        let tagged = records.iter().filter(|r| r.tagged.is_tagged()).count();
        let untagged_cost = records
            .iter()
            .filter(|r| !r.tagged.is_tagged())
            .map(|r| r.monthly_cost)
            .sum();
        Self {
            tagged,
            untagged: records.len() - tagged,
            untagged_cost,
        }
    }
}

/// Before/after movement between two snapshots of the same table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GovernanceDelta {
    pub tagged: i64,
    pub untagged: i64,
    pub untagged_cost: f64,
    /// Percentage reduction in untagged resources (0 when nothing was untagged).
    pub untagged_reduction_pct: f64,
    /// Previously hidden cost now attributed to owners.
    pub recovered_cost: f64,
}

impl GovernanceDelta {
    pub fn between(before: &GovernanceSnapshot, after: &GovernanceSnapshot) -> Self {
        let untagged_reduction_pct = if before.untagged > 0 {
            (before.untagged - after.untagged.min(before.untagged)) as f64
                / before.untagged as f64
                * 100.0
        } else {
            0.0
        };
        Self {
            tagged: after.tagged as i64 - before.tagged as i64,
            untagged: after.untagged as i64 - before.untagged as i64,
            untagged_cost: after.untagged_cost - before.untagged_cost,
            untagged_reduction_pct,
            recovered_cost: before.untagged_cost - after.untagged_cost,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::data::{ResourceRecord, TagStatus};

    /// Builder-ish helper shared by the analysis tests.
    #[allow(clippy::too_many_arguments)]
    pub fn resource(
        id: &str,
        service: &str,
        account: &str,
        department: Option<&str>,
        project: Option<&str>,
        environment: Option<&str>,
        cost: f64,
        tagged: bool,
    ) -> ResourceRecord {
        ResourceRecord {
            resource_id: id.to_string(),
            service: service.to_string(),
            region: "us-east-1".to_string(),
            account_id: account.to_string(),
            department: department.map(str::to_string),
            project: project.map(str::to_string),
            environment: environment.map(str::to_string),
            owner: None,
            cost_center: None,
            monthly_cost: cost,
            tagged: if tagged {
                TagStatus::Tagged
            } else {
                TagStatus::Untagged
            },
        }
    }
}
