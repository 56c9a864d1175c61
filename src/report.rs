//! Reporting & Export
//! CSV exports through Polars and the JSON governance report.

use crate::analysis::{GovernanceDelta, GovernanceSnapshot, UntaggedRow};
use crate::data::ResourceRecord;
use polars::prelude::*;
use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to write file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to serialize report: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Build a full-schema frame from typed records.
pub fn records_to_frame(records: &[ResourceRecord]) -> Result<DataFrame, ReportError> {
    let df = DataFrame::new(vec![
        Column::new(
            "ResourceID".into(),
            records.iter().map(|r| r.resource_id.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Service".into(),
            records.iter().map(|r| r.service.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Region".into(),
            records.iter().map(|r| r.region.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "AccountID".into(),
            records.iter().map(|r| r.account_id.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Department".into(),
            records.iter().map(|r| r.department.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Project".into(),
            records.iter().map(|r| r.project.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Environment".into(),
            records.iter().map(|r| r.environment.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Owner".into(),
            records.iter().map(|r| r.owner.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "CostCenter".into(),
            records.iter().map(|r| r.cost_center.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "MonthlyCostUSD".into(),
            records.iter().map(|r| r.monthly_cost).collect::<Vec<_>>(),
        ),
        Column::new(
            "Tagged".into(),
            records
                .iter()
                .map(|r| r.tagged.as_flag().to_string())
                .collect::<Vec<_>>(),
        ),
    ])?;
    Ok(df)
}

/// Write the full record set as CSV (the remediated-dataset export).
pub fn export_records_csv(
    records: &[ResourceRecord],
    path: impl AsRef<Path>,
) -> Result<(), ReportError> {
    let mut df = records_to_frame(records)?;
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

/// Write the untagged worklist as CSV.
pub fn export_untagged_csv(
    rows: &[UntaggedRow],
    path: impl AsRef<Path>,
) -> Result<(), ReportError> {
    let mut df = DataFrame::new(vec![
        Column::new(
            "ResourceID".into(),
            rows.iter().map(|r| r.resource_id.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Service".into(),
            rows.iter().map(|r| r.service.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "Department".into(),
            rows.iter().map(|r| r.department.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "MonthlyCostUSD".into(),
            rows.iter().map(|r| r.monthly_cost).collect::<Vec<_>>(),
        ),
    ])?;
    let mut file = std::fs::File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

/// Session governance report: before/after counters and their movement.
#[derive(Debug, Clone, Serialize)]
pub struct GovernanceReport {
    pub generated_at_unix: u64,
    pub before: GovernanceSnapshot,
    pub after: GovernanceSnapshot,
    pub delta: GovernanceDelta,
}

impl GovernanceReport {
    pub fn new(before: GovernanceSnapshot, after: GovernanceSnapshot) -> Self {
        Self {
            generated_at_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            before,
            after,
            delta: GovernanceDelta::between(&before, &after),
        }
    }

    pub fn export_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ExportLoader, TagStatus};

    fn sample() -> Vec<ResourceRecord> {
        vec![
            ResourceRecord {
                resource_id: "i-1".to_string(),
                service: "EC2".to_string(),
                region: "us-east-1".to_string(),
                account_id: "111".to_string(),
                department: Some("Eng".to_string()),
                project: Some("Atlas".to_string()),
                environment: Some("Prod".to_string()),
                owner: Some("alice".to_string()),
                cost_center: Some("CC-1".to_string()),
                monthly_cost: 99.5,
                tagged: TagStatus::Tagged,
            },
            ResourceRecord {
                resource_id: "i-2".to_string(),
                service: "S3".to_string(),
                region: "us-east-1".to_string(),
                account_id: "111".to_string(),
                department: None,
                project: None,
                environment: None,
                owner: None,
                cost_center: None,
                monthly_cost: 12.0,
                tagged: TagStatus::Untagged,
            },
        ]
    }

    #[test]
    fn records_frame_carries_full_schema() {
        let df = records_to_frame(&sample()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 11);
        assert!(df.column("MonthlyCostUSD").is_ok());
    }

    #[test]
    fn csv_export_round_trips_through_loader() {
        let dir = std::env::temp_dir().join("tagscope_report_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("remediated.csv");

        let records = sample();
        export_records_csv(&records, &path).unwrap();

        let reloaded = ExportLoader::load(&path).unwrap();
        assert_eq!(reloaded.records.len(), 2);
        assert_eq!(reloaded.records[0].resource_id, "i-1");
        assert!(reloaded.records[0].tagged.is_tagged());
        assert_eq!(reloaded.records[1].department, None);
    }

    #[test]
    fn report_serializes_with_delta() {
        let before = GovernanceSnapshot {
            tagged: 1,
            untagged: 3,
            untagged_cost: 90.0,
        };
        let after = GovernanceSnapshot {
            tagged: 3,
            untagged: 1,
            untagged_cost: 30.0,
        };
        let report = GovernanceReport::new(before, after);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"recovered_cost\":60.0"));
        assert!(json.contains("\"untagged_reduction_pct\""));
    }
}
