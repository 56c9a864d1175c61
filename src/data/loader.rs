//! Billing Export Loader
//! Handles CSV loading and typed record extraction using Polars.

use crate::data::model::{non_empty, ResourceRecord, TagStatus};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Columns every billing export must carry.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "ResourceID",
    "Service",
    "Region",
    "AccountID",
    "Department",
    "Project",
    "Environment",
    "Owner",
    "CostCenter",
    "MonthlyCostUSD",
    "Tagged",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Export contains no rows")]
    Empty,
}

/// A loaded billing export: the raw frame plus its typed row view.
pub struct LoadedExport {
    pub df: DataFrame,
    pub records: Vec<ResourceRecord>,
}

impl LoadedExport {
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

/// Loads billing exports with Polars, tolerating the export tool's
/// line-quoting quirk.
pub struct ExportLoader;

impl ExportLoader {
    /// Load and validate a billing export CSV.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadedExport, LoaderError> {
        let raw = std::fs::read_to_string(path)?;
        let clean = Self::strip_line_quotes(&raw);

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(clean))
            .finish()?;

        if df.height() == 0 {
            return Err(LoaderError::Empty);
        }

        for col in REQUIRED_COLUMNS {
            if df.column(col).is_err() {
                return Err(LoaderError::MissingColumn(col.to_string()));
            }
        }

        let records = Self::extract_records(&df)?;
        Ok(LoadedExport { df, records })
    }

    /// The export tool wraps each whole line in one pair of double quotes.
    /// Strip that outer pair so the line parses as ordinary CSV.
    pub fn strip_line_quotes(raw: &str) -> String {
        raw.lines()
            .map(|line| line.trim().trim_matches('"'))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Materialize the frame into typed records.
    fn extract_records(df: &DataFrame) -> Result<Vec<ResourceRecord>, LoaderError> {
        let text_col = |name: &str| -> Result<Column, LoaderError> {
            Ok(df.column(name)?.cast(&DataType::String)?)
        };

        let resource_id = text_col("ResourceID")?;
        let service = text_col("Service")?;
        let region = text_col("Region")?;
        let account_id = text_col("AccountID")?;
        let department = text_col("Department")?;
        let project = text_col("Project")?;
        let environment = text_col("Environment")?;
        let owner = text_col("Owner")?;
        let cost_center = text_col("CostCenter")?;
        let tagged = text_col("Tagged")?;
        let cost = df.column("MonthlyCostUSD")?.cast(&DataType::Float64)?;
        let cost_ca = cost.f64()?;

        let str_at = |col: &Column, i: usize| -> Option<String> {
            col.str().ok().and_then(|ca| non_empty(ca.get(i)))
        };

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            records.push(ResourceRecord {
                resource_id: str_at(&resource_id, i).unwrap_or_default(),
                service: str_at(&service, i).unwrap_or_default(),
                region: str_at(&region, i).unwrap_or_default(),
                account_id: str_at(&account_id, i).unwrap_or_default(),
                department: str_at(&department, i),
                project: str_at(&project, i),
                environment: str_at(&environment, i),
                owner: str_at(&owner, i),
                cost_center: str_at(&cost_center, i),
                monthly_cost: cost_ca.get(i).unwrap_or(0.0),
                tagged: str_at(&tagged, i)
                    .map(|f| TagStatus::from_flag(&f))
                    .unwrap_or(TagStatus::Untagged),
            });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join("tagscope_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn strips_one_outer_quote_pair_per_line() {
        let raw = "\"a,b,c\"\n\"1,2,3\"\n";
        assert_eq!(ExportLoader::strip_line_quotes(raw), "a,b,c\n1,2,3");
    }

    #[test]
    fn leaves_unquoted_lines_alone() {
        let raw = "a,b,c\n1,2,3";
        assert_eq!(ExportLoader::strip_line_quotes(raw), "a,b,c\n1,2,3");
    }

    #[test]
    fn load_rejects_missing_columns() {
        let path = write_temp("bad.csv", "ResourceID,Service\ni-1,EC2\n");
        assert!(matches!(
            ExportLoader::load(&path),
            Err(LoaderError::MissingColumn(_))
        ));
    }

    #[test]
    fn load_extracts_typed_records() {
        let csv = "\
ResourceID,Service,Region,AccountID,Department,Project,Environment,Owner,CostCenter,MonthlyCostUSD,Tagged
i-1,EC2,us-east-1,111,Engineering,Atlas,Production,alice,CC-100,120.5,Yes
i-2,S3,us-west-2,222,,,,,,30.0,No
";
        let path = write_temp("ok.csv", csv);
        let export = ExportLoader::load(&path).unwrap();
        assert_eq!(export.row_count(), 2);
        assert_eq!(export.records.len(), 2);

        let first = &export.records[0];
        assert_eq!(first.resource_id, "i-1");
        assert_eq!(first.department.as_deref(), Some("Engineering"));
        assert_eq!(first.monthly_cost, 120.5);
        assert!(first.tagged.is_tagged());

        let second = &export.records[1];
        assert_eq!(second.department, None);
        assert_eq!(second.tag_completeness(), 0);
        assert!(!second.tagged.is_tagged());
    }

    #[test]
    fn load_handles_line_quoted_exports() {
        let csv = "\
\"ResourceID,Service,Region,AccountID,Department,Project,Environment,Owner,CostCenter,MonthlyCostUSD,Tagged\"
\"i-9,RDS,eu-west-1,333,Finance,Ledger,Staging,bob,CC-200,410.0,Yes\"
";
        let path = write_temp("quoted.csv", csv);
        let export = ExportLoader::load(&path).unwrap();
        assert_eq!(export.records[0].service, "RDS");
        assert_eq!(export.records[0].monthly_cost, 410.0);
    }
}
