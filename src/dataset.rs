//! CSV loading and validation.
//!
//! The input table is read once into a [`RowDataset`] and is read-only from
//! then on: pages borrow contiguous row ranges, nothing is reordered or
//! mutated. Row order in the file is the row order in the output grids.
//!
//! Two validation outcomes matter downstream:
//!
//! - zero data rows is **not** an error — callers warn and exit cleanly
//!   without producing any files;
//! - a non-empty table missing the configured structure column is fatal, and
//!   the error message lists every column that *is* available, since that is
//!   the main diagnostic a user sees for a typo'd `--smiles-col`.

use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input file {0} does not exist")]
    NotFound(PathBuf),
    #[error("failed to read {path} as CSV: {source}")]
    Parse { path: PathBuf, source: csv::Error },
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("column '{column}' not found in input; available columns: {}", available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },
}

/// An ordered, read-only table: a shared header plus one record per row.
#[derive(Debug, Clone)]
pub struct RowDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RowDataset {
    /// Build a dataset from a header and records. Test seam; production code
    /// goes through [`load`].
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Value of `column` in row `row`, or `None` if either is out of range.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Row indices for one page. Callers guarantee the range is in bounds.
    pub fn slice(&self, range: Range<usize>) -> &[Vec<String>] {
        &self.rows[range]
    }

    /// Fail with the available-columns diagnostic if `name` is absent.
    pub fn require_column(&self, name: &str) -> Result<(), ValidationError> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(ValidationError::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
        }
    }

    /// Display-column subset when none is configured: the `ccd` column alone
    /// if the table has one, otherwise no metadata columns at all.
    pub fn default_subset(&self) -> Vec<String> {
        if self.has_column("ccd") {
            vec!["ccd".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Read a CSV file into a [`RowDataset`].
pub fn load(path: &Path) -> Result<RowDataset, InputError> {
    if !path.exists() {
        return Err(InputError::NotFound(path.to_path_buf()));
    }
    let parse_err = |source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(parse_err)?;
    let columns = reader
        .headers()
        .map_err(parse_err)?
        .iter()
        .map(String::from)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_err)?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(RowDataset { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn sample() -> RowDataset {
        RowDataset::new(
            vec!["smiles".into(), "ccd".into(), "name".into()],
            vec![
                vec!["C".into(), "M1".into(), "methane".into()],
                vec!["CC".into(), "M2".into(), "ethane".into()],
                vec!["CCC".into(), "M3".into(), "propane".into()],
            ],
        )
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn load_reads_header_and_rows_in_order() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(&tmp, "mols.csv", "smiles,ccd\nC,M1\nCC,M2\nCCC,M3\n");

        let dataset = load(&path).unwrap();
        assert_eq!(dataset.columns(), &["smiles", "ccd"]);
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.value(0, "smiles"), Some("C"));
        assert_eq!(dataset.value(2, "ccd"), Some("M3"));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load(&tmp.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, InputError::NotFound(_)));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn load_header_only_file_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(&tmp, "empty.csv", "smiles,ccd\n");

        let dataset = load(&path).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns(), &["smiles", "ccd"]);
    }

    #[test]
    fn load_ragged_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = write_csv(&tmp, "ragged.csv", "smiles,ccd\nC,M1\nCC,M2,extra\n");

        let err = load(&path).unwrap_err();
        assert!(matches!(err, InputError::Parse { .. }));
    }

    // =========================================================================
    // Column validation
    // =========================================================================

    #[test]
    fn require_column_present() {
        assert!(sample().require_column("smiles").is_ok());
    }

    #[test]
    fn require_column_missing_lists_available_columns() {
        let err = sample().require_column("SMILES").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'SMILES'"));
        assert!(message.contains("available columns"));
        assert!(message.contains("smiles, ccd, name"));
    }

    // =========================================================================
    // Default subset derivation
    // =========================================================================

    #[test]
    fn default_subset_uses_ccd_when_present() {
        assert_eq!(sample().default_subset(), vec!["ccd".to_string()]);
    }

    #[test]
    fn default_subset_empty_without_ccd() {
        let dataset = RowDataset::new(vec!["smiles".into()], vec![vec!["C".into()]]);
        assert!(dataset.default_subset().is_empty());
    }

    // =========================================================================
    // Slicing
    // =========================================================================

    #[test]
    fn slice_preserves_order() {
        let dataset = sample();
        let rows = dataset.slice(1..3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "CC");
        assert_eq!(rows[1][0], "CCC");
    }
}
