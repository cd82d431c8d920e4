use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use super::model::{
    table, DataError, Dataset, EnrollmentRow, ExpenditureRow, LiteracyRow, RatioRow,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// File paths of the four source tables.
#[derive(Debug, Clone)]
pub struct TableSources {
    pub enrollment: PathBuf,
    pub ratios: PathBuf,
    pub expenditure: PathBuf,
    pub literacy: PathBuf,
}

/// Load all four tables. The first failing table aborts the whole load.
pub fn load_dataset(sources: &TableSources) -> Result<Dataset, DataError> {
    let dataset = Dataset {
        enrollment: load_table::<EnrollmentRow>(&sources.enrollment, table::ENROLLMENT)?,
        ratios: load_table::<RatioRow>(&sources.ratios, table::RATIO)?,
        expenditure: load_table::<ExpenditureRow>(&sources.expenditure, table::EXPENDITURE)?,
        literacy: load_table::<LiteracyRow>(&sources.literacy, table::LITERACY)?,
    };

    log::info!(
        "loaded {} enrollment, {} ratio, {} expenditure, {} literacy rows",
        dataset.enrollment.len(),
        dataset.ratios.len(),
        dataset.expenditure.len(),
        dataset.literacy.len()
    );

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row parsing contract shared by the CSV and JSON readers
// ---------------------------------------------------------------------------

/// Column layout of one table row. Every reader checks `COLUMNS` before it
/// parses a single value.
pub(crate) trait TableRow: DeserializeOwned {
    /// Required column names, "Year" first.
    const COLUMNS: &'static [&'static str];

    /// Build a row from the year and the remaining columns, in
    /// `COLUMNS[1..]` order. `values.len() == COLUMNS.len() - 1`.
    fn from_values(year: i32, values: &[f64]) -> Self;
}

impl TableRow for EnrollmentRow {
    const COLUMNS: &'static [&'static str] = &["Year", "Primary", "Secondary", "Tertiary"];

    fn from_values(year: i32, values: &[f64]) -> Self {
        EnrollmentRow {
            year,
            primary: values[0],
            secondary: values[1],
            tertiary: values[2],
        }
    }
}

impl TableRow for RatioRow {
    const COLUMNS: &'static [&'static str] = &["Year", "Primary", "Secondary", "Tertiary"];

    fn from_values(year: i32, values: &[f64]) -> Self {
        RatioRow {
            year,
            primary: values[0],
            secondary: values[1],
            tertiary: values[2],
        }
    }
}

impl TableRow for ExpenditureRow {
    const COLUMNS: &'static [&'static str] = &["Year", "GDP Exp"];

    fn from_values(year: i32, values: &[f64]) -> Self {
        ExpenditureRow {
            year,
            gdp_exp: values[0],
        }
    }
}

impl TableRow for LiteracyRow {
    const COLUMNS: &'static [&'static str] = &["Year", "Male", "Female"];

    fn from_values(year: i32, values: &[f64]) -> Self {
        LiteracyRow {
            year,
            male: values[0],
            female: values[1],
        }
    }
}

/// Load one table. Dispatch by extension: `.json` for record-oriented JSON,
/// anything else is read as CSV (the default on-disk format).
fn load_table<R: TableRow>(path: &Path, name: &'static str) -> Result<Vec<R>, DataError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let rows = match ext.as_str() {
        "json" => load_json(path, name)?,
        _ => load_csv(path, name)?,
    };

    if rows.is_empty() {
        return Err(source_error(name, path, "table has no rows"));
    }
    Ok(rows)
}

fn source_error(table: &'static str, path: &Path, message: impl ToString) -> DataError {
    DataError::Source {
        table,
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: a header row naming the columns, one record per sampled year.
/// Column order is free; names must match exactly.
fn load_csv<R: TableRow>(path: &Path, name: &'static str) -> Result<Vec<R>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| source_error(name, path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| source_error(name, path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Column positions, "Year" first.
    let mut indices = Vec::with_capacity(R::COLUMNS.len());
    for col in R::COLUMNS {
        let idx = headers
            .iter()
            .position(|h| h == col)
            .ok_or(DataError::Schema {
                table: name,
                column: col,
            })?;
        indices.push(idx);
    }

    let mut rows = Vec::new();
    for (row_no, record) in reader.records().enumerate() {
        let record = record.map_err(|e| source_error(name, path, format!("row {row_no}: {e}")))?;
        let cell = |slot: usize| record.get(indices[slot]).unwrap_or("").trim();

        let year = cell(0).parse::<i32>().map_err(|_| {
            source_error(
                name,
                path,
                format!("row {row_no}: '{}' is not a year", cell(0)),
            )
        })?;

        let mut values = Vec::with_capacity(R::COLUMNS.len() - 1);
        for (slot, col) in R::COLUMNS.iter().enumerate().skip(1) {
            let raw = cell(slot);
            let value = raw.parse::<f64>().map_err(|_| {
                source_error(
                    name,
                    path,
                    format!("row {row_no}, column '{col}': '{raw}' is not a number"),
                )
            })?;
            values.push(value);
        }

        rows.push(R::from_values(year, &values));
    }

    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Year": 1970, "GDP Exp": 3.0 },
///   { "Year": 2020, "GDP Exp": 12.25 }
/// ]
/// ```
fn load_json<R: TableRow>(path: &Path, name: &'static str) -> Result<Vec<R>, DataError> {
    let text = std::fs::read_to_string(path).map_err(|e| source_error(name, path, e))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| source_error(name, path, e))?;

    let records = root
        .as_array()
        .ok_or_else(|| source_error(name, path, "expected a top-level JSON array"))?;

    let mut rows = Vec::with_capacity(records.len());
    for (row_no, record) in records.iter().enumerate() {
        let obj = record
            .as_object()
            .ok_or_else(|| source_error(name, path, format!("row {row_no} is not an object")))?;

        // Key presence is the schema check; parse errors below are content
        // errors, not schema errors.
        for col in R::COLUMNS {
            if !obj.contains_key(*col) {
                return Err(DataError::Schema {
                    table: name,
                    column: col,
                });
            }
        }

        let row: R = serde_json::from_value(record.clone())
            .map_err(|e| source_error(name, path, format!("row {row_no}: {e}")))?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, file: &str, contents: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(&path, contents).unwrap();
        path
    }

    fn sample_sources(dir: &Path) -> TableSources {
        TableSources {
            enrollment: write(
                dir,
                "enroll.csv",
                "Year,Primary,Secondary,Tertiary\n1970,98,60,8.3\n1995,96.5,75,20\n2020,92.95,92.8,38.56\n",
            ),
            ratios: write(
                dir,
                "ratio.csv",
                "Year,Primary,Secondary,Tertiary\n1970,27,15.2,10.1\n2020,20.29,20.23,16.93\n",
            ),
            expenditure: write(dir, "gdp.csv", "Year,GDP Exp\n1970,3.0\n2020,12.25\n"),
            literacy: write(
                dir,
                "literacy.csv",
                "Year,Male,Female\n1970,78,64\n2020,94.29,94.23\n",
            ),
        }
    }

    #[test]
    fn loading_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let sources = sample_sources(dir.path());

        let first = load_dataset(&sources).unwrap();
        let second = load_dataset(&sources).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.enrollment.len(), 3);
        assert_eq!(first.expenditure.len(), 2);
    }

    #[test]
    fn csv_columns_may_be_reordered() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "gdp.csv", "GDP Exp,Year\n3.0,1970\n");

        let rows: Vec<ExpenditureRow> = load_table(&path, table::EXPENDITURE).unwrap();
        assert_eq!(rows[0].year, 1970);
        assert_eq!(rows[0].gdp_exp, 3.0);
    }

    #[test]
    fn missing_year_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let mut sources = sample_sources(dir.path());
        sources.ratios = write(
            dir.path(),
            "ratio_bad.csv",
            "Primary,Secondary,Tertiary\n27,15.2,10.1\n",
        );

        let err = load_dataset(&sources).unwrap_err();
        assert!(matches!(
            err,
            DataError::Schema { column: "Year", table: table::RATIO }
        ));
    }

    #[test]
    fn missing_value_column_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "literacy.csv", "Year,Male\n1970,78\n");

        let err = load_table::<LiteracyRow>(&path, table::LITERACY).unwrap_err();
        assert!(matches!(err, DataError::Schema { column: "Female", .. }));
    }

    #[test]
    fn unreadable_file_is_source_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.csv");

        let err = load_table::<ExpenditureRow>(&path, table::EXPENDITURE).unwrap_err();
        assert!(matches!(err, DataError::Source { .. }));
    }

    #[test]
    fn empty_table_is_source_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "gdp.csv", "Year,GDP Exp\n");

        let err = load_table::<ExpenditureRow>(&path, table::EXPENDITURE).unwrap_err();
        assert!(matches!(err, DataError::Source { .. }));
    }

    #[test]
    fn non_numeric_cell_is_source_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "gdp.csv", "Year,GDP Exp\n1970,lots\n");

        let err = load_table::<ExpenditureRow>(&path, table::EXPENDITURE).unwrap_err();
        assert!(matches!(err, DataError::Source { .. }));
    }

    #[test]
    fn json_records_match_csv() {
        let dir = TempDir::new().unwrap();
        let csv_path = write(dir.path(), "gdp.csv", "Year,GDP Exp\n1970,3.0\n2020,12.25\n");
        let json_path = write(
            dir.path(),
            "gdp.json",
            r#"[{"Year":1970,"GDP Exp":3.0},{"Year":2020,"GDP Exp":12.25}]"#,
        );

        let from_csv: Vec<ExpenditureRow> = load_table(&csv_path, table::EXPENDITURE).unwrap();
        let from_json: Vec<ExpenditureRow> = load_table(&json_path, table::EXPENDITURE).unwrap();
        assert_eq!(from_csv, from_json);
    }

    #[test]
    fn json_missing_key_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "gdp.json", r#"[{"Year":1970}]"#);

        let err = load_table::<ExpenditureRow>(&path, table::EXPENDITURE).unwrap_err();
        assert!(matches!(err, DataError::Schema { column: "GDP Exp", .. }));
    }
}
