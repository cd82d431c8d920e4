use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Table names used in error reports and logs.
pub mod table {
    pub const ENROLLMENT: &str = "net enrollment";
    pub const RATIO: &str = "pupil-teacher ratio";
    pub const EXPENDITURE: &str = "GDP expenditure";
    pub const LITERACY: &str = "literacy rate";
}

/// Everything that can go wrong with the source tables. All variants abort
/// the run; there is no partial rendering.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source file is unreadable or its content is malformed.
    #[error("cannot read {table} table from {path}: {message}")]
    Source {
        table: &'static str,
        path: PathBuf,
        message: String,
    },

    /// A required column is absent.
    #[error("{table} table is missing required column '{column}'")]
    Schema {
        table: &'static str,
        column: &'static str,
    },

    /// An exact-match year lookup found no row.
    #[error("{table} table has no row for year {year}")]
    Lookup { table: &'static str, year: i32 },
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One row of the net-enrollment table: percentage enrolled per level.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EnrollmentRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Primary")]
    pub primary: f64,
    #[serde(rename = "Secondary")]
    pub secondary: f64,
    #[serde(rename = "Tertiary")]
    pub tertiary: f64,
}

/// One row of the pupil-teacher ratio table.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RatioRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Primary")]
    pub primary: f64,
    #[serde(rename = "Secondary")]
    pub secondary: f64,
    #[serde(rename = "Tertiary")]
    pub tertiary: f64,
}

/// One row of the education-expenditure table (% of GDP).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ExpenditureRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "GDP Exp")]
    pub gdp_exp: f64,
}

/// One row of the literacy-rate table, split by gender.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LiteracyRow {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Male")]
    pub male: f64,
    #[serde(rename = "Female")]
    pub female: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the four loaded tables
// ---------------------------------------------------------------------------

/// The complete loaded dataset. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub enrollment: Vec<EnrollmentRow>,
    pub ratios: Vec<RatioRow>,
    pub expenditure: Vec<ExpenditureRow>,
    pub literacy: Vec<LiteracyRow>,
}

impl Dataset {
    /// Education spending as % of GDP for the given year. Exact-match only;
    /// a missing year is a hard failure, not a nearest-row fallback.
    pub fn education_share(&self, year: i32) -> Result<f64, DataError> {
        self.expenditure
            .iter()
            .find(|row| row.year == year)
            .map(|row| row.gdp_exp)
            .ok_or(DataError::Lookup {
                table: table::EXPENDITURE,
                year,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            enrollment: vec![],
            ratios: vec![],
            expenditure: vec![
                ExpenditureRow { year: 1970, gdp_exp: 3.0 },
                ExpenditureRow { year: 2020, gdp_exp: 12.25 },
            ],
            literacy: vec![],
        }
    }

    #[test]
    fn education_share_exact_match() {
        let ds = dataset();
        assert_eq!(ds.education_share(1970).unwrap(), 3.0);
        assert_eq!(ds.education_share(2020).unwrap(), 12.25);
    }

    #[test]
    fn education_share_missing_year_is_lookup_error() {
        let err = dataset().education_share(1985).unwrap_err();
        assert!(matches!(err, DataError::Lookup { year: 1985, .. }));
    }
}
