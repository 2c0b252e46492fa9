//! Survey Data Loader Module
//! Handles CSV loading, column normalization and deduplication using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

/// Source-language column names of the input CSV.
pub const SRC_REGION: &str = "Область";
pub const SRC_DISTRICT: &str = "Місто/Район";
pub const SRC_VALUE: &str = "Значення";

/// Normalized column names used throughout the crate.
pub const REGION: &str = "region";
pub const DISTRICT: &str = "district";
pub const VALUE: &str = "value";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Input file not found: {0}")]
    FileNotFound(String),
}

/// The survey measurement table, loaded once at startup and immutable
/// thereafter.
///
/// One row per unique (region, district) pair; `value` is the mean of all
/// matching input rows, with non-numeric cells coerced to null and excluded
/// from the mean.
#[derive(Debug)]
pub struct SurveyData {
    df: DataFrame,
}

impl SurveyData {
    /// Load and normalize the survey CSV.
    pub fn load_csv(file_path: &str) -> Result<Self, LoaderError> {
        if !Path::new(file_path).exists() {
            return Err(LoaderError::FileNotFound(file_path.to_string()));
        }

        // Use lazy evaluation for memory efficiency, then collect
        let lf = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?;

        let df = Self::normalize(lf)?;
        log::debug!("loaded {} unique (region, district) rows", df.height());
        Ok(Self { df })
    }

    /// Normalize an in-memory frame with source-language columns.
    pub fn from_raw(raw: DataFrame) -> Result<Self, LoaderError> {
        let df = Self::normalize(raw.lazy())?;
        Ok(Self { df })
    }

    /// Rename source columns, strip label whitespace, coerce values to
    /// float (invalid cells become null) and collapse duplicate
    /// (region, district) pairs by averaging.
    fn normalize(lf: LazyFrame) -> Result<DataFrame, PolarsError> {
        lf.select([
            col(SRC_REGION)
                .cast(DataType::String)
                .str()
                .strip_chars(lit(NULL))
                .alias(REGION),
            col(SRC_DISTRICT)
                .cast(DataType::String)
                .str()
                .strip_chars(lit(NULL))
                .alias(DISTRICT),
            // Non-strict cast: non-numeric entries become null and drop
            // out of the mean below.
            col(SRC_VALUE).cast(DataType::Float64).alias(VALUE),
        ])
        .group_by_stable([col(REGION), col(DISTRICT)])
        .agg([col(VALUE).mean()])
        .collect()
    }

    /// Get a reference to the deduplicated table.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Get the sorted list of distinct region names.
    pub fn regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self
            .df
            .column(REGION)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                unique
                    .as_materialized_series()
                    .iter()
                    .filter_map(|v| {
                        if v.is_null() {
                            None
                        } else {
                            Some(v.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();
        regions.sort();
        regions
    }

    /// Number of unique (region, district) rows.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_at(data: &SurveyData, idx: usize) -> Option<f64> {
        data.frame().column(VALUE).unwrap().f64().unwrap().get(idx)
    }

    #[test]
    fn duplicate_pairs_average() {
        let raw = df!(
            SRC_REGION => ["A", "A", "B"],
            SRC_DISTRICT => ["X", "X", "Z"],
            SRC_VALUE => [10.0, 20.0, 30.0],
        )
        .unwrap();

        let data = SurveyData::from_raw(raw).unwrap();
        assert_eq!(data.row_count(), 2);
        assert!((value_at(&data, 0).unwrap() - 15.0).abs() < 1e-9);
        assert!((value_at(&data, 1).unwrap() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn non_numeric_values_become_missing() {
        let raw = df!(
            SRC_REGION => ["A", "A", "B"],
            SRC_DISTRICT => ["X", "X", "Z"],
            SRC_VALUE => ["10", "not a number", "bad"],
        )
        .unwrap();

        let data = SurveyData::from_raw(raw).unwrap();
        assert_eq!(data.row_count(), 2);
        // "not a number" is excluded from the mean of (A, X)
        assert!((value_at(&data, 0).unwrap() - 10.0).abs() < 1e-9);
        // (B, Z) has no numeric value at all
        assert!(value_at(&data, 1).is_none());
    }

    #[test]
    fn labels_are_whitespace_stripped() {
        let raw = df!(
            SRC_REGION => ["  A ", "A"],
            SRC_DISTRICT => ["X", " X  "],
            SRC_VALUE => [1.0, 3.0],
        )
        .unwrap();

        let data = SurveyData::from_raw(raw).unwrap();
        // Both rows collapse to the same (A, X) pair after stripping
        assert_eq!(data.row_count(), 1);
        assert!((value_at(&data, 0).unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn regions_sorted_unique() {
        let raw = df!(
            SRC_REGION => ["B", "A", "B"],
            SRC_DISTRICT => ["X", "Y", "Z"],
            SRC_VALUE => [1.0, 2.0, 3.0],
        )
        .unwrap();

        let data = SurveyData::from_raw(raw).unwrap();
        assert_eq!(data.regions(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn load_csv_missing_file() {
        let err = SurveyData::load_csv("no/such/file.csv").unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn load_csv_round_trip() {
        let path = std::env::temp_dir().join("regionviz_loader_test.csv");
        std::fs::write(
            &path,
            "Область,Місто/Район,Значення\nA,X,10\nA,X,20\nB,Z,30\n",
        )
        .unwrap();

        let data = SurveyData::load_csv(path.to_str().unwrap()).unwrap();
        assert_eq!(data.row_count(), 2);
        assert!((value_at(&data, 0).unwrap() - 15.0).abs() < 1e-9);

        let _ = std::fs::remove_file(&path);
    }
}
