//! Aggregation Module
//! Selection and group-by-mean pipelines feeding the chart renderer.

use polars::prelude::*;
use thiserror::Error;

use crate::config::Macroregion;
use crate::data::{SurveyData, DISTRICT, REGION, VALUE};

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Aggregation failed: {0}")]
    Polars(#[from] PolarsError),
}

/// One bar of a chart: a label and its (mean) value.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// The three selection/aggregation variants.
///
/// Every operation returns entries sorted ascending by value; ties keep
/// their first-encounter order (the sort maintains order). Entries without
/// a numeric value are dropped.
pub struct Aggregator;

impl Aggregator {
    /// District values within one region.
    pub fn districts_in_region(
        data: &SurveyData,
        region: &str,
    ) -> Result<Vec<RankedEntry>, AggregateError> {
        let df = data
            .frame()
            .clone()
            .lazy()
            .filter(col(REGION).eq(lit(region)))
            .filter(col(VALUE).is_not_null())
            .select([col(DISTRICT), col(VALUE)])
            .sort(
                [VALUE],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        Self::ranked_entries(&df, DISTRICT)
    }

    /// Mean value per region, restricted to the macroregion's region set.
    pub fn regions_in_macroregion(
        data: &SurveyData,
        macroregion: &Macroregion,
    ) -> Result<Vec<RankedEntry>, AggregateError> {
        let allowed = Series::new(REGION.into(), macroregion.regions.clone());
        let df = data
            .frame()
            .clone()
            .lazy()
            .filter(col(REGION).is_in(lit(allowed)))
            .group_by_stable([col(REGION)])
            .agg([col(VALUE).mean()])
            .filter(col(VALUE).is_not_null())
            .sort(
                [VALUE],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        Self::ranked_entries(&df, REGION)
    }

    /// Mean value per region across the whole table.
    pub fn all_regions(data: &SurveyData) -> Result<Vec<RankedEntry>, AggregateError> {
        let df = data
            .frame()
            .clone()
            .lazy()
            .group_by_stable([col(REGION)])
            .agg([col(VALUE).mean()])
            .filter(col(VALUE).is_not_null())
            .sort(
                [VALUE],
                SortMultipleOptions::default().with_maintain_order(true),
            )
            .collect()?;

        Self::ranked_entries(&df, REGION)
    }

    fn ranked_entries(
        df: &DataFrame,
        label_col: &str,
    ) -> Result<Vec<RankedEntry>, AggregateError> {
        let labels = df.column(label_col)?.str()?;
        let values = df.column(VALUE)?.f64()?;

        Ok(labels
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(label, value)| {
                Some(RankedEntry {
                    label: label?.to_string(),
                    value: value?,
                })
            })
            .collect())
    }
}
