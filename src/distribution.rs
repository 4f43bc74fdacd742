//! Distribution engine: equal-width histograms over numeric columns and
//! frequency counts over categorical columns.

use color_eyre::Result;
use polars::prelude::*;
use std::collections::HashMap;

use crate::dataset::Dataset;
use crate::error::DataError;

/// One contiguous sub-range of a numeric column's domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

/// A distinct categorical value and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Partition `column` into `bins` equal-width buckets.
///
/// Null and non-finite values are excluded; with `exclude_non_positive`,
/// values <= 0 are dropped as well (so unread articles with zero views do
/// not dominate the view distribution). Bucket boundaries come from the
/// min/max of the values that survive filtering, not the raw column. Zero
/// eligible values yields an empty histogram, not an error.
pub fn histogram(
    dataset: &Dataset,
    column: &str,
    bins: usize,
    exclude_non_positive: bool,
) -> Result<Histogram> {
    if bins == 0 {
        return Err(DataError::InvalidArgument {
            message: "histogram requires at least 1 bin".to_string(),
        }
        .into());
    }

    let mut values = dataset.numeric_values(column)?;
    values.retain(|v| v.is_finite() && (!exclude_non_positive || *v > 0.0));

    if values.is_empty() {
        return Ok(Histogram {
            column: column.to_string(),
            buckets: Vec::new(),
        });
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let range = max - min;

    if range == 0.0 {
        // All eligible values identical: one degenerate bucket holds them.
        return Ok(Histogram {
            column: column.to_string(),
            buckets: vec![Bucket {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        });
    }

    let mut counts = vec![0usize; bins];
    for &v in &values {
        let idx = (((v - min) / range) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let width = range / bins as f64;
    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bucket {
            lower: min + i as f64 * width,
            upper: if i + 1 == bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
            count,
        })
        .collect();

    Ok(Histogram {
        column: column.to_string(),
        buckets,
    })
}

/// Frequency counts of the distinct values of `column`, descending by
/// count and limited to the `top_k` most frequent. Ties keep
/// first-encountered order; null entries are skipped.
pub fn value_counts(dataset: &Dataset, column: &str, top_k: usize) -> Result<Vec<CategoryCount>> {
    let col = dataset.column(column)?;
    let series = col.as_materialized_series();

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for value in series.iter() {
        if matches!(value, AnyValue::Null) {
            continue;
        }
        let key = value.str_value().to_string();
        match counts.get_mut(&key) {
            Some(n) => *n += 1,
            None => {
                counts.insert(key.clone(), 1);
                order.push(key);
            }
        }
    }

    let mut result: Vec<CategoryCount> = order
        .into_iter()
        .map(|value| {
            let count = counts[&value];
            CategoryCount { value, count }
        })
        .collect();
    // Stable sort: equal counts keep first-encountered order.
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result.truncate(top_k);
    Ok(result)
}
