//! Correlation/dependence engine: pairwise Pearson coefficients, grouped
//! values per category, calendar-month bucketing, and per-user activity.

use chrono::{DateTime, Datelike, NaiveDate};
use color_eyre::Result;
use polars::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::dataset::Dataset;
use crate::error::DataError;

/// Column counted by [`editor_activity`].
pub const EDITOR_COLUMN: &str = "LastEditorUserId";

/// A symmetric matrix of Pearson coefficients, one row/column per input
/// column. The diagonal is 1.0; a pair with fewer than 2 overlapping
/// observations holds `f64::NAN` rather than erroring.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
    /// Overlapping (both-present) observation count per pair.
    pub sample_sizes: Vec<Vec<usize>>,
}

/// Pearson coefficient over aligned observations. NaN when fewer than 2
/// points; 0.0 when either side has no variance.
fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return f64::NAN;
    }

    let mean_x: f64 = xs.iter().sum::<f64>() / n as f64;
    let mean_y: f64 = ys.iter().sum::<f64>() / n as f64;

    let numerator: f64 = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let var_x: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    let var_y: f64 = ys.iter().map(|y| (y - mean_y).powi(2)).sum();

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }
    numerator / (var_x.sqrt() * var_y.sqrt())
}

/// Pairwise Pearson matrix over the named columns. Nulls are excluded per
/// pair (a row missing either side does not contribute to that pair), so
/// the effective sample size differs cell by cell.
pub fn correlation_matrix(dataset: &Dataset, columns: &[String]) -> Result<CorrelationMatrix> {
    let n = columns.len();
    let mut values = vec![vec![1.0; n]; n];
    let mut sample_sizes = vec![vec![0; n]; n];

    for (i, row) in sample_sizes.iter_mut().enumerate() {
        row[i] = dataset.numeric_values(&columns[i])?.len();
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let (xs, ys) = dataset.paired_numeric_values(&columns[i], &columns[j])?;
            let r = pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
            sample_sizes[i][j] = xs.len();
            sample_sizes[j][i] = xs.len();
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
        sample_sizes,
    })
}

/// [`correlation_matrix`] over every numeric column of the dataset, in
/// schema order.
pub fn correlation_matrix_all(dataset: &Dataset) -> Result<CorrelationMatrix> {
    let columns = dataset.numeric_columns();
    correlation_matrix(dataset, &columns)
}

/// One category and the values observed under it, in source row order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValues {
    pub category: String,
    pub values: Vec<f64>,
}

/// Group the values of `value_column` by the distinct values of
/// `category_column`. Categories appear in first-encountered order; rows
/// with a null category or null value are excluded. Drives box/point-wise
/// dependence views, so the full per-category value lists are kept.
pub fn group_by_category(
    dataset: &Dataset,
    category_column: &str,
    value_column: &str,
) -> Result<Vec<CategoryValues>> {
    let categories = dataset.column(category_column)?.as_materialized_series();
    let values = dataset
        .column(value_column)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    let values = values.f64()?;

    let mut groups: Vec<CategoryValues> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, category) in categories.iter().enumerate() {
        if matches!(category, AnyValue::Null) {
            continue;
        }
        let Some(value) = values.get(i) else { continue };
        let key = category.str_value().to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(CategoryValues {
                category: key,
                values: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].values.push(value);
    }

    Ok(groups)
}

/// Count of records in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCount {
    /// First day of the month.
    pub month: NaiveDate,
    pub count: usize,
}

/// Bucket records by the calendar month of `date_column`, ascending.
///
/// A row whose timestamp cannot be parsed is excluded; it never fails the
/// whole operation. Months with zero records are omitted.
pub fn monthly_bucket(dataset: &Dataset, date_column: &str) -> Result<Vec<MonthCount>> {
    let col = dataset.column(date_column)?;
    let series = col.as_materialized_series();
    let dates = row_dates(series)?;

    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in dates.into_iter().flatten() {
        if let Some(month) = NaiveDate::from_ymd_opt(date.year(), date.month(), 1) {
            *counts.entry(month).or_insert(0) += 1;
        }
    }

    Ok(counts
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect())
}

/// Per-row calendar dates of a temporal or string column. `None` marks a
/// row that is null or unparsable.
fn row_dates(series: &Series) -> Result<Vec<Option<NaiveDate>>> {
    match series.dtype() {
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let ca = series.datetime()?;
            Ok(ca
                .phys
                .iter()
                .map(|opt| opt.and_then(|ts| timestamp_to_date(ts, unit)))
                .collect())
        }
        DataType::Date => {
            let ca = series.date()?;
            Ok(ca
                .phys
                .iter()
                .map(|opt| {
                    opt.and_then(|days| {
                        DateTime::from_timestamp(days as i64 * 86_400, 0).map(|d| d.date_naive())
                    })
                })
                .collect())
        }
        DataType::String => {
            let ca = series.str()?;
            Ok(ca.iter().map(|opt| opt.and_then(parse_date_str)).collect())
        }
        other => Err(DataError::InvalidArgument {
            message: format!("column is not a date column (found {})", other),
        }
        .into()),
    }
}

fn timestamp_to_date(ts: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let dt = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ts),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ts),
        TimeUnit::Nanoseconds => {
            DateTime::from_timestamp(ts.div_euclid(1_000_000_000), ts.rem_euclid(1_000_000_000) as u32)
        }
    };
    dt.map(|d| d.date_naive())
}

/// Accepts the timestamp shapes seen in post exports: ISO datetimes with a
/// `T` or space separator (fractional seconds optional) and bare dates.
fn parse_date_str(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Records per distinct user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCount {
    pub user_id: i64,
    pub count: usize,
}

/// Count of records per distinct non-null user in `user_column`,
/// ascending by user id.
pub fn activity_by_user(dataset: &Dataset, user_column: &str) -> Result<Vec<UserCount>> {
    let col = dataset.column(user_column)?;
    let ids = col.as_materialized_series().cast(&DataType::Int64)?;
    let ids = ids.i64()?;

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for id in ids.iter().flatten() {
        *counts.entry(id).or_insert(0) += 1;
    }

    Ok(counts
        .into_iter()
        .map(|(user_id, count)| UserCount { user_id, count })
        .collect())
}

/// The `top_k` most active editors by record count, descending. Ties keep
/// first-encountered order, matching the distribution engine's tie rule.
pub fn editor_activity(dataset: &Dataset, top_k: usize) -> Result<Vec<UserCount>> {
    let col = dataset.column(EDITOR_COLUMN)?;
    let ids = col.as_materialized_series().cast(&DataType::Int64)?;
    let ids = ids.i64()?;

    let mut counts: HashMap<i64, usize> = HashMap::new();
    let mut order: Vec<i64> = Vec::new();
    for id in ids.iter().flatten() {
        match counts.get_mut(&id) {
            Some(n) => *n += 1,
            None => {
                counts.insert(id, 1);
                order.push(id);
            }
        }
    }

    let mut result: Vec<UserCount> = order
        .into_iter()
        .map(|user_id| UserCount {
            user_id,
            count: counts[&user_id],
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result.truncate(top_k);
    Ok(result)
}
