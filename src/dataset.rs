//! Dataset store: loads the delimited posts file once and exposes typed
//! column access over an immutable DataFrame.

use color_eyre::Result;
use polars::prelude::PlPath;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;

use crate::error::DataError;

/// Options controlling how the source file is read.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
    pub infer_schema_length: Option<usize>,
    /// The source carries a leading row-index column (the convention of
    /// frame exports); it is dropped after load.
    pub has_index_column: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: None,
            infer_schema_length: None,
            has_index_column: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = Some(has_header);
        self
    }

    pub fn with_infer_schema_length(mut self, n: usize) -> Self {
        self.infer_schema_length = Some(n);
        self
    }

    pub fn with_index_column(mut self, has_index_column: bool) -> Self {
        self.has_index_column = has_index_column;
        self
    }
}

/// The loaded dataset. Row order matches source order and never changes;
/// every query is a derived view over this frame.
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Load the dataset from a delimited file with a header row.
    ///
    /// Fails with [`DataError::MissingSource`] before any read is attempted
    /// when the path does not exist. No empty dataset is substituted: the
    /// caller is expected to halt query execution entirely.
    pub fn from_csv(path: &Path, options: &LoadOptions) -> Result<Self> {
        if !path.exists() {
            return Err(DataError::MissingSource {
                path: path.to_path_buf(),
            }
            .into());
        }

        let pl_path = PlPath::Local(Arc::from(path));
        let mut reader = LazyCsvReader::new(pl_path);
        if let Some(delimiter) = options.delimiter {
            reader = reader.with_separator(delimiter);
        }
        if let Some(has_header) = options.has_header {
            reader = reader.with_has_header(has_header);
        }
        if let Some(n) = options.infer_schema_length {
            reader = reader.with_infer_schema_length(Some(n));
        }
        reader = reader.with_try_parse_dates(true);

        let mut lf = Self::trim_column_names(reader.finish()?)?;
        if options.has_index_column {
            lf = Self::drop_index_column(lf)?;
        }
        let df = lf.collect()?;
        Ok(Self { df })
    }

    /// Wrap an already-materialized frame. Used by tests and by callers that
    /// source their data elsewhere.
    pub fn from_frame(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// A lazy view over the dataset. Cheap: the underlying columns are
    /// shared, not copied.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Names of all numeric columns, in schema order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .schema()
            .iter()
            .filter(|(_, dtype)| is_numeric_type(dtype))
            .map(|(name, _)| name.to_string())
            .collect()
    }

    /// The named column, or [`DataError::ColumnNotFound`].
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.df.column(name).map_err(|_| {
            DataError::ColumnNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Non-null values of a numeric column as f64, in source row order.
    /// Nulls are excluded, never coerced to zero.
    pub fn numeric_values(&self, name: &str) -> Result<Vec<f64>> {
        let col = self.column(name)?;
        Ok(numeric_values_of(col.as_materialized_series())?)
    }

    /// Values of two numeric columns restricted to rows where both are
    /// present. The two vectors have equal length and aligned indices.
    pub fn paired_numeric_values(&self, a: &str, b: &str) -> Result<(Vec<f64>, Vec<f64>)> {
        let col_a = self.column(a)?;
        let col_b = self.column(b)?;
        let mask = col_a.is_not_null() & col_b.is_not_null();
        let a_clean = col_a.filter(&mask)?;
        let b_clean = col_b.filter(&mask)?;
        Ok((
            numeric_values_of(a_clean.as_materialized_series())?,
            numeric_values_of(b_clean.as_materialized_series())?,
        ))
    }

    fn trim_column_names(mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema()?;
        let (existing, trimmed): (Vec<String>, Vec<String>) = schema
            .iter_names()
            .filter(|name| name.trim() != name.as_str())
            .map(|name| (name.to_string(), name.trim().to_string()))
            .unzip();
        if existing.is_empty() {
            return Ok(lf);
        }
        Ok(lf.rename(
            existing.iter().map(String::as_str),
            trimmed.iter().map(String::as_str),
            false,
        ))
    }

    fn drop_index_column(mut lf: LazyFrame) -> Result<LazyFrame> {
        let schema = lf.collect_schema()?;
        if schema.len() <= 1 {
            return Ok(lf);
        }
        let keep: Vec<Expr> = schema
            .iter_names()
            .skip(1)
            .map(|name| col(name.as_str()))
            .collect();
        Ok(lf.select(keep))
    }
}

pub fn is_numeric_type(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Convert a numeric series to f64 values, skipping nulls.
pub fn numeric_values_of(series: &Series) -> PolarsResult<Vec<f64>> {
    if let Ok(f64_series) = series.f64() {
        return Ok(f64_series.iter().flatten().collect());
    }
    let cast = series.cast(&DataType::Float64)?;
    Ok(cast.f64()?.iter().flatten().collect())
}
