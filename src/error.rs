//! Typed errors for the query layer and user-facing message formatting.
//!
//! Uses typed error matching (enum variants, chain walking) rather than
//! string parsing so callers can react to specific failures.

use std::fmt;
use std::path::PathBuf;

/// Errors raised by the dataset store and query engines.
///
/// Recoverable per-row or per-cell conditions (an unparsable date, a
/// correlation pair with too little overlap, a malformed search key) are
/// not represented here: those resolve to excluded rows, NaN cells, or
/// empty results at the operation that encounters them.
#[derive(Debug)]
pub enum DataError {
    /// The backing data source does not exist. Fatal: no query may run
    /// until the source is provided.
    MissingSource { path: PathBuf },
    /// A requested column is not present in the dataset.
    ColumnNotFound { name: String },
    /// A caller passed an argument that violates an operation's contract,
    /// e.g. a zero ranking size or zero histogram bins.
    InvalidArgument { message: String },
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::MissingSource { path } => {
                write!(f, "data source not found: {}", path.display())
            }
            DataError::ColumnNotFound { name } => write!(f, "column not found: {}", name),
            DataError::InvalidArgument { message } => write!(f, "invalid argument: {}", message),
        }
    }
}

impl std::error::Error for DataError {}

/// Format a report as a user-facing message, walking the error chain for
/// typed variants before falling back to the report's own display.
pub fn user_message(report: &color_eyre::eyre::Report) -> String {
    for cause in report.chain() {
        if let Some(err) = cause.downcast_ref::<DataError>() {
            return match err {
                DataError::MissingSource { path } => format!(
                    "Data source {} does not exist. Please provide the file to proceed.",
                    path.display()
                ),
                DataError::ColumnNotFound { name } => format!(
                    "Column '{}' is not present in the dataset. Check the file's header row.",
                    name
                ),
                DataError::InvalidArgument { message } => message.clone(),
            };
        }
    }
    report
        .to_string()
        .lines()
        .next()
        .map(str::trim)
        .unwrap_or("An error occurred")
        .to_string()
}
