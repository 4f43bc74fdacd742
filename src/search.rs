//! Record filter: search the dataset by record id or by exact editor
//! display name. Runs independently of page selection.

use color_eyre::Result;
use polars::prelude::*;

use crate::dataset::Dataset;

/// Column holding the per-record identifier searched by [`SearchQuery::ById`].
pub const ID_COLUMN: &str = "id";
/// Column matched exactly by [`SearchQuery::ByName`].
pub const NAME_COLUMN: &str = "LastEditorDisplayName";

/// How to interpret the raw search key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    ById,
    ByName,
}

/// A parsed, well-formed search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    /// Match records whose id equals the key. Uniqueness is not enforced,
    /// so this may return more than one row.
    ById(i64),
    /// Match records whose editor display name equals the key exactly.
    /// Case-sensitive, no trimming, no partial matching.
    ByName(String),
}

impl SearchQuery {
    /// Parse a raw key for the given mode. Malformed input resolves to
    /// `None` (treated as "no match"), never to an error: an empty key, or
    /// a non-positive or non-numeric key in id mode.
    pub fn parse(mode: SearchMode, raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match mode {
            SearchMode::ById => match raw.parse::<i64>() {
                Ok(id) if id > 0 => Some(SearchQuery::ById(id)),
                _ => None,
            },
            SearchMode::ByName => Some(SearchQuery::ByName(raw.to_string())),
        }
    }
}

/// Rows matching the query, in source row order. Zero matches is a valid,
/// displayable empty result. Records with a null name never match by name.
pub fn search(dataset: &Dataset, query: &SearchQuery) -> Result<DataFrame> {
    dataset.column(match query {
        SearchQuery::ById(_) => ID_COLUMN,
        SearchQuery::ByName(_) => NAME_COLUMN,
    })?;
    let predicate = match query {
        SearchQuery::ById(id) => col(ID_COLUMN).eq(lit(*id)),
        SearchQuery::ByName(name) => col(NAME_COLUMN).eq(lit(name.as_str())),
    };
    Ok(dataset.lazy().filter(predicate).collect()?)
}
