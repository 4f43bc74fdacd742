//! Ranking engine: top-N records by a numeric column.

use color_eyre::Result;
use polars::prelude::*;

use crate::dataset::Dataset;
use crate::error::DataError;

/// The `n` records with the largest value of `column`, descending.
///
/// Records with a null ranking value are excluded before sorting rather
/// than coerced to zero. The sort is stable: ties keep source row order so
/// output is reproducible. Fewer than `n` eligible rows yields a short
/// result, not an error.
pub fn top_n(dataset: &Dataset, column: &str, n: usize) -> Result<DataFrame> {
    if n == 0 {
        return Err(DataError::InvalidArgument {
            message: "ranking size must be at least 1".to_string(),
        }
        .into());
    }
    dataset.column(column)?;

    let options = SortMultipleOptions {
        descending: vec![true],
        maintain_order: true,
        ..Default::default()
    };
    let df = dataset
        .lazy()
        .drop_nulls(Some(by_name([column], true)))
        .sort_by_exprs(vec![col(column)], options)
        .limit(n as u32)
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let df = df!(
            "id" => &[1i64, 2, 3, 4],
            "Score" => &[Some(10i64), Some(50), None, Some(50)],
            "ViewCount" => &[Some(100i64), Some(20), Some(5), None]
        )
        .unwrap();
        Dataset::from_frame(df)
    }

    #[test]
    fn orders_descending_and_limits() {
        let ds = sample();
        let out = top_n(&ds, "ViewCount", 2).unwrap();
        let ids: Vec<i64> = out.column("id").unwrap().i64().unwrap().iter().flatten().collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn ties_keep_source_row_order() {
        let ds = sample();
        let out = top_n(&ds, "Score", 3).unwrap();
        let ids: Vec<i64> = out.column("id").unwrap().i64().unwrap().iter().flatten().collect();
        // Rows 2 and 4 tie at 50; row 2 comes first in the source.
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn nulls_are_excluded_not_ranked() {
        let ds = sample();
        let out = top_n(&ds, "Score", 10).unwrap();
        assert_eq!(out.height(), 3);
    }

    #[test]
    fn zero_n_is_a_contract_violation() {
        let ds = sample();
        assert!(top_n(&ds, "Score", 0).is_err());
    }
}
