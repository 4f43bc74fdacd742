use color_eyre::Result;
use postlens::dataset::{Dataset, LoadOptions};
use postlens::error::DataError;
use std::path::Path;

mod common;

#[test]
fn missing_source_is_a_typed_fatal_error() {
    let err = Dataset::from_csv(Path::new("/nonexistent/posts.csv"), &LoadOptions::default())
        .err()
        .expect("load must fail for an absent source");
    let is_missing_source = err
        .chain()
        .any(|c| matches!(c.downcast_ref::<DataError>(), Some(DataError::MissingSource { .. })));
    assert!(is_missing_source, "expected MissingSource, got: {err}");
}

#[test]
fn load_drops_the_row_index_column() -> Result<()> {
    let (_dir, dataset) = common::sample_dataset();
    let names = dataset.column_names();
    assert_eq!(names.first().map(String::as_str), Some("id"));
    assert!(names.contains(&"Title".to_string()));
    assert!(names.contains(&"CreationDate".to_string()));
    Ok(())
}

#[test]
fn load_preserves_source_row_order() -> Result<()> {
    let (_dir, dataset) = common::sample_dataset();
    assert_eq!(dataset.height(), 7);
    let ids: Vec<i64> = dataset
        .frame()
        .column("id")?
        .i64()?
        .iter()
        .flatten()
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    Ok(())
}

#[test]
fn numeric_access_excludes_nulls_instead_of_zeroing() -> Result<()> {
    let (_dir, dataset) = common::sample_dataset();
    // One of the seven Score entries is empty in the source.
    let scores = dataset.numeric_values("Score")?;
    assert_eq!(scores.len(), 6);
    assert!(!scores.contains(&0.0));
    Ok(())
}

#[test]
fn index_column_can_be_kept_when_absent_from_source() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("plain.csv");
    std::fs::write(&path, "id,Title\n1,first\n2,second\n")?;
    let dataset = Dataset::from_csv(&path, &LoadOptions::default().with_index_column(false))?;
    assert_eq!(
        dataset.column_names(),
        vec!["id".to_string(), "Title".to_string()]
    );
    assert_eq!(dataset.height(), 2);
    Ok(())
}
