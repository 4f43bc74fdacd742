use postlens::dataset::{Dataset, LoadOptions};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// A small posts export in the source format: header row plus a leading
/// unnamed row-index column. One row has a null Score, one has zero views,
/// one has an unparsable date, and two editor names differ only by case.
pub const SAMPLE_CSV: &str = "\
,id,Title,Body,Score,ViewCount,AnswerCount,CommentCount,FavoriteCount,PostTypeId,OwnerUserId,LastEditorUserId,LastEditorDisplayName,CreationDate
0,1,Intro to sorting,body a,10,100,1,0,2,1,11,5,Alice,2023-01-05T10:00:00
1,2,Hash maps in practice,body b,50,20,2,4,,1,12,5,alice,2023-01-20T11:30:00
2,3,Borrow checker notes,body c,7,0,0,2,1,2,11,6,Bob,2023-02-01T09:15:00
3,4,Lifetimes explained,body d,,3,1,1,0,1,,,,2023-02-10T16:45:00
4,5,Async pitfalls,body e,23,55,3,2,5,2,13,6,Bob,2023-03-03T08:00:00
5,6,Trait objects,body f,23,41,0,1,1,1,12,7,Cara,not a date
6,7,Error handling,body g,5,9,1,0,,3,14,5,Alice,2023-03-29T22:10:00
";

pub fn write_sample_csv() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("posts.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
    (dir, path)
}

pub fn sample_dataset() -> (TempDir, Dataset) {
    let (dir, path) = write_sample_csv();
    let dataset = Dataset::from_csv(&path, &LoadOptions::default()).unwrap();
    (dir, dataset)
}
