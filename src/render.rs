//! Plain-text rendering of query results. This is the stand-in for an
//! external presentation collaborator: everything here is formatting, no
//! data derivation.

use polars::prelude::*;
use std::fmt::Write;

use crate::pages::{
    ActivityChart, CountChart, GroupedChart, HistogramChart, MatrixChart, MonthlyChart,
    PageContent, RankedTable,
};

pub fn render_page(content: &PageContent) -> String {
    let mut out = String::new();
    match content {
        PageContent::BestArticles { by_views, by_score } => {
            render_ranked(&mut out, by_views);
            render_ranked(&mut out, by_score);
        }
        PageContent::ViewsDistribution { views, post_types } => {
            render_histogram(&mut out, views);
            render_counts(&mut out, post_types);
        }
        PageContent::DependableColumns {
            all_numeric,
            engagement,
            score_by_post_type,
            articles_per_month,
        } => {
            render_matrix(&mut out, all_numeric);
            render_matrix(&mut out, engagement);
            render_groups(&mut out, score_by_post_type);
            render_months(&mut out, articles_per_month);
        }
        PageContent::UserActivity {
            by_owner,
            top_editors,
        } => {
            render_activity(&mut out, by_owner);
            render_activity(&mut out, top_editors);
        }
    }
    out
}

/// Search results restricted to the configured display columns. Columns
/// missing from the frame are skipped; an empty match renders as a note
/// rather than an error.
pub fn render_search_results(results: &DataFrame, columns: &[String]) -> String {
    let mut out = String::new();
    heading(&mut out, "Search Results");
    if results.height() == 0 {
        out.push_str("(no matching records)\n");
        return out;
    }
    let available: Vec<&str> = columns
        .iter()
        .map(|c| c.as_str())
        .filter(|c| results.column(c).is_ok())
        .collect();
    match results.select(available.iter().copied()) {
        Ok(selected) if !available.is_empty() => {
            let _ = writeln!(out, "{}", selected);
        }
        _ => {
            let _ = writeln!(out, "{}", results);
        }
    }
    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {} ==", title);
}

fn render_ranked(out: &mut String, table: &RankedTable) {
    heading(out, &table.title);
    if table.rows.height() == 0 {
        out.push_str("(no eligible records)\n");
        return;
    }
    let _ = writeln!(out, "{}", table.rows);
}

fn render_histogram(out: &mut String, chart: &HistogramChart) {
    heading(out, &chart.title);
    if chart.histogram.is_empty() {
        out.push_str("(no eligible values)\n");
        return;
    }
    for bucket in &chart.histogram.buckets {
        let _ = writeln!(
            out,
            "{:>12.1} .. {:>12.1}  {}",
            bucket.lower, bucket.upper, bucket.count
        );
    }
}

fn render_counts(out: &mut String, chart: &CountChart) {
    heading(out, &chart.title);
    if chart.counts.is_empty() {
        out.push_str("(no values)\n");
        return;
    }
    for entry in &chart.counts {
        let _ = writeln!(out, "{:<24} {}", entry.value, entry.count);
    }
}

fn render_matrix(out: &mut String, chart: &MatrixChart) {
    heading(out, &chart.title);
    let matrix = &chart.matrix;
    if matrix.columns.is_empty() {
        out.push_str("(no numeric columns)\n");
        return;
    }
    let _ = write!(out, "{:<16}", "");
    for name in &matrix.columns {
        let _ = write!(out, "{:>14}", truncate(name, 13));
    }
    out.push('\n');
    for (i, name) in matrix.columns.iter().enumerate() {
        let _ = write!(out, "{:<16}", truncate(name, 15));
        for value in &matrix.values[i] {
            let _ = write!(out, "{:>14.3}", value);
        }
        out.push('\n');
    }
}

fn render_groups(out: &mut String, chart: &GroupedChart) {
    heading(out, &chart.title);
    if chart.groups.is_empty() {
        out.push_str("(no categories)\n");
        return;
    }
    let _ = writeln!(
        out,
        "{:<16} {:>8} {:>12} {:>12}",
        chart.category_column, "count", "min", "max"
    );
    for group in &chart.groups {
        let min = group.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = group
            .values
            .iter()
            .cloned()
            .fold(f64::NEG_INFINITY, f64::max);
        let _ = writeln!(
            out,
            "{:<16} {:>8} {:>12.1} {:>12.1}",
            truncate(&group.category, 15),
            group.values.len(),
            min,
            max
        );
    }
}

fn render_months(out: &mut String, chart: &MonthlyChart) {
    heading(out, &chart.title);
    if chart.months.is_empty() {
        out.push_str("(no parsable dates)\n");
        return;
    }
    for month in &chart.months {
        let _ = writeln!(out, "{}  {}", month.month.format("%Y-%m"), month.count);
    }
}

fn render_activity(out: &mut String, chart: &ActivityChart) {
    heading(out, &chart.title);
    if chart.users.is_empty() {
        out.push_str("(no users)\n");
        return;
    }
    let _ = writeln!(out, "{:<16} {}", chart.column, "count");
    for user in &chart.users {
        let _ = writeln!(out, "{:<16} {}", user.user_id, user.count);
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::pages::{build_page, AnalysisConfig, Page};

    fn sample() -> Dataset {
        let df = df!(
            "id" => &[1i64, 2],
            "Title" => &["a", "b"],
            "Body" => &["..", ".."],
            "Score" => &[10i64, 50],
            "ViewCount" => &[100i64, 20],
            "AnswerCount" => &[1i64, 2],
            "CommentCount" => &[0i64, 4],
            "FavoriteCount" => &[2i64, 0],
            "PostTypeId" => &[1i64, 2],
            "OwnerUserId" => &[11i64, 12],
            "LastEditorUserId" => &[5i64, 6],
            "LastEditorDisplayName" => &["Alice", "Bob"],
            "CreationDate" => &["2023-01-05T10:00:00", "2023-02-01T09:15:00"]
        )
        .unwrap();
        Dataset::from_frame(df)
    }

    #[test]
    fn every_page_renders_without_panic() {
        let ds = sample();
        for page in Page::ALL {
            let content = build_page(&ds, page, &AnalysisConfig::default()).unwrap();
            let text = render_page(&content);
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn empty_search_renders_note() {
        let df = DataFrame::new(vec![
            Series::new("Title".into(), Vec::<String>::new()).into(),
            Series::new("Body".into(), Vec::<String>::new()).into(),
        ])
        .unwrap();
        let text = render_search_results(&df, &["Title".to_string(), "Body".to_string()]);
        assert!(text.contains("no matching records"));
    }

    #[test]
    fn search_results_keep_display_columns() {
        let ds = sample();
        let results = crate::search::search(
            &ds,
            &crate::search::SearchQuery::ByName("Alice".to_string()),
        )
        .unwrap();
        let text = render_search_results(&results, &["Title".to_string(), "Body".to_string()]);
        assert!(text.contains("Title"));
    }
}
