//! Page dispatch: each navigation page maps to one query set over the
//! dataset. Results carry titles and column labels for display, with no
//! number formatting or styling baked in.

use color_eyre::Result;
use log::debug;
use polars::prelude::*;
use std::time::Instant;

use crate::correlation::{
    self, CategoryValues, CorrelationMatrix, MonthCount, UserCount,
};
use crate::dataset::Dataset;
use crate::distribution::{self, CategoryCount, Histogram};
use crate::ranking;

pub const TITLE_COLUMN: &str = "Title";
pub const BODY_COLUMN: &str = "Body";
pub const SCORE_COLUMN: &str = "Score";
pub const VIEW_COUNT_COLUMN: &str = "ViewCount";
pub const POST_TYPE_COLUMN: &str = "PostTypeId";
pub const OWNER_COLUMN: &str = "OwnerUserId";
pub const CREATION_DATE_COLUMN: &str = "CreationDate";

/// The engagement metrics correlated on the dependence page, alongside the
/// all-numeric matrix. Kept as a distinct operation rather than collapsed
/// into the all-numeric one.
pub const ENGAGEMENT_COLUMNS: [&str; 5] = [
    "AnswerCount",
    "CommentCount",
    SCORE_COLUMN,
    VIEW_COUNT_COLUMN,
    "FavoriteCount",
];

/// Tunable query-set parameters, sourced from config/CLI.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Ranking size for the best-articles tables.
    pub top_n: usize,
    /// Bucket count for the views histogram.
    pub histogram_bins: usize,
    /// Limit for categorical counts (post types, most active editors).
    pub category_top_k: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            histogram_bins: 50,
            category_top_k: 10,
        }
    }
}

/// The navigation pages. A closed enumeration: adding a page means adding
/// a variant and its query set in [`build_page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    BestArticles,
    ViewsDistribution,
    DependableColumnsAnalysis,
    UserAndArticleActivity,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::BestArticles,
        Page::ViewsDistribution,
        Page::DependableColumnsAnalysis,
        Page::UserAndArticleActivity,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::BestArticles => "Best Articles",
            Page::ViewsDistribution => "Views Distribution",
            Page::DependableColumnsAnalysis => "Dependable Columns Analysis",
            Page::UserAndArticleActivity => "User and Article Activity",
        }
    }
}

/// A ranked record list limited to its display columns.
#[derive(Debug, Clone)]
pub struct RankedTable {
    pub title: String,
    pub display_columns: Vec<String>,
    pub rows: DataFrame,
}

#[derive(Debug, Clone)]
pub struct HistogramChart {
    pub title: String,
    pub histogram: Histogram,
}

#[derive(Debug, Clone)]
pub struct CountChart {
    pub title: String,
    pub column: String,
    pub counts: Vec<CategoryCount>,
}

#[derive(Debug, Clone)]
pub struct MatrixChart {
    pub title: String,
    pub matrix: CorrelationMatrix,
}

#[derive(Debug, Clone)]
pub struct GroupedChart {
    pub title: String,
    pub category_column: String,
    pub value_column: String,
    pub groups: Vec<CategoryValues>,
}

#[derive(Debug, Clone)]
pub struct MonthlyChart {
    pub title: String,
    pub column: String,
    pub months: Vec<MonthCount>,
}

#[derive(Debug, Clone)]
pub struct ActivityChart {
    pub title: String,
    pub column: String,
    pub users: Vec<UserCount>,
}

/// Everything one page displays, derived in one pass over the dataset.
#[derive(Debug, Clone)]
pub enum PageContent {
    BestArticles {
        by_views: RankedTable,
        by_score: RankedTable,
    },
    ViewsDistribution {
        views: HistogramChart,
        post_types: CountChart,
    },
    DependableColumns {
        all_numeric: MatrixChart,
        engagement: MatrixChart,
        score_by_post_type: GroupedChart,
        articles_per_month: MonthlyChart,
    },
    UserActivity {
        by_owner: ActivityChart,
        top_editors: ActivityChart,
    },
}

/// Run the query set for `page`. Each call is a pure function of the
/// dataset and parameters; nothing is cached between interactions.
pub fn build_page(dataset: &Dataset, page: Page, config: &AnalysisConfig) -> Result<PageContent> {
    let started = Instant::now();
    let content = match page {
        Page::BestArticles => PageContent::BestArticles {
            by_views: ranked_table(dataset, VIEW_COUNT_COLUMN, "Views", config.top_n)?,
            by_score: ranked_table(dataset, SCORE_COLUMN, "Score", config.top_n)?,
        },
        Page::ViewsDistribution => PageContent::ViewsDistribution {
            views: HistogramChart {
                title: "Distribution of Views (Excluding 0 views)".to_string(),
                histogram: distribution::histogram(
                    dataset,
                    VIEW_COUNT_COLUMN,
                    config.histogram_bins,
                    true,
                )?,
            },
            post_types: CountChart {
                title: format!(
                    "Top {} Article Distribution by Post Type",
                    config.category_top_k
                ),
                column: POST_TYPE_COLUMN.to_string(),
                counts: distribution::value_counts(
                    dataset,
                    POST_TYPE_COLUMN,
                    config.category_top_k,
                )?,
            },
        },
        Page::DependableColumnsAnalysis => {
            let engagement: Vec<String> =
                ENGAGEMENT_COLUMNS.iter().map(|c| c.to_string()).collect();
            PageContent::DependableColumns {
                all_numeric: MatrixChart {
                    title: "Correlation Matrix".to_string(),
                    matrix: correlation::correlation_matrix_all(dataset)?,
                },
                engagement: MatrixChart {
                    title: "Variable Dependence Analysis".to_string(),
                    matrix: correlation::correlation_matrix(dataset, &engagement)?,
                },
                score_by_post_type: GroupedChart {
                    title: format!("{} vs. {}", POST_TYPE_COLUMN, SCORE_COLUMN),
                    category_column: POST_TYPE_COLUMN.to_string(),
                    value_column: SCORE_COLUMN.to_string(),
                    groups: correlation::group_by_category(
                        dataset,
                        POST_TYPE_COLUMN,
                        SCORE_COLUMN,
                    )?,
                },
                articles_per_month: MonthlyChart {
                    title: format!("Number of Articles Over Time ({})", CREATION_DATE_COLUMN),
                    column: CREATION_DATE_COLUMN.to_string(),
                    months: correlation::monthly_bucket(dataset, CREATION_DATE_COLUMN)?,
                },
            }
        }
        Page::UserAndArticleActivity => PageContent::UserActivity {
            by_owner: ActivityChart {
                title: "User Activity Over Time".to_string(),
                column: OWNER_COLUMN.to_string(),
                users: correlation::activity_by_user(dataset, OWNER_COLUMN)?,
            },
            top_editors: ActivityChart {
                title: "Most Active Editors".to_string(),
                column: correlation::EDITOR_COLUMN.to_string(),
                users: correlation::editor_activity(dataset, config.category_top_k)?,
            },
        },
    };
    debug!(
        "built page '{}' in {:.1?}",
        page.title(),
        started.elapsed()
    );
    Ok(content)
}

fn ranked_table(dataset: &Dataset, column: &str, label: &str, n: usize) -> Result<RankedTable> {
    let ranked = ranking::top_n(dataset, column, n)?;
    let rows = ranked.select([TITLE_COLUMN, column])?;
    Ok(RankedTable {
        title: format!("Top {} Articles by {}", n, label),
        display_columns: vec![TITLE_COLUMN.to_string(), column.to_string()],
        rows,
    })
}
