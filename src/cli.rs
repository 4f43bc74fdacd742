use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::pages::Page;
use crate::search::SearchMode;

/// Navigation page to display
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PageArg {
    /// Top articles ranked by views and by score
    BestArticles,
    /// View-count histogram and post type frequencies
    ViewsDistribution,
    /// Correlation matrices, score-by-post-type groups, monthly counts
    DependableColumns,
    /// Per-user activity and most active editors
    UserActivity,
}

impl From<PageArg> for Page {
    fn from(arg: PageArg) -> Self {
        match arg {
            PageArg::BestArticles => Page::BestArticles,
            PageArg::ViewsDistribution => Page::ViewsDistribution,
            PageArg::DependableColumns => Page::DependableColumnsAnalysis,
            PageArg::UserActivity => Page::UserAndArticleActivity,
        }
    }
}

/// Search mode for the record filter
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SearchModeArg {
    /// Match the record id exactly
    Id,
    /// Match the editor display name exactly (case-sensitive)
    Name,
}

impl From<SearchModeArg> for SearchMode {
    fn from(arg: SearchModeArg) -> Self {
        match arg {
            SearchModeArg::Id => SearchMode::ById,
            SearchModeArg::Name => SearchMode::ByName,
        }
    }
}

/// Command-line arguments for postlens
#[derive(Parser, Debug)]
#[command(version, about = "postlens")]
pub struct Args {
    pub path: PathBuf,

    /// Page to display
    #[arg(long = "page", value_enum, default_value = "best-articles")]
    pub page: PageArg,

    /// Search the dataset by record id or editor name
    #[arg(long = "search-by", value_enum)]
    pub search_by: Option<SearchModeArg>,

    /// Search key; interpreted per --search-by
    #[arg(long = "key")]
    pub key: Option<String>,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Specify that the file has no header
    #[arg(long = "no-header", action)]
    pub no_header: bool,

    /// Specify that the file has no leading row-index column
    #[arg(long = "no-index-column", action)]
    pub no_index_column: bool,

    /// Ranking size for the best-articles tables
    #[arg(long = "top-n")]
    pub top_n: Option<usize>,

    /// Bucket count for the views histogram
    #[arg(long = "bins")]
    pub bins: Option<usize>,

    /// Write the default config file and exit
    #[arg(long = "write-config", action)]
    pub write_config: bool,

    /// Overwrite an existing config file when writing
    #[arg(long = "force", action)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_args_map_to_pages() {
        assert_eq!(Page::from(PageArg::BestArticles), Page::BestArticles);
        assert_eq!(
            Page::from(PageArg::DependableColumns),
            Page::DependableColumnsAnalysis
        );
        assert_eq!(Page::from(PageArg::UserActivity), Page::UserAndArticleActivity);
    }

    #[test]
    fn search_mode_args_map_to_modes() {
        assert_eq!(SearchMode::from(SearchModeArg::Id), SearchMode::ById);
        assert_eq!(SearchMode::from(SearchModeArg::Name), SearchMode::ByName);
    }
}
