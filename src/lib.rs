pub mod cli;
pub mod config;
pub mod correlation;
pub mod dataset;
pub mod distribution;
pub mod error;
pub mod pages;
pub mod ranking;
pub mod render;
pub mod search;

pub use cli::Args;
pub use config::{AppConfig, ConfigManager};
pub use dataset::{Dataset, LoadOptions};
pub use error::DataError;
pub use pages::{build_page, AnalysisConfig, Page, PageContent};
pub use search::{search, SearchMode, SearchQuery};

/// Application name used for the config directory and other app-specific paths
pub const APP_NAME: &str = "postlens";
