use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::LoadOptions;
use crate::pages::AnalysisConfig;

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);

        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self, path: &str) -> PathBuf {
        self.config_dir.join(path)
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Write default configuration to config file
    pub fn write_default_config(&self, force: bool) -> Result<PathBuf> {
        let config_path = self.config_path("config.toml");

        if config_path.exists() && !force {
            return Err(eyre!(
                "Config file already exists at {}. Use --force to overwrite.",
                config_path.display()
            ));
        }

        self.ensure_config_dir()?;
        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;

        Ok(config_path)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub file_loading: FileLoadingConfig,
    pub analysis: AnalysisSection,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FileLoadingConfig {
    pub delimiter: Option<u8>,
    pub has_header: Option<bool>,
    pub infer_schema_length: Option<usize>,
    /// Whether the source carries a leading row-index column to drop.
    pub index_column: Option<bool>,
}

impl FileLoadingConfig {
    fn merge(&mut self, other: FileLoadingConfig) {
        if other.delimiter.is_some() {
            self.delimiter = other.delimiter;
        }
        if other.has_header.is_some() {
            self.has_header = other.has_header;
        }
        if other.infer_schema_length.is_some() {
            self.infer_schema_length = other.infer_schema_length;
        }
        if other.index_column.is_some() {
            self.index_column = other.index_column;
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        let mut opts = LoadOptions::new();
        if let Some(delimiter) = self.delimiter {
            opts = opts.with_delimiter(delimiter);
        }
        if let Some(has_header) = self.has_header {
            opts = opts.with_has_header(has_header);
        }
        if let Some(n) = self.infer_schema_length {
            opts = opts.with_infer_schema_length(n);
        }
        if let Some(index_column) = self.index_column {
            opts = opts.with_index_column(index_column);
        }
        opts
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub top_n: usize,
    pub histogram_bins: usize,
    pub category_top_k: usize,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            top_n: defaults.top_n,
            histogram_bins: defaults.histogram_bins,
            category_top_k: defaults.category_top_k,
        }
    }
}

impl AnalysisSection {
    fn merge(&mut self, other: AnalysisSection) {
        let defaults = AnalysisSection::default();
        if other.top_n != defaults.top_n {
            self.top_n = other.top_n;
        }
        if other.histogram_bins != defaults.histogram_bins {
            self.histogram_bins = other.histogram_bins;
        }
        if other.category_top_k != defaults.category_top_k {
            self.category_top_k = other.category_top_k;
        }
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            top_n: self.top_n,
            histogram_bins: self.histogram_bins,
            category_top_k: self.category_top_k,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Columns shown for search results.
    pub search_columns: Vec<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            search_columns: vec!["Title".to_string(), "Body".to_string()],
        }
    }
}

impl DisplayConfig {
    fn merge(&mut self, other: DisplayConfig) {
        if other.search_columns != DisplayConfig::default().search_columns {
            self.search_columns = other.search_columns;
        }
    }
}

impl AppConfig {
    /// Load configuration from all layers (default → user). A missing or
    /// malformed user config falls back to defaults.
    pub fn load(app_name: &str) -> Result<Self> {
        let mut config = AppConfig::default();

        if let Ok(user_config) = Self::load_user_config(app_name) {
            config.merge(user_config);
        }

        config.validate()?;

        Ok(config)
    }

    fn load_user_config(app_name: &str) -> Result<AppConfig> {
        let config_manager = ConfigManager::new(app_name)?;
        let config_path = config_manager.config_path("config.toml");

        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: AppConfig) {
        self.file_loading.merge(other.file_loading);
        self.analysis.merge(other.analysis);
        self.display.merge(other.display);
    }

    pub fn validate(&self) -> Result<()> {
        if self.analysis.top_n == 0 {
            return Err(eyre!("analysis.top_n must be greater than 0"));
        }
        if self.analysis.histogram_bins == 0 {
            return Err(eyre!("analysis.histogram_bins must be greater than 0"));
        }
        Ok(())
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# postlens configuration

[file_loading]
# delimiter = 44            # byte value; 44 is ','
# has_header = true
# infer_schema_length = 100
# index_column = true       # drop the leading row-index column

[analysis]
top_n = 10
histogram_bins = 50
category_top_k = 10

[display]
search_columns = ["Title", "Body"]
"#;
