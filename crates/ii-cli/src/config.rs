//! CLI configuration, loadable from TOML with environment overrides.

use std::path::PathBuf;

use serde::Deserialize;

use ii_engine::history::DEFAULT_HISTORY_LIMIT;
use ii_engine::{ApiDefinition, Catalog, map_definition};

/// Top-level configuration for the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Catalog TOML replacing the built-in one. None keeps the built-in.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// JSON API definitions whose contexts are merged into the catalog.
    #[serde(default)]
    pub api_definitions: Vec<PathBuf>,
    /// Maximum number of history entries kept.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            api_definitions: vec![],
            history_limit: default_history_limit(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `II_CATALOG`, `II_API_DEFINITIONS` and `II_HISTORY_LIMIT`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Unparsable limits are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup("II_CATALOG").filter(|p| !p.trim().is_empty()) {
            self.catalog_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(paths) = lookup("II_API_DEFINITIONS") {
            self.api_definitions = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from)
                .collect();
        }
        if let Some(limit) = lookup("II_HISTORY_LIMIT") {
            match limit.trim().parse::<usize>() {
                Ok(limit) => self.history_limit = limit,
                Err(e) => tracing::warn!(value = %limit, error = %e, "ignoring invalid II_HISTORY_LIMIT"),
            }
        }
        self
    }

    /// Build the catalog this config describes.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let mut catalog = match &self.catalog_path {
            Some(path) => Catalog::from_file(path)?,
            None => Catalog::builtin().clone(),
        };

        for path in &self.api_definitions {
            let definition = ApiDefinition::from_file(path)?;
            catalog = catalog.merged(map_definition(&definition)?);
        }

        tracing::info!(
            contexts = catalog.contexts().len(),
            patterns = catalog.pattern_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
