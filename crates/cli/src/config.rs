//! Configuration loading and management

use anyhow::{Context, Result};
use phrase_tagger_domain::Normalizer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_hierarchy_path")]
    pub hierarchy_path: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Memoize normalized strings for the lifetime of the process
    #[serde(default = "default_true")]
    pub cache: bool,
}

fn default_hierarchy_path() -> PathBuf {
    PathBuf::from("./dicts/hierarchy.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hierarchy_path: default_hierarchy_path(),
            log_level: default_log_level(),
        }
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            cache: default_true(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("PHRASE_TAGGER")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Hierarchy file, with a command-line override taking precedence
    pub fn hierarchy_path(&self, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.general.hierarchy_path.clone())
    }

    /// Log level, with a command-line override taking precedence
    pub fn log_level<'a>(&'a self, override_level: Option<&'a str>) -> &'a str {
        override_level.unwrap_or(&self.general.log_level)
    }

    pub fn build_normalizer(&self) -> Normalizer {
        if self.normalizer.cache {
            Normalizer::new()
        } else {
            Normalizer::uncached()
        }
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# phrase-tagger configuration

[general]
hierarchy_path = "./dicts/hierarchy.json"
log_level = "warn"

[normalizer]
# Memoize normalized strings; disable to recompute on every lookup
cache = true
"#
        .to_string()
    }
}
