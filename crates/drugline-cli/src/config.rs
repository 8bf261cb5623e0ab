//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global configuration for drugline
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
    pub drugbank: DrugbankConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_dir: PathBuf,
    pub compression_level: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir: PathBuf::from("./output"),
            compression_level: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DrugbankConfig {
    #[serde(deserialize_with = "deserialize_env_path")]
    pub input: PathBuf,
    pub namespace: String,
}

impl Default for DrugbankConfig {
    fn default() -> Self {
        Self {
            input: std::env::var("DRUGBANK_XML")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("drugbank_partial.xml")),
            namespace: drugline_drugbank::Namespace::DRUGBANK_URI.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows shown in ranked report tables
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

/// Deserialize a path that may be an environment variable reference like ${VAR}
fn deserialize_env_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    expand_env_var(&raw)
        .map(PathBuf::from)
        .ok_or_else(|| serde::de::Error::custom(format!("environment variable not set: {raw}")))
}

/// Expand ${VAR} to environment variable value
fn expand_env_var(s: &str) -> Option<String> {
    if let Some(var_name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
        std::env::var(var_name).ok()
    } else {
        Some(s.to_string())
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./drugline.toml (current directory)
    /// 2. ~/.config/drugline/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("drugline.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "drugline") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Pipeline settings, with CLI overrides applied on top of the file
    pub fn pipeline(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> drugline_drugbank::Config {
        drugline_drugbank::Config {
            input: input.unwrap_or_else(|| self.drugbank.input.clone()),
            output_dir: output.unwrap_or_else(|| self.output.default_dir.clone()),
            namespace: self.drugbank.namespace.clone(),
            zstd_level: self.output.compression_level,
        }
    }

    pub fn namespace(&self) -> drugline_drugbank::Namespace {
        drugline_drugbank::Namespace::new(self.drugbank.namespace.clone())
    }
}
