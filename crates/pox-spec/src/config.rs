use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name searched for when no explicit config path is given
pub const CONFIG_FILE: &str = "pox-spec.toml";

/// The configuration file structure (pox-spec.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpecConfig {
    /// Output settings
    pub output: OutputConfig,

    /// Tool name to specifier set, e.g. `ruff = ">=0.4,<1.0"`
    pub requirements: IndexMap<String, String>,
}

/// Output configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format when --format is not given
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl SpecConfig {
    /// Load configuration from pox-spec.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        // A relative start like "." has no parent to pop, so resolve it first
        let mut current = start_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", start_dir.display()))?;

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.exists() {
                let config = Self::load_file(&config_path)?;
                return Ok(Some((config_path, config)));
            }

            // Move to parent directory
            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SpecConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!("Loaded {} requirement(s) from {}", config.requirements.len(), path.display());
        Ok(config)
    }

    /// Resolve the output format; a command line value wins over the config file
    pub fn output_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output.format).unwrap_or_default()
    }
}
