//! Configuration file support for nb2md CLI
//!
//! Loads settings from `_nb2md.toml`, looked up next to the input notebook
//! unless a file is given with `--config`.

use anyhow::{Context, Result};
use nb2md_core::{ConvertOptions, MissingPolicy, ParseOptions, WriterOptions};
use schemars::JsonSchema;
use serde::Deserialize;
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_nb2md.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Code cell configuration
    pub code: CodeConfig,
    /// Captured output configuration
    pub outputs: OutputsConfig,
}

/// Code cell configuration
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CodeConfig {
    /// Language written into `{% highlight <language> %}` (default: "python")
    pub language: Option<String>,
}

/// Captured output configuration
#[derive(Debug, Default, Clone, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct OutputsConfig {
    /// Code cell without an `outputs` list: "empty" or "error" (default: "empty")
    pub missing: Option<String>,
    /// Output without a `text` field: "error", "empty" or "skip" (default: "error")
    pub missing_text: Option<String>,
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_nb2md.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Resolve the configuration into conversion options, applying defaults
    pub fn convert_options(&self) -> Result<ConvertOptions> {
        let mut parse = ParseOptions::default();
        if let Some(value) = &self.outputs.missing {
            parse.missing_outputs = match parse_policy("outputs.missing", value)? {
                MissingPolicy::Skip => anyhow::bail!(
                    "Invalid value for outputs.missing: '{}'. Expected: empty, error",
                    value
                ),
                policy => policy,
            };
        }
        if let Some(value) = &self.outputs.missing_text {
            parse.missing_output_text = parse_policy("outputs.missing_text", value)?;
        }

        let mut writer = WriterOptions::default();
        if let Some(language) = &self.code.language {
            if language.trim().is_empty() {
                anyhow::bail!("Invalid value for code.language: must not be empty");
            }
            writer.highlight_language = language.clone();
        }

        Ok(ConvertOptions { parse, writer })
    }
}

fn parse_policy(key: &str, value: &str) -> Result<MissingPolicy> {
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))
}
