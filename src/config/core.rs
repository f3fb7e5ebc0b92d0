use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use std::path::Path;

use super::{SearchConfig, SearchOverrides, TargetHash};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Prefix for environment variable overrides, e.g. `HASHCRACK_MAX_LENGTH=3`
pub const ENV_PREFIX: &str = "HASHCRACK_";

const TARGET_HASH_ENV: &str = "HASHCRACK_TARGET_HASH";

/// Config files picked up from the working directory when no `--config` is given
const LOCAL_CONFIG_FILES: [&str; 4] = [
    "hashcrack.toml",
    "hashcrack.json",
    "hashcrack.yaml",
    "hashcrack.yml",
];

impl SearchConfig {
    /// Load and validate the merged configuration.
    ///
    /// Priority, lowest to highest: embedded defaults, config file,
    /// `HASHCRACK_*` environment variables, CLI overrides.
    pub fn load(custom_config: Option<&str>, overrides: Option<&SearchOverrides>) -> Result<Self> {
        let config: SearchConfig = Self::figment(custom_config, overrides)?
            .extract()
            .context("Failed to parse search configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn figment(custom_config: Option<&str>, overrides: Option<&SearchOverrides>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        if let Some(custom_path) = custom_config {
            tracing::debug!("Loading config file: {custom_path}");
            figment = Self::merge_file(figment, custom_path)?;
        } else {
            for local in LOCAL_CONFIG_FILES {
                if Path::new(local).exists() {
                    tracing::debug!("Loading local config file: {local}");
                    figment = Self::merge_file(figment, local)?;
                }
            }
        }

        // Environment variables override files. The target is always hex, even
        // when every digit is decimal.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["target_hash"]));
        if let Ok(raw) = std::env::var(TARGET_HASH_ENV) {
            let target: TargetHash = raw
                .parse()
                .with_context(|| format!("Invalid {TARGET_HASH_ENV}"))?;
            figment = figment.merge(Serialized::default("target_hash", target));
        }

        // CLI flags always win
        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    fn merge_file(figment: Figment, path: &str) -> Result<Figment> {
        if !Path::new(path).exists() {
            bail!("Config file not found: {path}");
        }

        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let figment = match extension.as_deref() {
            Some("toml") => figment.merge(Toml::file(path)),
            Some("json") => figment.merge(Json::file(path)),
            Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
            _ => bail!("Unsupported config format for {path}: expected .toml, .json, .yaml or .yml"),
        };
        Ok(figment)
    }
}
