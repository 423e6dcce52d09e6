use crate::error::Result;
use crate::pack::{ExcludeRules, PackOptions, DEFAULT_EXTENSION, DEFAULT_PLACEHOLDER};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub mod loader;

pub use loader::ConfigLoader;

/// Get the per-user directory holding the global `config.toml`
pub fn get_global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "instpack", "instpack").map(|dirs| dirs.config_dir().to_path_buf())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackConfig {
    /// Entry names or glob patterns treated as drivers rather than instances
    pub exclude: Vec<String>,
    pub placeholder: i64,
    pub extension: String,
    pub log_level: Option<String>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            exclude: vec![crate::pack::exclude::DEFAULT_DRIVER_NAME.to_string()],
            placeholder: DEFAULT_PLACEHOLDER,
            extension: DEFAULT_EXTENSION.to_string(),
            log_level: None,
        }
    }
}

impl PackConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_with(|key| std::env::var(key).ok());
    }

    /// Apply `INSTPACK_*` overrides read through `lookup`.
    pub fn merge_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(exclude) = lookup("INSTPACK_EXCLUDE") {
            self.exclude = exclude
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(placeholder) = lookup("INSTPACK_PLACEHOLDER") {
            match placeholder.trim().parse::<i64>() {
                Ok(value) => self.placeholder = value,
                Err(_) => warn!(
                    "Ignoring INSTPACK_PLACEHOLDER='{}': not an integer",
                    placeholder
                ),
            }
        }

        if let Some(log_level) = lookup("INSTPACK_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }
    }

    pub fn exclude_rules(&self) -> Result<ExcludeRules> {
        ExcludeRules::from_patterns(&self.exclude)
    }

    pub fn pack_options(&self, root: impl Into<PathBuf>) -> Result<PackOptions> {
        Ok(PackOptions::new(root)
            .with_exclude(self.exclude_rules()?)
            .with_placeholder(self.placeholder)
            .with_extension(self.extension.clone()))
    }
}
