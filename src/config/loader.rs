use super::{get_global_config_dir, PackConfig};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Layers config sources over the built-in defaults.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: PackConfig,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current config with the contents of `path`, which must exist.
    pub fn load_file(mut self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(self)
    }

    /// Load the per-user config file if one exists.
    pub fn load_global(self) -> Result<Self> {
        match get_global_config_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => self.load_file(&path),
            _ => Ok(self),
        }
    }

    pub fn with_env(mut self) -> Self {
        self.config.merge_env_vars();
        self
    }

    pub fn into_config(self) -> PackConfig {
        self.config
    }
}

/// Resolve configuration: an explicit file wins over the global one, and the
/// environment wins over both.
pub fn load(explicit: Option<&Path>) -> Result<PackConfig> {
    let loader = match explicit {
        Some(path) => ConfigLoader::new().load_file(path)?,
        None => ConfigLoader::new().load_global()?,
    };
    Ok(loader.with_env().into_config())
}
