//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{AssetgenError, Result};
use crate::scan::split_glob;
use std::path::Path;
use std::time::Duration;

/// Name of the optional config file at the project root.
pub const CONFIG_FILE_NAME: &str = "assetgen.yaml";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AssetgenError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, falling back to defaults if it does not exist.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| AssetgenError::ConfigError(format!("failed to parse YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `credential_env`, `text_model`, `image_model` must be non-empty
    /// - `drafts_globs` and `spec_globs` must be non-empty, and only the final
    ///   path component of each glob may contain glob syntax
    /// - `image_size` must look like `1024x1024`
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("credential_env", &self.credential_env),
            ("api_base_url", &self.api_base_url),
            ("text_model", &self.text_model),
            ("image_model", &self.image_model),
        ] {
            if value.trim().is_empty() {
                return Err(AssetgenError::ConfigError(format!(
                    "{} must not be empty",
                    key
                )));
            }
        }

        for (key, globs) in [
            ("drafts_globs", &self.drafts_globs),
            ("spec_globs", &self.spec_globs),
        ] {
            if globs.is_empty() {
                return Err(AssetgenError::ConfigError(format!(
                    "{} must list at least one glob",
                    key
                )));
            }
            for glob in globs {
                split_glob(glob).map_err(|e| {
                    AssetgenError::ConfigError(format!("{} entry '{}': {}", key, glob, e))
                })?;
            }
        }

        if self.image_dimensions().is_none() {
            return Err(AssetgenError::ConfigError(format!(
                "image_size must look like 1024x1024 (found '{}')",
                self.image_size
            )));
        }

        Ok(())
    }

    /// Parse `image_size` into `(width, height)`.
    pub fn image_dimensions(&self) -> Option<(u32, u32)> {
        let (w, h) = self.image_size.trim().split_once('x')?;
        let w: u32 = w.parse().ok()?;
        let h: u32 = h.parse().ok()?;
        if w == 0 || h == 0 { None } else { Some((w, h)) }
    }

    /// Request timeout, or `None` to keep the transport default.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }
}
