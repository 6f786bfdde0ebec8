use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::data::LoadOptions;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "CSV_SIEVE_CONFIG";

const DEFAULT_MAX_FILE_BYTES: u64 = 200 * 1024 * 1024;

// ---------------------------------------------------------------------------
// ViewerConfig
// ---------------------------------------------------------------------------

/// Application settings. Every field is optional in the JSON file:
///
/// ```json
/// { "max_file_bytes": 10485760, "delimiter": ";", "na_values": ["NA"] }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Files larger than this are refused before parsing.
    pub max_file_bytes: u64,
    /// Field separator, must be a single ASCII character.
    pub delimiter: char,
    /// Cell contents read as missing besides the empty cell.
    pub na_values: Vec<String>,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            delimiter: ',',
            na_values: Vec::new(),
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl ViewerConfig {
    /// Read the file named by [`CONFIG_ENV`], falling back to defaults when
    /// the variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV) else {
            return Self::default();
        };
        match Self::from_path(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file: {e:#}");
                Self::default()
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(text).context("parsing JSON")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || self.delimiter == '\n' || self.delimiter == '\r' {
            bail!(
                "delimiter {:?} must be a single ASCII character other than a line break",
                self.delimiter
            );
        }
        if self.max_file_bytes == 0 {
            bail!("max_file_bytes must be positive");
        }
        Ok(())
    }

    /// Parser settings derived from this config.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            // validate() guarantees ASCII
            delimiter: self.delimiter as u8,
            na_values: self.na_values.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn partial_override() {
        let config =
            ViewerConfig::from_json(r#"{ "delimiter": ";", "na_values": ["NA", "-"] }"#).unwrap();
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
        let options = config.load_options();
        assert_eq!(options.delimiter, b';');
        assert_eq!(options.na_values, vec!["NA".to_string(), "-".to_string()]);
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let err = ViewerConfig::from_json(r#"{ "delimiter": "é" }"#).unwrap_err();
        assert!(format!("{err:#}").contains("ASCII"));
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(ViewerConfig::from_json(r#"{ "delimter": ";" }"#).is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "max_file_bytes": 1024 }"#).unwrap();
        let config = ViewerConfig::from_path(&path).unwrap();
        assert_eq!(config.max_file_bytes, 1024);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ViewerConfig::from_path(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/config.json"));
    }
}
