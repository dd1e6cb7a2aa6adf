use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::ConfigError,
    utils::{paths, persistence},
};

/// User preferences stored in `config.json` under the application directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Expense file location; `None` means `<app dir>/expenses.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub currency_symbol: String,
    /// Rename an unreadable expense file instead of letting the next save overwrite it.
    pub preserve_corrupt: bool,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            currency_symbol: "$".into(),
            preserve_corrupt: true,
            color: true,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = paths::config_file_in(&base);
        Self { base, path }
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        persistence::write_atomic(&self.path, json.as_bytes())?;
        Ok(())
    }

    /// Resolves the expense file: `EXPENSE_TRACKER_FILE`, then the configured
    /// path (relative paths are taken from the app directory), then the default.
    pub fn data_file(&self, config: &Config) -> PathBuf {
        if let Some(path) = paths::data_file_override() {
            return path;
        }
        match &config.data_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => paths::data_file_in(&self.base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = manager.load().expect("load config");
        assert_eq!(config, Config::default());
        assert_eq!(config.currency_symbol, "$");
        assert!(config.preserve_corrupt);
    }

    #[test]
    fn save_then_load_roundtrip() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().join("app"));
        let config = Config {
            data_file: Some(PathBuf::from("ledger.json")),
            currency_symbol: "€".into(),
            preserve_corrupt: false,
            color: false,
        };
        manager.save(&config).expect("save config");
        assert!(manager.path().exists());
        assert_eq!(manager.load().expect("load config"), config);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), r#"{ "color": false }"#).expect("write config");
        let config = manager.load().expect("load config");
        assert!(!config.color);
        assert_eq!(config.currency_symbol, "$");
    }

    #[test]
    fn relative_data_file_resolves_against_base() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        let config = Config {
            data_file: Some(PathBuf::from("custom.json")),
            ..Config::default()
        };
        if paths::data_file_override().is_none() {
            assert_eq!(manager.data_file(&config), temp.path().join("custom.json"));
            assert_eq!(
                manager.data_file(&Config::default()),
                temp.path().join("expenses.json")
            );
        }
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf());
        fs::write(manager.path(), "{").expect("write config");
        assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
    }
}
