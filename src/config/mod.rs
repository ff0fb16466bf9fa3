use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

const DEFAULT_DIR_NAME: &str = ".cashlog";
const CONFIG_FILE: &str = "config.json";
const STORE_FILE: &str = "movements.log";
const HOME_ENV: &str = "CASHLOG_HOME";

/// Returns the application data directory, defaulting to `~/.cashlog`.
/// `CASHLOG_HOME` overrides it, which is also how tests isolate state.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// User preferences persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Symbol appended to formatted amounts.
    pub currency: String,
    /// Store location override; the default lives in the app data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "$".into(),
            store_file: None,
        }
    }
}

impl Config {
    /// Resolves the store path: an explicit flag wins, then the
    /// configured override, then `<data dir>/movements.log`.
    pub fn store_path(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(path) = flag {
            return path.to_path_buf();
        }
        self.store_file
            .clone()
            .unwrap_or_else(|| app_data_dir().join(STORE_FILE))
    }
}

/// Loads and saves the JSON configuration file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            path: base.join(CONFIG_FILE),
        }
    }

    /// An absent configuration file yields the defaults.
    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, json)?;
        Ok(())
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
