use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{LedgerError, Result};
use crate::store::Store;

pub const DEFAULT_DATA_PATH: &str = "data/maintenance.csv";
pub const DATA_PATH_ENV: &str = "SHOPLOG_DATA";

pub struct Config {
    pub data_path: PathBuf,
}

/// Contents of the optional config file (~/.config/shoplog/config.toml).
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data_path: Option<PathBuf>,
}

impl FileConfig {
    /// Load the config file at `path`. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LedgerError::io(path, e)),
        };

        let parsed = toml::from_str(&text)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Ok(Some(parsed))
    }
}

pub fn config_file_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "shoplog")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let env = std::env::var_os(DATA_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let data_path = resolve_data_path(cli.data.clone(), env, || match config_file_path() {
            Some(path) => {
                log::debug!("looking for config at {}", path.display());
                FileConfig::load(&path)
            }
            None => Ok(None),
        })?;

        Ok(Config { data_path })
    }

    pub fn store(&self) -> Store {
        Store::new(&self.data_path)
    }
}

/// Flag, then environment, then config file, then the default. The config
/// file is only read when neither the flag nor the environment is set.
pub fn resolve_data_path(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    load_file: impl FnOnce() -> Result<Option<FileConfig>>,
) -> Result<PathBuf> {
    if let Some(path) = flag.or(env) {
        return Ok(path);
    }

    let from_file = load_file()?.and_then(|c| c.data_path);
    Ok(from_file.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)))
}
