//! Where settings and launch logs live.
//!
//! Everything sits under one `.bases-kanban` directory inside the OS config
//! directory. Setting `BASES_KANBAN_CONFIG_HOME` replaces the OS config
//! directory, which is how tests and portable installs relocate it.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use thiserror::Error;

use crate::settings::SETTINGS_FILE_NAME;

/// Directory created under the config base.
pub const APP_DIR_NAME: &str = ".bases-kanban";
/// Environment variable replacing the OS config directory.
pub const CONFIG_HOME_ENV: &str = "BASES_KANBAN_CONFIG_HOME";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found; set {CONFIG_HOME_ENV} to choose one")]
    NoBaseDir,
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolved application directory layout. Directories are created on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
}

impl AppDirs {
    /// Resolve from `BASES_KANBAN_CONFIG_HOME`, falling back to the OS config
    /// directory.
    pub fn resolve() -> Result<Self, AppDirError> {
        let base = std::env::var_os(CONFIG_HOME_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()))
            .ok_or(AppDirError::NoBaseDir)?;
        Ok(Self::under(base))
    }

    /// Layout rooted in `base`, without consulting the environment.
    pub fn under(base: impl Into<PathBuf>) -> Self {
        Self {
            root: base.into().join(APP_DIR_NAME),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Settings file path; the app directory is created if missing.
    pub fn settings_file(&self) -> Result<PathBuf, AppDirError> {
        Ok(ensure_dir(&self.root)?.join(SETTINGS_FILE_NAME))
    }

    /// Launch log directory, created if missing.
    pub fn logs_dir(&self) -> Result<PathBuf, AppDirError> {
        ensure_dir(&self.root.join(LOGS_DIR_NAME)).map(Path::to_path_buf)
    }
}

fn ensure_dir(path: &Path) -> Result<&Path, AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path)
}
