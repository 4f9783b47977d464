use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::app_dirs::AppDirs;

use super::{ConfigError, KanbanSettings};

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn settings_path() -> Result<PathBuf, ConfigError> {
    Ok(AppDirs::resolve()?.settings_file()?)
}

/// Load settings from the app directory, returning defaults if missing.
pub fn load_or_default() -> Result<KanbanSettings, ConfigError> {
    let path = settings_path()?;
    load_settings_from(&path)
}

/// Load settings from a specific TOML file; a missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<KanbanSettings, ConfigError> {
    if !path.exists() {
        debug!("No settings at {}; using defaults", path.display());
        return Ok(KanbanSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: KanbanSettings =
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(settings.normalized())
}

/// Persist settings to the app directory.
pub fn save(settings: &KanbanSettings) -> Result<(), ConfigError> {
    let path = settings_path()?;
    save_settings_to_path(settings, &path)
}

/// Write the TOML settings file atomically to prevent partial writes on crash.
pub fn save_settings_to_path(settings: &KanbanSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::CreateDir {
        path: dir.clone(),
        source,
    })?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut file = NamedTempFile::new_in(&dir).map_err(write_err)?;
    file.write_all(data.as_bytes()).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    file.persist(path)
        .map_err(|err| write_err(err.error))?;
    info!("Saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SETTINGS_FILE_NAME;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, KanbanSettings::default());
    }

    #[test]
    fn save_then_load_keeps_custom_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        let mut settings = KanbanSettings::default();
        settings.board.no_value_column = "Unsorted".into();
        settings.indicator.end_zone_padding = 12.0;
        save_settings_to_path(&settings, &path).unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "[indicator]\ncolumn_inset = -2.0\n").unwrap();
        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.indicator.column_inset, 0.0);
        assert_eq!(loaded.indicator.card_inset, 4.0);
        assert_eq!(loaded.classes.prefix, "bases-kanban");
    }

    #[test]
    fn invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        std::fs::write(&path, "[indicator\n").unwrap();
        let err = load_settings_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains(SETTINGS_FILE_NAME));
    }
}
