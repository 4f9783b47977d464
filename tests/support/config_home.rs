//! Isolated config home for integration tests.

use std::ffi::OsString;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use bases_kanban::app_dirs::{AppDirs, CONFIG_HOME_ENV};
use tempfile::TempDir;

/// Serializes every test that touches the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Points `BASES_KANBAN_CONFIG_HOME` at a fresh temp directory while alive.
///
/// Dropping the guard restores the previous value before the directory is
/// deleted and the lock released.
pub struct TempConfigHome {
    dirs: AppDirs,
    saved: Option<OsString>,
    home: TempDir,
    _lock: MutexGuard<'static, ()>,
}

impl TempConfigHome {
    pub fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let home = tempfile::tempdir().expect("create config home");
        let saved = std::env::var_os(CONFIG_HOME_ENV);
        // SAFETY: ENV_LOCK is held for the guard's lifetime.
        unsafe { std::env::set_var(CONFIG_HOME_ENV, home.path()) };
        let dirs = AppDirs::resolve().expect("resolve app dirs");
        assert_eq!(dirs, AppDirs::under(home.path()));
        Self {
            dirs,
            saved,
            home,
            _lock: lock,
        }
    }

    pub fn path(&self) -> &Path {
        self.home.path()
    }

    pub fn dirs(&self) -> &AppDirs {
        &self.dirs
    }

    /// Write raw settings text where `settings::load_or_default` looks.
    pub fn write_settings(&self, text: &str) {
        let path = self.dirs.settings_file().expect("settings file path");
        std::fs::write(path, text).expect("write settings");
    }
}

impl Drop for TempConfigHome {
    fn drop(&mut self) {
        // SAFETY: ENV_LOCK is still held; it is released after this body.
        match self.saved.take() {
            Some(value) => unsafe { std::env::set_var(CONFIG_HOME_ENV, value) },
            None => unsafe { std::env::remove_var(CONFIG_HOME_ENV) },
        }
    }
}
