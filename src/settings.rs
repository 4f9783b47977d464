//! Board settings persisted as TOML under the application directory.

mod errors;
mod io;

pub use errors::ConfigError;
pub use io::{load_or_default, load_settings_from, save, save_settings_to_path, settings_path};

use serde::{Deserialize, Serialize};

/// Name of the TOML settings file inside the app directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Plugin-level settings for the kanban drag/drop layer.
///
/// Config keys (TOML): `classes`, `indicator`, `board`, `logging`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KanbanSettings {
    #[serde(default)]
    pub classes: ClassSettings,
    #[serde(default)]
    pub indicator: IndicatorSettings,
    #[serde(default)]
    pub board: BoardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl KanbanSettings {
    pub(crate) fn normalized(mut self) -> Self {
        self.indicator.column_inset = self.indicator.column_inset.max(0.0);
        self.indicator.card_inset = self.indicator.card_inset.max(0.0);
        self.indicator.end_zone_padding = self.indicator.end_zone_padding.max(0.0);
        if self.classes.prefix.trim().is_empty() {
            self.classes.prefix = default_class_prefix();
        }
        self.logging.keep_files = self.logging.keep_files.max(1);
        if self.logging.level.trim().is_empty() {
            self.logging.level = default_log_level();
        }
        self
    }
}

/// Class naming used for element markers.
///
/// Config keys: `prefix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSettings {
    #[serde(default = "default_class_prefix")]
    pub prefix: String,
}

impl Default for ClassSettings {
    fn default() -> Self {
        Self {
            prefix: default_class_prefix(),
        }
    }
}

/// Drop indicator placement offsets, in logical pixels.
///
/// Config keys: `column_inset`, `card_inset`, `end_zone_padding`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSettings {
    /// Outward offset of the vertical bar shown between columns.
    #[serde(default = "default_inset")]
    pub column_inset: f32,
    /// Gap between a card edge and the horizontal bar.
    #[serde(default = "default_inset")]
    pub card_inset: f32,
    /// Padding of the end-of-column indicator inside a cards container.
    #[serde(default = "default_end_zone_padding")]
    pub end_zone_padding: f32,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            column_inset: default_inset(),
            card_inset: default_inset(),
            end_zone_padding: default_end_zone_padding(),
        }
    }
}

/// Board-level naming.
///
/// Config keys: `no_value_column`, `missing_group_by_notice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSettings {
    /// Column name that stands for "property has no value".
    #[serde(default = "default_no_value_column")]
    pub no_value_column: String,
    #[serde(default = "default_missing_group_by_notice")]
    pub missing_group_by_notice: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            no_value_column: default_no_value_column(),
            missing_group_by_notice: default_missing_group_by_notice(),
        }
    }
}

/// Diagnostics output.
///
/// Config keys: `level`, `write_file`, `keep_files`. `RUST_LOG` overrides
/// `level` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `bases_kanban=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write a per-launch file under the app `logs/` directory.
    #[serde(default = "default_true")]
    pub write_file: bool,
    /// Launch logs retained, including the current one.
    #[serde(default = "default_keep_files")]
    pub keep_files: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            write_file: default_true(),
            keep_files: default_keep_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_keep_files() -> usize {
    10
}

fn default_class_prefix() -> String {
    "bases-kanban".to_string()
}

fn default_inset() -> f32 {
    4.0
}

fn default_end_zone_padding() -> f32 {
    8.0
}

fn default_no_value_column() -> String {
    "(No value)".to_string()
}

fn default_missing_group_by_notice() -> String {
    "Could not detect groupBy property for drag & drop".to_string()
}
