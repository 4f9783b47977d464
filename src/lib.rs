//! Drag-and-drop reordering for kanban boards over entry data sources.
/// Application directory resolution.
pub mod app_dirs;
/// In-memory board host used by the replay tool and tests.
pub mod board;
/// The drag/drop coordinator.
pub mod drag_drop;
/// Tracing subscriber setup.
pub mod logging;
/// Scripted drag sessions.
pub mod scenario;
/// Persisted board settings.
pub mod settings;
