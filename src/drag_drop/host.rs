use thiserror::Error;

use super::state::EntryFile;

/// Severity of a transient user notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Warning,
}

/// Failure reported by a host callback when dispatching a board mutation.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Entry {0} not found")]
    EntryNotFound(EntryFile),
    #[error("Column {0} not found")]
    ColumnNotFound(String),
    #[error("{0}")]
    Rejected(String),
}

/// Data model owner driving the board.
///
/// Queries are read synchronously on every drop. Mutation callbacks should
/// return as soon as the work is dispatched; the coordinator clears its drag
/// state without waiting for the outcome and only logs a returned error.
pub trait BoardHost {
    /// Current authoritative column order.
    fn column_names(&self) -> Vec<String>;
    /// Property whose value decides column membership.
    fn group_by_property(&self) -> Option<String>;
    /// Property whose value decides order within a column.
    fn sort_property(&self) -> Option<String>;

    fn on_column_reorder(&mut self, new_order: Vec<String>) -> Result<(), HostError>;
    /// Set the grouping property of `file` to `new_value` (empty clears it).
    fn on_card_move_to_column(&mut self, file: &EntryFile, new_value: &str)
    -> Result<(), HostError>;
    /// Place `file` at `target_index` within `target_column`; the host derives
    /// the concrete sort value from the neighbouring entries.
    fn on_card_reorder(
        &mut self,
        file: &EntryFile,
        target_column: &str,
        target_index: usize,
    ) -> Result<(), HostError>;

    /// Show a transient notification to the user.
    fn notify(&mut self, message: &str, tone: NoticeTone);
}
