use std::fmt;

use super::tree::ElementId;

/// Stable identity of the record behind a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryFile {
    pub path: String,
}

impl EntryFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl fmt::Display for EntryFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// A record rendered as a card on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub file: EntryFile,
}

impl Entry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            file: EntryFile::new(path),
        }
    }
}

/// A column being dragged by its header.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnDrag {
    pub column_name: String,
    /// Position in the column order when the drag started.
    pub source_index: usize,
    /// The column element (not the header handle).
    pub element: ElementId,
}

/// A card being dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct CardDrag {
    pub entry: Entry,
    pub source_column: String,
    /// Position of the card within its column when the drag started.
    pub source_index: usize,
    pub element: ElementId,
}

/// Drag lifecycle. Exactly one value exists per coordinator.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    DraggingColumn(ColumnDrag),
    DraggingCard(CardDrag),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }

    /// Element carrying the "dragging" marker for the active drag.
    pub fn source_element(&self) -> Option<ElementId> {
        match self {
            DragState::Idle => None,
            DragState::DraggingColumn(drag) => Some(drag.element),
            DragState::DraggingCard(drag) => Some(drag.element),
        }
    }

    pub fn source_column(&self) -> Option<&str> {
        match self {
            DragState::Idle => None,
            DragState::DraggingColumn(drag) => Some(&drag.column_name),
            DragState::DraggingCard(drag) => Some(&drag.source_column),
        }
    }
}
