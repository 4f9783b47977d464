//! Drag/drop coordinator for kanban boards.
//!
//! The coordinator tracks one drag at a time (a column or a card), resolves
//! drop positions from pointer geometry against the host's render tree, keeps
//! a single drop indicator in place, and turns a completed drop into one
//! [`BoardMutation`] handed to the [`BoardHost`].

mod bindings;
mod card_handlers;
mod classes;
mod column_handlers;
mod drop_processing;
mod event;
mod host;
mod indicator;
mod lifecycle;
mod state;
mod tree;

#[cfg(test)]
mod tests;

pub use classes::ClassNames;
pub use drop_processing::{
    BoardMutation, CardDrop, DropRejection, reorder_columns, resolve_card_drop,
};
pub use event::{DataTransfer, DragEvent, DragEventKind, DropEffect};
pub use host::{BoardHost, HostError, NoticeTone};
pub use indicator::{DropIndicator, Extent, IndicatorOrientation};
pub use state::{CardDrag, ColumnDrag, DragState, Entry, EntryFile};
pub use tree::{BoardTree, ElementId};

use std::collections::HashMap;

use bindings::Binding;

use crate::settings::KanbanSettings;

/// Owns the drag lifecycle for one board view.
#[derive(Debug)]
pub struct DragDropManager {
    settings: KanbanSettings,
    classes: ClassNames,
    state: DragState,
    board: Option<ElementId>,
    indicator: Option<DropIndicator>,
    bindings: HashMap<ElementId, Binding>,
    /// Element waiting for its "dragging" marker on the next frame.
    pending_dragging: Option<ElementId>,
    last_mutation: Option<BoardMutation>,
}

impl DragDropManager {
    pub fn new(settings: KanbanSettings) -> Self {
        let classes = ClassNames::from(&settings.classes);
        Self {
            settings,
            classes,
            state: DragState::Idle,
            board: None,
            indicator: None,
            bindings: HashMap::new(),
            pending_dragging: None,
            last_mutation: None,
        }
    }

    pub fn settings(&self) -> &KanbanSettings {
        &self.settings
    }

    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn board(&self) -> Option<ElementId> {
        self.board
    }

    pub fn indicator(&self) -> Option<&DropIndicator> {
        self.indicator.as_ref()
    }

    /// Mutation handed to the host by the current or most recent drag.
    pub fn last_mutation(&self) -> Option<&BoardMutation> {
        self.last_mutation.as_ref()
    }
}

impl Default for DragDropManager {
    fn default() -> Self {
        Self::new(KanbanSettings::default())
    }
}
