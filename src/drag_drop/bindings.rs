//! Element registration and event routing.
//!
//! Renderers register board elements once per render; the host then feeds
//! every native drag event through [`DragDropManager::dispatch`], which
//! bubbles it from the event target up the tree the way DOM listeners fire.

use tracing::{debug, trace};

use super::DragDropManager;
use super::event::{DragEvent, DragEventKind};
use super::host::BoardHost;
use super::state::Entry;
use super::tree::{BoardTree, ElementId};

/// Role an element plays in drag/drop.
#[derive(Clone, Debug, PartialEq)]
pub(super) enum Binding {
    /// Header used as the drag handle of `column`.
    ColumnHandle {
        column: ElementId,
        column_name: String,
        index: usize,
    },
    /// Column element accepting column drops.
    Column { column_name: String },
    Card {
        entry: Entry,
        column_name: String,
        card_index: usize,
    },
    /// Cards container accepting end-of-column card drops.
    CardsZone { column_name: String },
}

impl DragDropManager {
    /// Make a column reorderable by dragging its header.
    ///
    /// Columns without a header element are left untouched.
    pub fn make_column_draggable(
        &mut self,
        tree: &mut dyn BoardTree,
        column_el: ElementId,
        column_name: &str,
        index: usize,
    ) {
        let Some(header) = tree.query_selector(column_el, &self.classes.column_header) else {
            debug!(column = column_name, "column has no header; not draggable");
            return;
        };
        tree.set_attribute(header, "draggable", "true");
        tree.add_class(header, &self.classes.draggable);
        self.bindings.insert(
            header,
            Binding::ColumnHandle {
                column: column_el,
                column_name: column_name.to_string(),
                index,
            },
        );
        self.bindings.insert(
            column_el,
            Binding::Column {
                column_name: column_name.to_string(),
            },
        );
    }

    pub fn make_card_draggable(
        &mut self,
        tree: &mut dyn BoardTree,
        card_el: ElementId,
        entry: Entry,
        column_name: &str,
        card_index: usize,
    ) {
        tree.set_attribute(card_el, "draggable", "true");
        tree.add_class(card_el, &self.classes.draggable);
        self.bindings.insert(
            card_el,
            Binding::Card {
                entry,
                column_name: column_name.to_string(),
                card_index,
            },
        );
    }

    /// Accept card drops on the empty part of a column's cards container.
    pub fn setup_cards_drop_zone(&mut self, cards_el: ElementId, column_name: &str) {
        self.bindings.insert(
            cards_el,
            Binding::CardsZone {
                column_name: column_name.to_string(),
            },
        );
    }

    /// Forget an element, e.g. when the renderer discards it.
    pub fn unregister(&mut self, element: ElementId) {
        self.bindings.remove(&element);
    }

    /// Route a native drag event through the registered elements, starting at
    /// `event.target` and bubbling towards the root until a handler stops
    /// propagation.
    pub fn dispatch(
        &mut self,
        tree: &mut dyn BoardTree,
        host: &mut dyn BoardHost,
        event: &mut DragEvent,
    ) {
        trace!(kind = ?event.kind, target = ?event.target, client = ?event.client, "drag event");
        let mut current = Some(event.target);
        while let Some(element) = current {
            if let Some(binding) = self.bindings.get(&element).cloned() {
                event.current_target = Some(element);
                self.handle_bound_event(tree, host, event, element, binding);
                if event.is_propagation_stopped() {
                    break;
                }
            }
            current = tree.parent(element);
        }
        event.current_target = None;
    }

    fn handle_bound_event(
        &mut self,
        tree: &mut dyn BoardTree,
        host: &mut dyn BoardHost,
        event: &mut DragEvent,
        element: ElementId,
        binding: Binding,
    ) {
        match (event.kind, binding) {
            (
                DragEventKind::DragStart,
                Binding::ColumnHandle {
                    column,
                    column_name,
                    index,
                },
            ) => self.handle_column_drag_start(tree, event, column, &column_name, index),
            (DragEventKind::DragEnd, Binding::ColumnHandle { .. } | Binding::Card { .. }) => {
                self.end_drag(tree)
            }
            (DragEventKind::DragOver, Binding::Column { column_name }) => {
                self.handle_column_drag_over(tree, event, element, &column_name)
            }
            (DragEventKind::Drop, Binding::Column { column_name }) => {
                self.handle_column_drop(tree, host, event, element, &column_name)
            }
            (
                DragEventKind::DragLeave,
                Binding::Column { .. } | Binding::CardsZone { .. },
            ) => self.handle_drag_leave(tree, element, event.related_target),
            (
                DragEventKind::DragStart,
                Binding::Card {
                    entry,
                    column_name,
                    card_index,
                },
            ) => {
                self.handle_card_drag_start(tree, event, element, entry, &column_name, card_index)
            }
            (DragEventKind::DragOver, Binding::Card { .. }) => {
                self.handle_card_drag_over(tree, event, element)
            }
            (
                DragEventKind::Drop,
                Binding::Card {
                    column_name,
                    card_index,
                    ..
                },
            ) => self.handle_card_drop(tree, host, event, element, &column_name, card_index),
            (DragEventKind::DragOver, Binding::CardsZone { .. }) => {
                self.handle_cards_container_drag_over(tree, event, element)
            }
            (DragEventKind::Drop, Binding::CardsZone { column_name }) => {
                self.handle_cards_container_drop(tree, host, event, element, &column_name)
            }
            _ => {}
        }
    }
}
