use tracing::{debug, info};

use super::DragDropManager;
use super::state::{CardDrag, ColumnDrag, DragState, Entry};
use super::tree::{BoardTree, ElementId};

impl DragDropManager {
    /// Attach the coordinator to a board element and create its indicator.
    pub fn init_board(&mut self, tree: &mut dyn BoardTree, board: ElementId) {
        self.board = Some(board);
        self.create_drop_indicator(tree);
        info!(?board, "drag/drop initialized for board");
    }

    /// Tear down when the board view unloads.
    pub fn destroy(&mut self, tree: &mut dyn BoardTree) {
        if let Some(indicator) = self.indicator.take() {
            tree.remove_element(indicator.element());
        }
        self.board = None;
        self.bindings.clear();
        self.pending_dragging = None;
        self.state = DragState::Idle;
        debug!("drag/drop destroyed");
    }

    /// Start dragging a column. `element` is the column element.
    pub fn begin_column_drag(
        &mut self,
        tree: &mut dyn BoardTree,
        column_name: &str,
        index: usize,
        element: ElementId,
    ) {
        self.replace_state(tree, DragState::DraggingColumn(ColumnDrag {
            column_name: column_name.to_string(),
            source_index: index,
            element,
        }));
        self.pending_dragging = Some(element);
        debug!(column = column_name, index, "column drag started");
    }

    /// Start dragging a card out of `column_name`.
    pub fn begin_card_drag(
        &mut self,
        tree: &mut dyn BoardTree,
        entry: Entry,
        column_name: &str,
        index: usize,
        element: ElementId,
    ) {
        debug!(entry = %entry.file, column = column_name, index, "card drag started");
        self.replace_state(tree, DragState::DraggingCard(CardDrag {
            entry,
            source_column: column_name.to_string(),
            source_index: index,
            element,
        }));
        self.pending_dragging = Some(element);
    }

    /// Apply work deferred to the next animation frame.
    ///
    /// The "dragging" marker is added here rather than at drag start so the
    /// platform's drag image is captured from the unmarked element.
    pub fn on_animation_frame(&mut self, tree: &mut dyn BoardTree) {
        let Some(element) = self.pending_dragging.take() else {
            return;
        };
        if self.state.source_element() == Some(element) {
            tree.add_class(element, &self.classes.dragging);
        }
    }

    /// Clear every trace of the current drag. Safe to call when idle.
    pub fn end_drag(&mut self, tree: &mut dyn BoardTree) {
        if let Some(element) = self.state.source_element() {
            tree.remove_class(element, &self.classes.dragging);
        }
        if let Some(board) = self.board {
            for class in [&self.classes.drag_over, &self.classes.drop_zone_active] {
                for element in tree.query_selector_all(board, class) {
                    tree.remove_class(element, class);
                }
            }
        }
        self.hide_drop_indicator();
        self.pending_dragging = None;
        self.state = DragState::Idle;
    }

    /// Leaving a drop target. Moves into the target's own children are ignored.
    pub(super) fn handle_drag_leave(
        &mut self,
        tree: &mut dyn BoardTree,
        element: ElementId,
        related_target: Option<ElementId>,
    ) {
        if let Some(related) = related_target
            && tree.contains(element, related)
        {
            return;
        }
        tree.remove_class(element, &self.classes.drag_over);
        tree.remove_class(element, &self.classes.drop_zone_active);
        self.hide_drop_indicator();
    }

    /// Swap in a new drag. A stale source loses its "dragging" marker, and the
    /// previous drag's mutation no longer counts as the last one.
    fn replace_state(&mut self, tree: &mut dyn BoardTree, next: DragState) {
        if let Some(stale) = self.state.source_element() {
            debug!(previous = ?self.state, "replacing stale drag state");
            tree.remove_class(stale, &self.classes.dragging);
        }
        self.last_mutation = None;
        self.state = next;
    }
}
