use super::DragDropManager;
use super::drop_processing::CardDrop;
use super::event::{DragEvent, DropEffect};
use super::host::BoardHost;
use super::state::{DragState, Entry};
use super::tree::{BoardTree, ElementId};

impl DragDropManager {
    pub(super) fn handle_card_drag_start(
        &mut self,
        tree: &mut dyn BoardTree,
        event: &mut DragEvent,
        card_el: ElementId,
        entry: Entry,
        column_name: &str,
        card_index: usize,
    ) {
        if event.data_transfer.is_none() {
            return;
        }
        // Keep the enclosing column from starting a column drag.
        event.stop_propagation();
        if let Some(transfer) = event.data_transfer.as_mut() {
            transfer.effect_allowed = DropEffect::Move;
            transfer.set_data("text/plain", format!("card:{}", entry.file.path));
        }
        self.begin_card_drag(tree, entry, column_name, card_index, card_el);
    }

    pub(super) fn handle_card_drag_over(
        &mut self,
        tree: &mut dyn BoardTree,
        event: &mut DragEvent,
        card_el: ElementId,
    ) {
        if !matches!(self.state, DragState::DraggingCard(_)) {
            return;
        }
        event.prevent_default();
        event.stop_propagation();
        event.set_drop_effect(DropEffect::Move);

        let rect = tree.bounding_rect(card_el);
        let is_above = event.client.y < rect.center().y;
        self.show_card_drop_indicator(tree, card_el, is_above);
    }

    pub(super) fn handle_card_drop(
        &mut self,
        tree: &mut dyn BoardTree,
        host: &mut dyn BoardHost,
        event: &mut DragEvent,
        card_el: ElementId,
        target_column: &str,
        target_card_index: usize,
    ) {
        event.prevent_default();
        event.stop_propagation();

        let DragState::DraggingCard(drag) = &self.state else {
            return;
        };
        let drag = drag.clone();
        let rect = tree.bounding_rect(card_el);
        let is_above = event.client.y < rect.center().y;
        let insert_index = target_card_index + usize::from(!is_above);

        self.process_card_drop(
            host,
            CardDrop {
                entry: &drag.entry,
                source_column: &drag.source_column,
                target_column,
                source_index: drag.source_index,
                target_index: insert_index,
            },
        );
        self.end_drag(tree);
    }

    pub(super) fn handle_cards_container_drag_over(
        &mut self,
        tree: &mut dyn BoardTree,
        event: &mut DragEvent,
        cards_el: ElementId,
    ) {
        if !matches!(self.state, DragState::DraggingCard(_)) {
            return;
        }
        event.prevent_default();
        event.set_drop_effect(DropEffect::Move);

        if tree.closest(event.target, &self.classes.card).is_none() {
            tree.add_class(cards_el, &self.classes.drop_zone_active);
            self.show_card_drop_indicator_at_end(tree, cards_el);
        }
    }

    pub(super) fn handle_cards_container_drop(
        &mut self,
        tree: &mut dyn BoardTree,
        host: &mut dyn BoardHost,
        event: &mut DragEvent,
        cards_el: ElementId,
        target_column: &str,
    ) {
        event.prevent_default();

        let DragState::DraggingCard(drag) = &self.state else {
            return;
        };
        let drag = drag.clone();
        let card_count = tree.query_selector_all(cards_el, &self.classes.card).len();

        self.process_card_drop(
            host,
            CardDrop {
                entry: &drag.entry,
                source_column: &drag.source_column,
                target_column,
                source_index: drag.source_index,
                target_index: card_count,
            },
        );
        self.end_drag(tree);
    }
}
