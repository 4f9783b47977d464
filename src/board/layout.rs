//! Grid layout for the in-memory board.
//!
//! Builds board, column, header, cards-container and card elements for the
//! host's current data and registers them with the coordinator the way a view
//! renderer does after every data change.

use std::collections::BTreeMap;

use egui::{Pos2, Rect, pos2, vec2};
use serde::Deserialize;

use super::host::MemoryHost;
use super::tree::MemoryTree;
use crate::drag_drop::{DragDropManager, ElementId, Entry};

/// Element geometry for one rendered column.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedColumn {
    pub element: ElementId,
    pub header: ElementId,
    pub cards: ElementId,
    /// Card elements with their entry paths, in display order.
    pub card_elements: Vec<(String, ElementId)>,
}

/// Result of laying out the board once.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedBoard {
    pub board: ElementId,
    pub columns: BTreeMap<String, RenderedColumn>,
}

impl RenderedBoard {
    pub fn column(&self, name: &str) -> Option<&RenderedColumn> {
        self.columns.get(name)
    }

    pub fn card(&self, path: &str) -> Option<ElementId> {
        self.columns.values().find_map(|column| {
            column
                .card_elements
                .iter()
                .find(|(card_path, _)| card_path == path)
                .map(|(_, element)| *element)
        })
    }
}

/// Fixed-size grid metrics, in logical pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    pub origin: [f32; 2],
    pub column_width: f32,
    pub column_gap: f32,
    pub header_height: f32,
    pub card_height: f32,
    pub card_gap: f32,
    pub padding: f32,
    /// Height of an empty cards container.
    pub min_cards_height: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            column_width: 272.0,
            column_gap: 12.0,
            header_height: 40.0,
            card_height: 64.0,
            card_gap: 8.0,
            padding: 8.0,
            min_cards_height: 120.0,
        }
    }
}

impl BoardLayout {
    /// Lay out every column of `host` into `tree`, starting a fresh board.
    pub fn render(
        &self,
        host: &MemoryHost,
        tree: &mut MemoryTree,
        manager: &mut DragDropManager,
    ) -> RenderedBoard {
        let prefix = manager.settings().classes.prefix.clone();
        let classes = manager.classes().clone();
        let columns: Vec<(String, Vec<String>)> = host
            .columns()
            .iter()
            .map(|name| {
                let paths = host
                    .column_entries(name)
                    .into_iter()
                    .map(|entry| entry.file.path.clone())
                    .collect();
                (name.clone(), paths)
            })
            .collect();

        let tallest = columns.iter().map(|(_, paths)| paths.len()).max().unwrap_or(0);
        let column_height = self.header_height + self.cards_height(tallest);
        let origin = Pos2::from(self.origin);
        let board_width = self.padding * 2.0
            + columns.len() as f32 * self.column_width
            + columns.len().saturating_sub(1) as f32 * self.column_gap;
        let board_rect = Rect::from_min_size(
            origin,
            vec2(board_width, column_height + self.padding * 2.0),
        );
        let board = tree.add_root(&format!("{prefix}-board"), board_rect);
        manager.init_board(tree, board);

        let mut rendered = BTreeMap::new();
        for (index, (name, paths)) in columns.into_iter().enumerate() {
            let left = origin.x
                + self.padding
                + index as f32 * (self.column_width + self.column_gap);
            let top = origin.y + self.padding;
            let column_rect =
                Rect::from_min_size(pos2(left, top), vec2(self.column_width, column_height));
            let element = tree.add_child(board, &format!("{prefix}-column"), column_rect);
            let header = tree.add_child(
                element,
                &classes.column_header,
                Rect::from_min_size(pos2(left, top), vec2(self.column_width, self.header_height)),
            );
            tree.add_child(
                header,
                &format!("{prefix}-column-title"),
                Rect::from_min_size(
                    pos2(left + self.padding, top + self.padding),
                    vec2(
                        self.column_width - self.padding * 2.0,
                        self.header_height - self.padding * 2.0,
                    ),
                ),
            );
            let cards_top = top + self.header_height;
            let cards = tree.add_child(
                element,
                &format!("{prefix}-cards"),
                Rect::from_min_max(
                    pos2(left, cards_top),
                    pos2(left + self.column_width, top + column_height),
                ),
            );

            manager.make_column_draggable(tree, element, &name, index);
            manager.setup_cards_drop_zone(cards, &name);

            let mut card_elements = Vec::with_capacity(paths.len());
            for (card_index, path) in paths.into_iter().enumerate() {
                let card_top = cards_top
                    + self.padding
                    + card_index as f32 * (self.card_height + self.card_gap);
                let card = tree.add_child(
                    cards,
                    &classes.card,
                    Rect::from_min_size(
                        pos2(left + self.padding, card_top),
                        vec2(self.column_width - self.padding * 2.0, self.card_height),
                    ),
                );
                manager.make_card_draggable(tree, card, Entry::new(path.clone()), &name, card_index);
                card_elements.push((path, card));
            }

            rendered.insert(
                name,
                RenderedColumn {
                    element,
                    header,
                    cards,
                    card_elements,
                },
            );
        }

        RenderedBoard {
            board,
            columns: rendered,
        }
    }

    fn cards_height(&self, cards: usize) -> f32 {
        let stacked = self.padding * 2.0
            + cards as f32 * self.card_height
            + cards.saturating_sub(1) as f32 * self.card_gap;
        stacked.max(self.min_cards_height)
    }
}
