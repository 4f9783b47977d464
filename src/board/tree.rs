use std::collections::{BTreeMap, BTreeSet};

use egui::Rect;

use crate::drag_drop::{BoardTree, ElementId};

#[derive(Clone, Debug)]
struct Node {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    rect: Rect,
}

impl Node {
    fn with_class(class: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::from([class.to_string()]),
            attributes: BTreeMap::new(),
            rect: Rect::NOTHING,
        }
    }
}

/// Element tree kept entirely in memory, with fixed bounding rectangles.
#[derive(Clone, Debug, Default)]
pub struct MemoryTree {
    nodes: BTreeMap<ElementId, Node>,
    next_id: u64,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parentless element with geometry.
    pub fn add_root(&mut self, class: &str, rect: Rect) -> ElementId {
        let id = self.create_element(class);
        self.set_rect(id, rect);
        id
    }

    pub fn add_child(&mut self, parent: ElementId, class: &str, rect: Rect) -> ElementId {
        let id = self.add_root(class, rect);
        self.append_child(parent, id);
        id
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    pub fn exists(&self, element: ElementId) -> bool {
        self.nodes.contains_key(&element)
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|node| node.attributes.get(name))
            .map(String::as_str)
    }

    /// Every element in the tree carrying `class`, attached or not.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.classes.contains(class))
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.nodes.get_mut(&element).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.retain(|child| *child != element);
        }
    }
}

impl BoardTree for MemoryTree {
    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.nodes
            .get(&element)
            .map(|node| node.rect)
            .unwrap_or(Rect::NOTHING)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|node| node.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(&element)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.classes.remove(class);
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn create_element(&mut self, class: &str) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.nodes.insert(id, Node::with_class(class));
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove_element(&mut self, element: ElementId) {
        self.detach(element);
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(&id) {
                stack.extend(node.children);
            }
        }
    }
}
