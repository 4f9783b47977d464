use egui::Rect;

/// Opaque handle to an element in the host's render tree.
///
/// The coordinator never owns the element behind a handle; it only uses it to
/// read geometry and toggle class markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// DOM-like capabilities the host renderer exposes to the coordinator.
///
/// Implementors only need the primitive accessors; tree queries are provided
/// on top of `parent` and `children`.
pub trait BoardTree {
    /// Bounding rectangle of the element in client coordinates.
    fn bounding_rect(&self, element: ElementId) -> Rect;
    fn parent(&self, element: ElementId) -> Option<ElementId>;
    /// Direct children in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;
    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);
    /// Create a detached element carrying the given class.
    fn create_element(&mut self, class: &str) -> ElementId;
    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(&mut self, parent: ElementId, child: ElementId);
    /// Detach and forget the element.
    fn remove_element(&mut self, element: ElementId);

    /// True when `node` is `ancestor` or lives somewhere beneath it.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(element) = current {
            if element == ancestor {
                return true;
            }
            current = self.parent(element);
        }
        false
    }

    /// Nearest element, starting at `element` itself, that carries `class`.
    fn closest(&self, element: ElementId, class: &str) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// All descendants of `root` (excluding `root`) carrying `class`, in
    /// document order.
    fn query_selector_all(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            if self.has_class(element, class) {
                found.push(element);
            }
            stack.extend(self.children(element).into_iter().rev());
        }
        found
    }

    fn query_selector(&self, root: ElementId, class: &str) -> Option<ElementId> {
        self.query_selector_all(root, class).into_iter().next()
    }
}
