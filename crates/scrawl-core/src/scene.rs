//! Scene store: the ordered element list plus selection and text-edit focus.

use crate::elements::{Element, ElementId, TextField};
use serde::{Deserialize, Serialize};

/// Text-edit focus on one field of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFocus {
    pub id: ElementId,
    pub field: TextField,
    /// Current value of the edit box.
    pub buffer: String,
}

/// All placed elements, back to front, with the interaction state attached to them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
    focus: Option<TextFocus>,
}

impl SceneStore {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top of the z-order.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id();
        log::debug!("Adding {} {}", element.element_type(), id);
        self.elements.push(element);
        id
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Apply `f` to the element with `id`. Returns false if there is none.
    pub fn update(&mut self, id: ElementId, f: impl FnOnce(&mut Element)) -> bool {
        match self.get_mut(id) {
            Some(element) => {
                f(element);
                true
            }
            None => false,
        }
    }

    /// Topmost element.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Replace the topmost element in place, keeping its slot.
    ///
    /// The replacement must carry the same id; otherwise nothing changes.
    pub fn replace_last(&mut self, element: Element) -> bool {
        match self.elements.last_mut() {
            Some(last) if last.id() == element.id() => {
                *last = element;
                true
            }
            _ => false,
        }
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Select an element, replacing the previous selection.
    pub fn select(&mut self, id: ElementId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Currently selected element id.
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Give text-edit focus to a field, seeding the buffer with its current value.
    ///
    /// Any previous focus is replaced.
    pub fn begin_text_edit(&mut self, id: ElementId, field: TextField) -> bool {
        let Some(current) = self.get(id).and_then(|e| e.text_field(field)) else {
            return false;
        };
        self.focus = Some(TextFocus {
            id,
            field,
            buffer: current.to_string(),
        });
        true
    }

    /// Update the buffer and write it through to the focused element.
    pub fn set_text_value(&mut self, value: &str) -> bool {
        let Some(focus) = self.focus.as_mut() else {
            return false;
        };
        focus.buffer = value.to_string();
        let (id, field) = (focus.id, focus.field);
        self.update(id, |element| {
            element.set_text_field(field, value);
        })
    }

    /// Drop text-edit focus. The element keeps whatever was typed.
    pub fn end_text_edit(&mut self) -> Option<TextFocus> {
        self.focus.take()
    }

    pub fn focus(&self) -> Option<&TextFocus> {
        self.focus.as_ref()
    }

    /// Element under text-edit focus.
    pub fn editing_text_id(&self) -> Option<ElementId> {
        self.focus.as_ref().map(|f| f.id)
    }

    /// Current edit buffer, empty when nothing is focused.
    pub fn text_value(&self) -> &str {
        self.focus.as_ref().map_or("", |f| f.buffer.as_str())
    }
}
