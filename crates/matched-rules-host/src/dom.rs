//! A small element tree for selector matching.
//!
//! Elements live in a [`SlotMap`] owned by the [`Document`] and are addressed
//! by [`ElementId`]. `id` and `class` are ordinary attributes, as in the DOM.

use slotmap::{SlotMap, new_key_type};

use crate::{Error, Result};

new_key_type! {
    /// A handle to an element in a [`Document`].
    ///
    /// Handles stay valid until the document is dropped.
    pub struct ElementId;
}

/// Interaction state consulted by dynamic pseudo-classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementState {
    /// `:hover`
    pub hovered: bool,
    /// `:active`
    pub active: bool,
    /// `:focus`
    pub focused: bool,
    /// `:checked`
    pub checked: bool,
    /// `:disabled` (and not `:enabled`)
    pub disabled: bool,
}

/// An element: a tag name, attributes and interaction state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    /// Interaction state.
    pub state: ElementState,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    /// Create a detached element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: vec![],
            state: ElementState::default(),
            parent: None,
            children: vec![],
        }
    }

    /// Set an attribute, replacing an existing value.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the `id` attribute.
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Add a class to the `class` attribute.
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        let classes = match self.attribute("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {}", class.as_ref()),
            _ => class.as_ref().to_string(),
        };
        self.set_attribute("class", classes);
        self
    }

    /// Set the interaction state.
    pub fn with_state(mut self, state: ElementState) -> Self {
        self.state = state;
        self
    }

    /// Set an attribute, replacing an existing value.
    ///
    /// Attribute names are ASCII case-insensitive.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// The tag name as given.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Classes from the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Parent element, if attached.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child elements in order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// An element tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    root: Option<ElementId>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the root element, replacing any previous root.
    ///
    /// A previous root and its subtree stay in the document but are detached.
    pub fn set_root(&mut self, element: Element) -> ElementId {
        let id = self.elements.insert(Element {
            parent: None,
            children: vec![],
            ..element
        });
        self.root = Some(id);
        id
    }

    /// The root element.
    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    /// Append `element` as the last child of `parent`.
    pub fn append_child(&mut self, parent: ElementId, element: Element) -> Result<ElementId> {
        if !self.elements.contains_key(parent) {
            return Err(Error::unknown_element(parent));
        }
        let id = self.elements.insert(Element {
            parent: Some(parent),
            children: vec![],
            ..element
        });
        self.elements[parent].children.push(id);
        Ok(id)
    }

    /// Get an element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Get an element mutably, e.g. to change its state.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Get an element or fail with [`Error::UnknownElement`].
    pub fn element(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(id).ok_or_else(|| Error::unknown_element(id))
    }

    /// Number of elements, attached or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent_of(id), move |&current| self.parent_of(current))
    }

    /// Preceding siblings, nearest first.
    pub fn previous_siblings(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        let siblings = self.siblings(id);
        let position = siblings.iter().position(|&s| s == id).unwrap_or(0);
        siblings[..position].iter().rev().copied()
    }

    /// Zero-based position among siblings and the sibling count.
    pub fn sibling_position(&self, id: ElementId) -> Option<(usize, usize)> {
        let parent = self.parent_of(id)?;
        let siblings = &self.elements[parent].children;
        let index = siblings.iter().position(|&s| s == id)?;
        Some((index, siblings.len()))
    }

    fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    fn siblings(&self, id: ElementId) -> &[ElementId] {
        match self.parent_of(id) {
            Some(parent) => &self.elements[parent].children,
            None => &[],
        }
    }
}
