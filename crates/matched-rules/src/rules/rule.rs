//! Rule variants found in a stylesheet.

use std::sync::Arc;

use super::StyleSheet;
use crate::specificity::split_selector_list;

/// One entry of a stylesheet's rule list.
///
/// `T` is the opaque payload carried by style rules (a declaration block, a
/// handle into the host's CSSOM, or anything else). The matcher hands it back
/// untouched.
#[derive(Debug, Clone)]
pub enum CssRule<T> {
    /// `@import`: replaced in place by the imported sheet's rules.
    Import(ImportRule<T>),
    /// `@media`: replaced in place by its nested rules.
    Media(MediaRule<T>),
    /// A selector with its payload.
    Style(StyleRule<T>),
}

impl<T> CssRule<T> {
    /// Create a style rule entry.
    pub fn style(selector_text: impl Into<String>, data: T) -> Self {
        Self::Style(StyleRule::new(selector_text, data))
    }

    /// Create an `@import` entry pointing at a loaded sheet.
    pub fn import(sheet: impl Into<Arc<StyleSheet<T>>>) -> Self {
        Self::Import(ImportRule::new(sheet))
    }

    /// Create an `@media` entry wrapping `rules`.
    pub fn media(condition: impl Into<String>, rules: Vec<CssRule<T>>) -> Self {
        Self::Media(MediaRule::new(condition, rules))
    }

    /// Returns the style rule if this entry is one.
    pub fn as_style(&self) -> Option<&StyleRule<T>> {
        match self {
            Self::Style(rule) => Some(rule),
            _ => None,
        }
    }
}

/// A plain style rule: selector text plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule<T> {
    /// Selector text as written, possibly a comma-separated list.
    pub selector_text: String,
    /// Payload returned as-is to the caller.
    pub data: T,
}

impl<T> StyleRule<T> {
    /// Create a new style rule.
    pub fn new(selector_text: impl Into<String>, data: T) -> Self {
        Self {
            selector_text: selector_text.into(),
            data,
        }
    }

    /// Iterate over the branches of the selector list, trimmed.
    ///
    /// Only top-level commas split; a comma inside `:not(a, b)` or a quoted
    /// attribute value stays in its branch.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        split_selector_list(&self.selector_text)
    }
}

/// An `@import` rule.
#[derive(Debug, Clone)]
pub struct ImportRule<T> {
    /// The imported sheet, or `None` if it failed to load.
    pub sheet: Option<Arc<StyleSheet<T>>>,
}

impl<T> ImportRule<T> {
    /// Create an import of a loaded sheet.
    pub fn new(sheet: impl Into<Arc<StyleSheet<T>>>) -> Self {
        Self {
            sheet: Some(sheet.into()),
        }
    }

    /// Create an import whose target never loaded.
    pub fn unresolved() -> Self {
        Self { sheet: None }
    }
}

/// An `@media` block.
///
/// The condition is kept for inspection only; the collector expands the
/// block unconditionally and expects the host to have filtered it.
#[derive(Debug, Clone)]
pub struct MediaRule<T> {
    /// Media condition text, e.g. `"screen and (min-width: 600px)"`.
    pub condition: String,
    /// Nested rules in source order.
    pub rules: Vec<CssRule<T>>,
}

impl<T> MediaRule<T> {
    /// Create a media block.
    pub fn new(condition: impl Into<String>, rules: Vec<CssRule<T>>) -> Self {
        Self {
            condition: condition.into(),
            rules,
        }
    }
}
