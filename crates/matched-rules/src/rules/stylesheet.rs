//! Stylesheet container.

use crate::host::MediaMatch;
use crate::rules::CssRule;

/// A stylesheet: an ordered rule list with an optional media condition.
///
/// Mirrors the parts of `CSSStyleSheet` the matcher reads. A sheet that is
/// disabled, or whose media condition does not currently match, contributes
/// no rules, including through `@import`.
#[derive(Debug, Clone)]
pub struct StyleSheet<T> {
    /// The rules in source order.
    pub rules: Vec<CssRule<T>>,
    /// Media condition from `<link media>` or the `@import` media list.
    pub media: Option<String>,
    /// Whether the sheet is disabled.
    pub disabled: bool,
    /// Source location, used only in log output.
    pub href: Option<String>,
}

impl<T> StyleSheet<T> {
    /// Create an empty, enabled stylesheet without a media condition.
    pub fn new() -> Self {
        Self {
            rules: vec![],
            media: None,
            disabled: false,
            href: None,
        }
    }

    /// Create a stylesheet from a rule list.
    pub fn from_rules(rules: Vec<CssRule<T>>) -> Self {
        Self {
            rules,
            ..Self::new()
        }
    }

    /// Set the media condition.
    pub fn with_media(mut self, media: impl Into<String>) -> Self {
        self.media = Some(media.into());
        self
    }

    /// Set the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the source location.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Append a rule.
    pub fn push(&mut self, rule: CssRule<T>) {
        self.rules.push(rule);
    }

    /// Append a style rule.
    pub fn add_style_rule(&mut self, selector_text: impl Into<String>, data: T) {
        self.rules.push(CssRule::style(selector_text, data));
    }

    /// Get the number of top-level rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether this sheet contributes rules in the current environment.
    ///
    /// An empty or whitespace-only media string counts as no condition.
    pub fn is_active(&self, media: &impl MediaMatch) -> bool {
        if self.disabled {
            return false;
        }
        match self.media.as_deref().map(str::trim) {
            Some(condition) if !condition.is_empty() => media.matches_media(condition),
            _ => true,
        }
    }
}

impl<T> Default for StyleSheet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<CssRule<T>> for StyleSheet<T> {
    fn from_iter<I: IntoIterator<Item = CssRule<T>>>(iter: I) -> Self {
        Self::from_rules(iter.into_iter().collect())
    }
}
