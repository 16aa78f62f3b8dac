//! Reference host for `matched-rules`.
//!
//! `matched-rules` asks its host two questions: does this element match this
//! selector, and does this media condition apply. In a browser those are
//! `Element.matches` and `window.matchMedia`. This crate answers them outside
//! a browser:
//!
//! - [`Document`]: an element tree with tags, attributes and interaction state
//! - [`DocumentMatcher`]: a selector matcher over a [`Document`], built on
//!   `cssparser`
//! - [`Viewport`]: a media query evaluator for a fixed-size viewport
//! - [`prune_media_rules`]: drops `@media` blocks that do not apply
//! - [`Viewport::matched_rules`]: prune and rank for one viewport in one call
//!
//! # Example
//!
//! ```
//! use matched_rules::prelude::*;
//! use matched_rules_host::prelude::*;
//!
//! let mut doc = Document::new();
//! let body = doc.set_root(Element::new("body"));
//! let p = doc.append_child(body, Element::new("p").with_class("note")).unwrap();
//!
//! let sheet = StyleSheet::from_rules(vec![
//!     CssRule::style("p", "paragraph"),
//!     CssRule::style("body .note", "note"),
//!     CssRule::style("span", "span"),
//! ]);
//!
//! let engine = MatchedRules::new(doc.matcher()).with_media(Viewport::default());
//! let rules = engine.matched_rules([&sheet], &p).unwrap();
//! let order: Vec<_> = rules.iter().map(|r| *r.data()).collect();
//! assert_eq!(order, ["note", "paragraph"]);
//! ```

pub mod dom;
mod error;
pub mod media;
pub mod selector;

pub use dom::{Document, Element, ElementId, ElementState};
pub use error::{Error, Result};
pub use media::{MediaType, Viewport, ViewportMatch, prune_media_rules};
pub use selector::{DocumentMatcher, Selector, parse_selector_list};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::dom::{Document, Element, ElementId, ElementState};
    pub use crate::error::{Error, Result};
    pub use crate::media::{MediaType, Viewport, ViewportMatch, prune_media_rules};
    pub use crate::selector::DocumentMatcher;
}
