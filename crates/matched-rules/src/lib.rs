//! Specificity-ordered matched CSS rules for an element.
//!
//! This crate implements `getMatchedCSSRules` on top of host capabilities:
//!
//! - **Collection**: walk stylesheets in document order, expanding `@import`
//!   and `@media` in place, skipping disabled and media-mismatched sheets
//! - **Specificity**: score selector text as an (id, class, element) triple
//! - **Ranking**: stable sort from highest to lowest specificity
//!
//! The host supplies the stylesheets, a [`SelectorMatch`] capability (usually
//! `Element.matches`) and optionally a [`MediaMatch`] capability (usually
//! `window.matchMedia`).
//!
//! # Example
//!
//! ```
//! use matched_rules::prelude::*;
//!
//! let mut sheet = StyleSheet::new();
//! sheet.add_style_rule("p", 1);
//! sheet.add_style_rule("p.note, #main p", 2);
//! sheet.add_style_rule("span", 3);
//!
//! // Pretend the element is `<p class="note">` inside `#main`.
//! let matcher = |_: &(), selector: &str| selector != "span";
//! let engine = MatchedRules::new(matcher);
//!
//! let rules = engine.matched_rules([&sheet], &()).unwrap();
//! assert_eq!(rules[0].data, 2);
//! assert_eq!(rules[0].specificity, Specificity(1, 0, 1));
//! assert_eq!(rules[1].data, 1);
//! ```

pub mod collect;
pub mod engine;
pub mod host;
pub mod rank;
pub mod rules;
pub mod specificity;

pub use collect::collect_matching_rules;
pub use engine::{MatchedRules, matched_rules};
pub use host::{AllMedia, MediaMatch, SelectorMatch};
pub use rank::{MatchedRule, rank_by_specificity, specificity_score};
pub use rules::{CssRule, ImportRule, MediaRule, StyleRule, StyleSheet};
pub use specificity::Specificity;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::engine::MatchedRules;
    pub use crate::host::{AllMedia, MediaMatch, SelectorMatch};
    pub use crate::rank::MatchedRule;
    pub use crate::rules::{CssRule, StyleRule, StyleSheet};
    pub use crate::specificity::Specificity;
}
