//! CSS selectors for the reference host.
//!
//! Supports type, universal, id, class and attribute selectors, the four
//! combinators, a set of state and structural pseudo-classes, `:not()` over
//! compound selectors, and pseudo-elements (which never match an element).

mod matcher;
mod parser;
mod types;

pub use matcher::DocumentMatcher;
pub use parser::parse_selector_list;
pub use types::{
    AttributeOperator, AttributeSelector, Combinator, PseudoClass, Selector, SelectorPart,
    TypeSelector,
};
