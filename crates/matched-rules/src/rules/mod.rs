//! Stylesheets and the rules they contain.

mod rule;
mod stylesheet;

pub use rule::{CssRule, ImportRule, MediaRule, StyleRule};
pub use stylesheet::StyleSheet;
