//! CSS specificity calculation from selector text.
//!
//! Selectors are not parsed. Each whitespace-separated compound is run
//! through a fixed sequence of patterns, and every match is removed from the
//! compound before the next pattern runs, so nothing is counted twice:
//!
//! 1. pseudo-elements (`::before`, `:after`, ...) → element tier
//! 2. pseudo-classes with an optional argument → class tier
//! 3. attribute selectors `[...]` → class tier
//! 4. IDs `#name` → id tier
//! 5. classes `.name` → class tier
//! 6. remaining identifiers (type selectors) → element tier
//!
//! `:not(...)` contributes nothing itself; its keyword is dropped up front and
//! the selectors inside the parentheses are counted by the passes above.

use std::fmt;
use std::ops::Add;
use std::sync::LazyLock;

use regex::Regex;

static PSEUDO_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"::?(?:after|before|first-letter|first-line|selection)").unwrap()
});
static NOT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":not\(").unwrap());
static PSEUDO_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[\w-]+(?:\([^)]*\))?").unwrap());
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[[^\]]+\]").unwrap());
static ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[\w-]+").unwrap());
static CLASS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[\w-]+").unwrap());
static ELEMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\w-]+").unwrap());

/// CSS specificity as (a, b, c) tuple.
///
/// - a: ID selectors
/// - b: Class selectors, attributes, pseudo-classes
/// - c: Type selectors, pseudo-elements
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Calculate the specificity of a single complex selector such as
    /// `"ul li.active > a:hover"`.
    ///
    /// The text must not be a selector list; split on commas first (see
    /// [`StyleRule::selectors`](crate::rules::StyleRule::selectors)).
    pub fn of_selector(selector: &str) -> Self {
        selector
            .split_whitespace()
            .map(Self::of_compound)
            .fold(Self::ZERO, Add::add)
    }

    /// Calculate the specificity of one compound selector (no whitespace).
    ///
    /// Combinator tokens such as `>` or `+` score zero.
    pub fn of_compound(compound: &str) -> Self {
        let mut part = NOT_KEYWORD.replace_all(compound, "(").into_owned();

        let mut c = take(&mut part, &PSEUDO_ELEMENT);
        let mut b = take(&mut part, &PSEUDO_CLASS);
        b += take(&mut part, &ATTRIBUTE);
        let a = take(&mut part, &ID);
        b += take(&mut part, &CLASS);
        c += take(&mut part, &ELEMENT);

        Self(a, b, c)
    }

    /// Get the ID selector count.
    pub fn ids(&self) -> u32 {
        self.0
    }

    /// Get the class/attribute/pseudo-class count.
    pub fn classes(&self) -> u32 {
        self.1
    }

    /// Get the type selector/pseudo-element count.
    pub fn elements(&self) -> u32 {
        self.2
    }
}

impl Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(
            self.0.saturating_add(rhs.0),
            self.1.saturating_add(rhs.1),
            self.2.saturating_add(rhs.2),
        )
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// Split a selector list on its top-level commas into trimmed, non-empty
/// branches.
///
/// Commas inside parentheses, brackets or quoted strings belong to the
/// branch, so `p:not(.a, .b)` and `[title="x,y"]` stay whole.
pub fn split_selector_list(selector_text: &str) -> impl Iterator<Item = &str> {
    let mut branches = vec![];
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in selector_text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', _) => escaped = true,
            (c, Some(open)) if c == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(c),
            ('(' | '[', None) => depth += 1,
            (')' | ']', None) => depth = depth.saturating_sub(1),
            (',', None) if depth == 0 => {
                branches.push(&selector_text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    branches.push(&selector_text[start..]);

    branches
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Count the matches of `re` in `part` and strip them.
fn take(part: &mut String, re: &Regex) -> u32 {
    let count = u32::try_from(re.find_iter(part.as_str()).count()).unwrap_or(u32::MAX);
    if count > 0 {
        let stripped = re.replace_all(part.as_str(), "").into_owned();
        *part = stripped;
    }
    count
}
