//! Specificity ranking of matched rules.

use std::fmt;
use std::ops::Deref;

use crate::host::SelectorMatch;
use crate::rules::StyleRule;
use crate::specificity::{Specificity, split_selector_list};

/// A matched style rule together with the specificity it matched with.
pub struct MatchedRule<'a, T> {
    /// The rule as found in its stylesheet.
    pub rule: &'a StyleRule<T>,
    /// Highest specificity among the selector branches matching the element.
    pub specificity: Specificity,
}

impl<'a, T> MatchedRule<'a, T> {
    /// The rule's payload.
    pub fn data(&self) -> &'a T {
        &self.rule.data
    }
}

impl<T> Deref for MatchedRule<'_, T> {
    type Target = StyleRule<T>;

    fn deref(&self) -> &Self::Target {
        self.rule
    }
}

impl<T> Clone for MatchedRule<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MatchedRule<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for MatchedRule<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchedRule")
            .field("selector_text", &self.rule.selector_text)
            .field("specificity", &self.specificity)
            .field("data", &self.rule.data)
            .finish()
    }
}

/// Specificity `element` gets from `selector_text`.
///
/// The selector list is split on its top-level commas and every branch
/// `matcher` accepts is scored; the highest score wins. Returns [`Specificity::ZERO`] when no
/// branch matches on its own.
pub fn specificity_score<E, M>(
    selector_text: &str,
    element: &E,
    matcher: &M,
) -> Result<Specificity, M::Error>
where
    E: ?Sized,
    M: SelectorMatch<E>,
{
    let mut best = Specificity::ZERO;
    for selector in split_selector_list(selector_text) {
        if matcher.matches(element, selector)? {
            best = best.max(Specificity::of_selector(selector));
        }
    }
    Ok(best)
}

/// Order `rules` from highest to lowest specificity for `element`.
///
/// Every rule is scored once up front. The sort is stable: rules with equal
/// specificity keep their incoming (document) order.
pub fn rank_by_specificity<'a, T, E, M>(
    rules: Vec<&'a StyleRule<T>>,
    element: &E,
    matcher: &M,
) -> Result<Vec<MatchedRule<'a, T>>, M::Error>
where
    E: ?Sized,
    M: SelectorMatch<E>,
{
    let mut ranked = rules
        .into_iter()
        .map(|rule| {
            Ok(MatchedRule {
                rule,
                specificity: specificity_score(&rule.selector_text, element, matcher)?,
            })
        })
        .collect::<Result<Vec<_>, M::Error>>()?;

    ranked.sort_by(|a, b| b.specificity.cmp(&a.specificity));
    Ok(ranked)
}
