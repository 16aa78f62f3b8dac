//! Capabilities the host environment injects into the matcher.
//!
//! The core never inspects elements or evaluates media queries itself. A
//! browser binding would forward these to `Element.matches` and
//! `window.matchMedia`; tests can pass plain closures.

use std::convert::Infallible;

/// Decides whether an element matches a selector string.
///
/// The selector text may be a full selector list (`"a, .b"`) when called by
/// the collector, or a single branch of one when called by the ranker.
/// Failures (for example a syntax error in the selector) are returned as
/// `Self::Error` and propagate unchanged to the caller of
/// [`MatchedRules::matched_rules`](crate::MatchedRules::matched_rules).
pub trait SelectorMatch<E: ?Sized> {
    /// Error produced when the selector cannot be evaluated.
    type Error;

    /// Returns whether `element` matches `selector`.
    fn matches(&self, element: &E, selector: &str) -> Result<bool, Self::Error>;
}

impl<E, F> SelectorMatch<E> for F
where
    E: ?Sized,
    F: Fn(&E, &str) -> bool,
{
    type Error = Infallible;

    fn matches(&self, element: &E, selector: &str) -> Result<bool, Self::Error> {
        Ok(self(element, selector))
    }
}

/// Decides whether a media condition matches the current environment.
pub trait MediaMatch {
    /// Returns whether `condition` currently applies.
    fn matches_media(&self, condition: &str) -> bool;
}

impl<F> MediaMatch for F
where
    F: Fn(&str) -> bool,
{
    fn matches_media(&self, condition: &str) -> bool {
        self(condition)
    }
}

/// Media capability that accepts every condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllMedia;

impl MediaMatch for AllMedia {
    fn matches_media(&self, _condition: &str) -> bool {
        true
    }
}
