//! The `getMatchedCSSRules` entry point.

use crate::collect::collect_matching_rules;
use crate::host::{AllMedia, MediaMatch, SelectorMatch};
use crate::rank::{MatchedRule, rank_by_specificity};
use crate::rules::StyleSheet;

/// Collect and rank the rules of `sheets` that match `element`.
///
/// Highest specificity first; equal specificity keeps document order. This is
/// [`collect_matching_rules`] followed by [`rank_by_specificity`].
pub fn matched_rules<'a, T, E, M, Q>(
    sheets: impl IntoIterator<Item = &'a StyleSheet<T>>,
    element: &E,
    matcher: &M,
    media: &Q,
) -> Result<Vec<MatchedRule<'a, T>>, M::Error>
where
    T: 'a,
    E: ?Sized,
    M: SelectorMatch<E>,
    Q: MediaMatch,
{
    let candidates = collect_matching_rules(sheets, element, matcher, media)?;
    let ranked = rank_by_specificity(candidates, element, matcher)?;
    tracing::debug!(
        target: "matched_rules::engine",
        matched = ranked.len(),
        "matched rules ranked"
    );
    Ok(ranked)
}

/// Matched-rules lookup bound to a host's selector and media capabilities.
///
/// Holds no state besides the capabilities; every call re-reads the sheets it
/// is given.
///
/// # Example
///
/// ```
/// use matched_rules::prelude::*;
///
/// let sheets = vec![
///     StyleSheet::from_rules(vec![CssRule::style("#id", "first")]),
///     StyleSheet::from_rules(vec![CssRule::style(".cls", "second"), CssRule::style("tag", "third")]),
/// ];
/// let engine = MatchedRules::new(|_: &(), _: &str| true);
///
/// let rules = engine.matched_rules(&sheets, &()).unwrap();
/// let order: Vec<_> = rules.iter().map(|r| *r.data()).collect();
/// assert_eq!(order, ["first", "second", "third"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchedRules<M, Q = AllMedia> {
    matcher: M,
    media: Q,
}

impl<M> MatchedRules<M> {
    /// Create a lookup that treats every media condition as matching.
    pub fn new(matcher: M) -> Self {
        Self {
            matcher,
            media: AllMedia,
        }
    }
}

impl<M, Q> MatchedRules<M, Q> {
    /// Replace the media capability.
    pub fn with_media<Q2: MediaMatch>(self, media: Q2) -> MatchedRules<M, Q2> {
        MatchedRules {
            matcher: self.matcher,
            media,
        }
    }

    /// The selector capability.
    pub fn matcher(&self) -> &M {
        &self.matcher
    }

    /// The media capability.
    pub fn media(&self) -> &Q {
        &self.media
    }

    /// Rules of `sheets` matching `element`, highest specificity first.
    ///
    /// Errors from the selector capability are returned unchanged; no partial
    /// result is produced.
    #[tracing::instrument(skip_all, target = "matched_rules::engine", level = "debug")]
    pub fn matched_rules<'a, T, E>(
        &self,
        sheets: impl IntoIterator<Item = &'a StyleSheet<T>>,
        element: &E,
    ) -> Result<Vec<MatchedRule<'a, T>>, M::Error>
    where
        T: 'a,
        E: ?Sized,
        M: SelectorMatch<E>,
        Q: MediaMatch,
    {
        matched_rules(sheets, element, &self.matcher, &self.media)
    }

    /// `window.getMatchedCSSRules(element, pseudo, authorOnly)`.
    ///
    /// Pseudo-element targeting and author-only filtering are not supported;
    /// both arguments are accepted and ignored.
    pub fn matched_css_rules<'a, T, E>(
        &self,
        sheets: impl IntoIterator<Item = &'a StyleSheet<T>>,
        element: &E,
        pseudo: Option<&str>,
        author_only: bool,
    ) -> Result<Vec<MatchedRule<'a, T>>, M::Error>
    where
        T: 'a,
        E: ?Sized,
        M: SelectorMatch<E>,
        Q: MediaMatch,
    {
        if pseudo.is_some() || author_only {
            tracing::debug!(
                target: "matched_rules::engine",
                pseudo,
                author_only,
                "pseudo-element and author-only arguments are ignored"
            );
        }
        self.matched_rules(sheets, element)
    }
}
