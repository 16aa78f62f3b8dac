//! Media query evaluation against a fixed viewport.
//!
//! Supports media types (`all`, `screen`, `print`), the `not` and `only`
//! prefixes, comma-separated query lists, and `and`-joined features:
//! `width`, `height` and their `min-`/`max-` forms in `px`, `em` or `rem`,
//! plus `orientation`. Unknown media types and unknown features evaluate to
//! false. A malformed query in a list evaluates to false without affecting
//! the other queries.

use std::sync::Arc;

use cssparser::{ParseError, Parser, ParserInput, Token};
use matched_rules::{
    CssRule, ImportRule, MatchedRules, MediaMatch, MediaRule, Specificity, StyleRule, StyleSheet,
};

use crate::Result;
use crate::dom::{Document, ElementId};

type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, ()>>;

/// Pixels per `em`/`rem`, the initial font size.
const PX_PER_EM: f32 = 16.0;

/// The output medium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MediaType {
    /// A screen.
    #[default]
    Screen,
    /// Paged print output.
    Print,
}

impl MediaType {
    /// The media type keyword.
    pub fn name(self) -> &'static str {
        match self {
            Self::Screen => "screen",
            Self::Print => "print",
        }
    }
}

/// `window.matchMedia` for a viewport of fixed size.
///
/// # Example
///
/// ```
/// use matched_rules::MediaMatch;
/// use matched_rules_host::Viewport;
///
/// let phone = Viewport::new(375.0, 812.0);
/// assert!(phone.matches_media("screen and (max-width: 600px)"));
/// assert!(phone.matches_media("(orientation: portrait)"));
/// assert!(!phone.matches_media("print"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
    /// Output medium.
    pub media_type: MediaType,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

impl Viewport {
    /// Create a screen viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            media_type: MediaType::Screen,
        }
    }

    /// Switch to print media.
    pub fn print(self) -> Self {
        self.with_media_type(MediaType::Print)
    }

    /// Set the media type.
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = media_type;
        self
    }

    /// `"portrait"` when the height is at least the width, else `"landscape"`.
    pub fn orientation(&self) -> &'static str {
        if self.height >= self.width {
            "portrait"
        } else {
            "landscape"
        }
    }

    /// Evaluate a comma-separated media query list.
    ///
    /// An empty list matches.
    pub fn matches_query_list(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return true;
        }

        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let results = parser.parse_comma_separated(|p| Ok::<_, ParseError<'_, ()>>(self.query(p)));

        results.is_ok_and(|results| results.into_iter().any(|matched| matched))
    }

    /// Evaluate one query, consuming it entirely. Malformed queries are false.
    fn query(&self, p: &mut Parser<'_, '_>) -> bool {
        let result = p.try_parse(|p| {
            let matched = self.evaluate_query(p)?;
            p.expect_exhausted()?;
            Ok::<_, ParseError<'_, ()>>(matched)
        });

        match result {
            Ok(matched) => matched,
            Err(_) => {
                while p.next().is_ok() {}
                false
            }
        }
    }

    fn evaluate_query<'i>(&self, p: &mut Parser<'i, '_>) -> ParseResult<'i, bool> {
        let negated = p.try_parse(|p| p.expect_ident_matching("not")).is_ok();
        if !negated {
            let _ = p.try_parse(|p| p.expect_ident_matching("only"));
        }

        let mut matched = match p.try_parse(|p| p.expect_ident_cloned()) {
            Ok(media_type) => self.media_type_matches(&media_type),
            Err(_) => self.evaluate_feature(p)?,
        };

        while !p.is_exhausted() {
            p.expect_ident_matching("and")?;
            let feature = self.evaluate_feature(p)?;
            matched = matched && feature;
        }

        Ok(matched != negated)
    }

    fn media_type_matches(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case("all") || name.eq_ignore_ascii_case(self.media_type.name())
    }

    /// Evaluate `(name)` or `(name: value)`.
    fn evaluate_feature<'i>(&self, p: &mut Parser<'i, '_>) -> ParseResult<'i, bool> {
        p.expect_parenthesis_block()?;
        p.parse_nested_block(|p| {
            let name = p.expect_ident_cloned()?.to_ascii_lowercase();
            if p.is_exhausted() {
                return Ok(self.feature_present(&name));
            }
            p.expect_colon()?;

            let matched = match name.as_str() {
                "orientation" => {
                    let value = p.expect_ident_cloned()?;
                    value.eq_ignore_ascii_case(self.orientation())
                }
                "width" => approx_eq(self.width, parse_length(p)?),
                "min-width" => self.width >= parse_length(p)?,
                "max-width" => self.width <= parse_length(p)?,
                "height" => approx_eq(self.height, parse_length(p)?),
                "min-height" => self.height >= parse_length(p)?,
                "max-height" => self.height <= parse_length(p)?,
                _ => {
                    while p.next().is_ok() {}
                    false
                }
            };
            Ok(matched)
        })
    }

    fn feature_present(&self, name: &str) -> bool {
        match name {
            "width" => self.width > 0.0,
            "height" => self.height > 0.0,
            "orientation" => true,
            _ => false,
        }
    }
}

impl MediaMatch for Viewport {
    fn matches_media(&self, condition: &str) -> bool {
        let matched = self.matches_query_list(condition);
        tracing::trace!(
            target: "matched_rules_host::media",
            condition,
            matched,
            "media evaluated"
        );
        matched
    }
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < f32::EPSILON
}

/// Parse a length in pixels. Unitless zero is allowed.
fn parse_length<'i>(p: &mut Parser<'i, '_>) -> ParseResult<'i, f32> {
    let location = p.current_source_location();
    match p.next()? {
        Token::Dimension { value, unit, .. } if unit.eq_ignore_ascii_case("px") => Ok(*value),
        Token::Dimension { value, unit, .. }
            if unit.eq_ignore_ascii_case("em") || unit.eq_ignore_ascii_case("rem") =>
        {
            Ok(*value * PX_PER_EM)
        }
        Token::Number { value, .. } if *value == 0.0 => Ok(0.0),
        _ => Err(location.new_custom_error(())),
    }
}

/// Copy `sheet` without the `@media` blocks `media` rejects.
///
/// The collector expands `@media` blocks without evaluating their
/// conditions, so hosts run this first. Imported sheets are pruned
/// recursively and re-shared; their own media conditions are left for the
/// collector.
pub fn prune_media_rules<T: Clone>(sheet: &StyleSheet<T>, media: &impl MediaMatch) -> StyleSheet<T> {
    StyleSheet {
        rules: prune_rules(&sheet.rules, media),
        media: sheet.media.clone(),
        disabled: sheet.disabled,
        href: sheet.href.clone(),
    }
}

fn prune_rules<T: Clone>(rules: &[CssRule<T>], media: &impl MediaMatch) -> Vec<CssRule<T>> {
    rules
        .iter()
        .filter_map(|rule| match rule {
            CssRule::Style(style) => Some(CssRule::Style(style.clone())),
            CssRule::Import(import) => Some(CssRule::Import(ImportRule {
                sheet: import
                    .sheet
                    .as_ref()
                    .map(|target| Arc::new(prune_media_rules(target, media))),
            })),
            CssRule::Media(block) if media.matches_media(&block.condition) => {
                Some(CssRule::Media(MediaRule::new(
                    block.condition.clone(),
                    prune_rules(&block.rules, media),
                )))
            }
            CssRule::Media(block) => {
                tracing::trace!(
                    target: "matched_rules_host::media",
                    condition = %block.condition,
                    "dropping @media block"
                );
                None
            }
        })
        .collect()
}

/// A rule matched for one viewport, detached from the pruned sheets it was
/// found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportMatch<T> {
    /// Copy of the matched rule.
    pub rule: StyleRule<T>,
    /// Specificity the rule matched with.
    pub specificity: Specificity,
}

impl Viewport {
    /// Prune every sheet's `@media` blocks for this viewport.
    pub fn prune_all<'s, T: Clone + 's>(
        &self,
        sheets: impl IntoIterator<Item = &'s StyleSheet<T>>,
    ) -> Vec<StyleSheet<T>> {
        sheets
            .into_iter()
            .map(|sheet| prune_media_rules(sheet, self))
            .collect()
    }

    /// Rules of `sheets` matching `element` in this viewport, most specific
    /// first.
    ///
    /// `@media` blocks and sheet media conditions are both evaluated against
    /// `self`, so the result never depends on an earlier pruning pass.
    pub fn matched_rules<'s, T: Clone + 's>(
        &self,
        document: &Document,
        element: ElementId,
        sheets: impl IntoIterator<Item = &'s StyleSheet<T>>,
    ) -> Result<Vec<ViewportMatch<T>>> {
        let pruned = self.prune_all(sheets);
        let engine = MatchedRules::new(document.matcher()).with_media(*self);
        let ranked = engine.matched_rules(&pruned, &element)?;

        Ok(ranked
            .into_iter()
            .map(|matched| ViewportMatch {
                rule: matched.rule.clone(),
                specificity: matched.specificity,
            })
            .collect())
    }
}
