//! Rule collection in document order.

use crate::host::{MediaMatch, SelectorMatch};
use crate::rules::{CssRule, StyleRule, StyleSheet};

/// Collect the style rules that match `element`, in document order.
///
/// Sheets are walked in the order given. Within a sheet, an `@import` is
/// replaced by the imported sheet's rules and an `@media` block by its
/// nested rules, recursively, at the position where they appear. Disabled
/// sheets and sheets whose media condition `media` rejects contribute
/// nothing, at any depth. A rule is kept when `matcher` accepts its full
/// selector text; the first matcher error aborts the walk and is returned.
pub fn collect_matching_rules<'a, T, E, M, Q>(
    sheets: impl IntoIterator<Item = &'a StyleSheet<T>>,
    element: &E,
    matcher: &M,
    media: &Q,
) -> Result<Vec<&'a StyleRule<T>>, M::Error>
where
    T: 'a,
    E: ?Sized,
    M: SelectorMatch<E>,
    Q: MediaMatch,
{
    let collector = Collector {
        element,
        matcher,
        media,
    };
    let mut matched = vec![];

    for sheet in sheets {
        collector.sheet(sheet, &mut matched)?;
    }

    Ok(matched)
}

struct Collector<'c, E: ?Sized, M, Q> {
    element: &'c E,
    matcher: &'c M,
    media: &'c Q,
}

impl<E, M, Q> Collector<'_, E, M, Q>
where
    E: ?Sized,
    M: SelectorMatch<E>,
    Q: MediaMatch,
{
    fn sheet<'a, T>(
        &self,
        sheet: &'a StyleSheet<T>,
        out: &mut Vec<&'a StyleRule<T>>,
    ) -> Result<(), M::Error> {
        if !sheet.is_active(self.media) {
            tracing::trace!(
                target: "matched_rules::collect",
                href = sheet.href.as_deref().unwrap_or("<inline>"),
                disabled = sheet.disabled,
                media = sheet.media.as_deref().unwrap_or(""),
                "skipping inactive stylesheet"
            );
            return Ok(());
        }
        self.rules(&sheet.rules, out)
    }

    fn rules<'a, T>(
        &self,
        rules: &'a [CssRule<T>],
        out: &mut Vec<&'a StyleRule<T>>,
    ) -> Result<(), M::Error> {
        for rule in rules {
            match rule {
                CssRule::Import(import) => match &import.sheet {
                    Some(sheet) => self.sheet(sheet, out)?,
                    None => {
                        tracing::trace!(
                            target: "matched_rules::collect",
                            "skipping unresolved @import"
                        );
                    }
                },
                // Media blocks are expected to be filtered by the host already.
                CssRule::Media(block) => self.rules(&block.rules, out)?,
                CssRule::Style(style) => {
                    if self.matcher.matches(self.element, &style.selector_text)? {
                        out.push(style);
                    }
                }
            }
        }
        Ok(())
    }
}
