//! Selector matching against a [`Document`].
//!
//! Matching runs right to left: the subject compound is tested first, then
//! each combinator walks toward the root or back through siblings, trying
//! every candidate before giving up on a branch.

use matched_rules::SelectorMatch;

use super::{Combinator, PseudoClass, Selector, SelectorPart, TypeSelector, parse_selector_list};
use crate::dom::{Document, Element, ElementId};
use crate::{Error, Result};

/// `Element.matches` for a [`Document`].
///
/// This is the selector capability handed to
/// [`MatchedRules`](matched_rules::MatchedRules). Selector text is parsed on
/// every call; a parse failure is returned as [`Error::InvalidSelector`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentMatcher<'d> {
    document: &'d Document,
}

impl<'d> DocumentMatcher<'d> {
    /// Create a matcher over `document`.
    pub fn new(document: &'d Document) -> Self {
        Self { document }
    }

    /// The document elements are looked up in.
    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// Parse `selector_text` and test whether any branch matches `element`.
    pub fn element_matches(&self, element: ElementId, selector_text: &str) -> Result<bool> {
        self.document.element(element)?;
        let selectors = parse_selector_list(selector_text)?;
        let matched = selectors
            .iter()
            .any(|selector| self.matches_selector(selector, element));

        tracing::trace!(
            target: "matched_rules_host::selector",
            selector = selector_text,
            matched,
            "selector evaluated"
        );
        Ok(matched)
    }

    /// Test an already parsed selector.
    pub fn matches_selector(&self, selector: &Selector, element: ElementId) -> bool {
        match selector.parts.len() {
            0 => false,
            len => self.match_from(selector, len - 1, element),
        }
    }

    /// Match `selector.parts[..=index]` with `parts[index]` anchored at `element`.
    fn match_from(&self, selector: &Selector, index: usize, element: ElementId) -> bool {
        if !self.part_matches(&selector.parts[index], element) {
            return false;
        }
        let Some(previous) = index.checked_sub(1) else {
            return true;
        };

        match selector.combinators[previous] {
            Combinator::Descendant => self
                .document
                .ancestors(element)
                .any(|ancestor| self.match_from(selector, previous, ancestor)),
            Combinator::Child => self
                .parent(element)
                .is_some_and(|parent| self.match_from(selector, previous, parent)),
            Combinator::AdjacentSibling => self
                .document
                .previous_siblings(element)
                .next()
                .is_some_and(|sibling| self.match_from(selector, previous, sibling)),
            Combinator::GeneralSibling => self
                .document
                .previous_siblings(element)
                .any(|sibling| self.match_from(selector, previous, sibling)),
        }
    }

    /// Test a single compound selector.
    pub fn part_matches(&self, part: &SelectorPart, element: ElementId) -> bool {
        let Some(el) = self.document.get(element) else {
            return false;
        };

        // Elements are never pseudo-elements.
        if part.pseudo_element.is_some() {
            return false;
        }

        if let Some(TypeSelector::Type(name)) = &part.type_selector
            && !el.tag().eq_ignore_ascii_case(name)
        {
            return false;
        }

        part.ids.iter().all(|id| el.id() == Some(id.as_str()))
            && part.classes.iter().all(|class| el.has_class(class))
            && part
                .attributes
                .iter()
                .all(|attr| attr.matches(el.attribute(&attr.name)))
            && part
                .pseudo_classes
                .iter()
                .all(|pseudo| self.pseudo_matches(pseudo, element, el))
    }

    fn pseudo_matches(&self, pseudo: &PseudoClass, id: ElementId, el: &Element) -> bool {
        match pseudo {
            PseudoClass::Hover => el.state.hovered,
            PseudoClass::Active => el.state.active,
            PseudoClass::Focus => el.state.focused,
            PseudoClass::Checked => el.state.checked,
            PseudoClass::Disabled => el.state.disabled,
            PseudoClass::Enabled => !el.state.disabled,
            PseudoClass::FirstChild => self
                .document
                .sibling_position(id)
                .is_some_and(|(index, _)| index == 0),
            PseudoClass::LastChild => self
                .document
                .sibling_position(id)
                .is_some_and(|(index, count)| index + 1 == count),
            PseudoClass::OnlyChild => self
                .document
                .sibling_position(id)
                .is_some_and(|(_, count)| count == 1),
            PseudoClass::Empty => el.children().is_empty(),
            PseudoClass::Root => self.document.root() == Some(id),
            PseudoClass::Not(parts) => !parts.iter().any(|part| self.part_matches(part, id)),
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.document.get(element).and_then(Element::parent)
    }
}

impl SelectorMatch<ElementId> for DocumentMatcher<'_> {
    type Error = Error;

    fn matches(&self, element: &ElementId, selector: &str) -> Result<bool> {
        self.element_matches(*element, selector)
    }
}

impl Document {
    /// A selector matcher borrowing this document.
    pub fn matcher(&self) -> DocumentMatcher<'_> {
        DocumentMatcher::new(self)
    }

    /// `Element.matches`: whether `element` matches `selector_text`.
    pub fn matches(&self, element: ElementId, selector_text: &str) -> Result<bool> {
        self.matcher().element_matches(element, selector_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ElementState;

    struct Fixture {
        doc: Document,
        html: ElementId,
        nav: ElementId,
        items: Vec<ElementId>,
        link: ElementId,
    }

    /// `html > body > nav#nav.menu > ul > li*3`, with a link in the second item.
    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let html = doc.set_root(Element::new("html"));
        let body = doc.append_child(html, Element::new("body")).unwrap();
        let nav = doc
            .append_child(body, Element::new("nav").with_id("nav").with_class("menu"))
            .unwrap();
        let ul = doc.append_child(nav, Element::new("ul")).unwrap();
        let items: Vec<_> = (0..3)
            .map(|i| {
                let li = Element::new("li").with_attr("data-index", i.to_string());
                doc.append_child(ul, li).unwrap()
            })
            .collect();
        let link = doc
            .append_child(
                items[1],
                Element::new("a")
                    .with_attr("href", "https://example.com/doc.pdf")
                    .with_class("active")
                    .with_state(ElementState {
                        hovered: true,
                        ..Default::default()
                    }),
            )
            .unwrap();
        Fixture {
            doc,
            html,
            nav,
            items,
            link,
        }
    }

    #[test]
    fn simple_selectors() {
        let f = fixture();
        assert!(f.doc.matches(f.nav, "nav").unwrap());
        assert!(f.doc.matches(f.nav, "NAV").unwrap());
        assert!(f.doc.matches(f.nav, "#nav").unwrap());
        assert!(f.doc.matches(f.nav, ".menu").unwrap());
        assert!(f.doc.matches(f.nav, "*").unwrap());
        assert!(f.doc.matches(f.nav, "nav#nav.menu").unwrap());
        assert!(!f.doc.matches(f.nav, "nav.other").unwrap());
        assert!(!f.doc.matches(f.nav, "#nav#other").unwrap());
    }

    #[test]
    fn any_branch_of_a_list() {
        let f = fixture();
        assert!(f.doc.matches(f.link, "p, a.active").unwrap());
        assert!(!f.doc.matches(f.link, "p, span").unwrap());
    }

    #[test]
    fn combinators() {
        let f = fixture();
        assert!(f.doc.matches(f.link, "nav a").unwrap());
        assert!(f.doc.matches(f.link, "#nav li > a").unwrap());
        assert!(!f.doc.matches(f.link, "ul > a").unwrap());
        assert!(f.doc.matches(f.items[1], "li + li").unwrap());
        assert!(!f.doc.matches(f.items[0], "li + li").unwrap());
        assert!(f.doc.matches(f.items[2], "li:first-child ~ li").unwrap());
        assert!(f.doc.matches(f.link, "html body nav ul li a").unwrap());
    }

    #[test]
    fn descendant_backtracks_past_first_candidate() {
        let f = fixture();
        // The nearest `li` ancestor is fine, but `.menu` must be found further up.
        assert!(f.doc.matches(f.link, ".menu li a").unwrap());
        assert!(f.doc.matches(f.link, "nav > ul > li a").unwrap());
    }

    #[test]
    fn attribute_selectors() {
        let f = fixture();
        assert!(f.doc.matches(f.link, "[href]").unwrap());
        assert!(f.doc.matches(f.link, "a[href^=https]").unwrap());
        assert!(f.doc.matches(f.link, "a[href$='.pdf']").unwrap());
        assert!(f.doc.matches(f.link, "a[href*=example]").unwrap());
        assert!(!f.doc.matches(f.link, "a[title]").unwrap());
        assert!(f.doc.matches(f.items[2], "li[data-index='2']").unwrap());
    }

    #[test]
    fn structural_and_state_pseudo_classes() {
        let f = fixture();
        assert!(f.doc.matches(f.items[0], "li:first-child").unwrap());
        assert!(f.doc.matches(f.items[2], "li:last-child").unwrap());
        assert!(!f.doc.matches(f.items[1], "li:only-child").unwrap());
        assert!(f.doc.matches(f.link, "a:only-child:empty").unwrap());
        assert!(f.doc.matches(f.html, ":root").unwrap());
        assert!(!f.doc.matches(f.nav, ":root").unwrap());
        assert!(f.doc.matches(f.link, "a:hover").unwrap());
        assert!(!f.doc.matches(f.link, "a:focus").unwrap());
        assert!(f.doc.matches(f.link, "a:enabled").unwrap());
    }

    #[test]
    fn negation() {
        let f = fixture();
        assert!(f.doc.matches(f.link, "a:not(.inactive)").unwrap());
        assert!(!f.doc.matches(f.link, "a:not(.active)").unwrap());
        assert!(!f.doc.matches(f.link, "a:not(.x, [href])").unwrap());
    }

    #[test]
    fn pseudo_elements_never_match() {
        let f = fixture();
        assert!(!f.doc.matches(f.link, "a::before").unwrap());
        assert!(!f.doc.matches(f.link, "a:after").unwrap());
        assert!(f.doc.matches(f.link, "a::before, a").unwrap());
    }

    #[test]
    fn errors() {
        let f = fixture();
        assert!(matches!(
            f.doc.matches(f.link, "a >"),
            Err(Error::InvalidSelector { .. })
        ));
        assert!(matches!(
            f.doc.matches(ElementId::default(), "a"),
            Err(Error::UnknownElement(_))
        ));
    }

    #[test]
    fn capability_trait() {
        let f = fixture();
        let matcher = f.doc.matcher();
        assert_eq!(SelectorMatch::matches(&matcher, &f.link, "li a"), Ok(true));
        assert!(std::ptr::eq(matcher.document(), &f.doc));
    }
}
