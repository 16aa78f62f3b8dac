//! Selector parsing using the `cssparser` crate.
//!
//! Only selector text is parsed here, never whole stylesheets. The accepted
//! grammar is the subset [`DocumentMatcher`](super::DocumentMatcher) can
//! evaluate; anything else is rejected the way `Element.matches` throws a
//! `SyntaxError`.

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use super::{
    AttributeOperator, AttributeSelector, Combinator, PseudoClass, Selector, SelectorPart,
    TypeSelector,
};
use crate::{Error, Result};

type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, &'static str>>;

/// Pseudo-elements that may be written with a single colon.
const LEGACY_PSEUDO_ELEMENTS: &[&str] = &["before", "after", "first-line", "first-letter"];

/// Parse a comma-separated selector list.
///
/// # Example
///
/// ```ignore
/// let selectors = parse_selector_list("ul > li.active, #nav a")?;
/// assert_eq!(selectors.len(), 2);
/// ```
pub fn parse_selector_list(text: &str) -> Result<Vec<Selector>> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    parser
        .parse_entirely(|p| p.parse_comma_separated(parse_complex))
        .map_err(|e| Error::invalid_selector(text, describe(&e)))
}

fn describe(error: &ParseError<'_, &'static str>) -> String {
    let message = match &error.kind {
        ParseErrorKind::Custom(message) => (*message).to_string(),
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected {:?}", token)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };
    format!("{} at column {}", message, error.location.column)
}

/// Parse one complex selector: compounds joined by combinators.
fn parse_complex<'i>(p: &mut Parser<'i, '_>) -> ParseResult<'i, Selector> {
    p.skip_whitespace();
    let mut parts = vec![parse_compound(p)?];
    let mut combinators = vec![];

    loop {
        let mut combinator = None;
        let mut saw_whitespace = false;
        let mut next_compound = None;

        while next_compound.is_none() {
            let state = p.state();
            let token = match p.next_including_whitespace() {
                Ok(token) => token.clone(),
                Err(_) => break,
            };
            match token {
                Token::WhiteSpace(_) => saw_whitespace = true,
                Token::Delim('>') if combinator.is_none() => combinator = Some(Combinator::Child),
                Token::Delim('+') if combinator.is_none() => {
                    combinator = Some(Combinator::AdjacentSibling)
                }
                Token::Delim('~') if combinator.is_none() => {
                    combinator = Some(Combinator::GeneralSibling)
                }
                _ => {
                    p.reset(&state);
                    next_compound = Some(state);
                }
            }
        }

        let Some(state) = next_compound else {
            if combinator.is_some() {
                return Err(p.new_custom_error("selector ends with a combinator"));
            }
            return Ok(Selector { parts, combinators });
        };

        let combinator = match combinator {
            Some(combinator) => combinator,
            None if saw_whitespace => Combinator::Descendant,
            None => return Err(state.source_location().new_custom_error("expected a combinator")),
        };
        combinators.push(combinator);
        parts.push(parse_compound(p)?);
    }
}

/// Parse a compound selector, stopping before whitespace or a combinator.
fn parse_compound<'i>(p: &mut Parser<'i, '_>) -> ParseResult<'i, SelectorPart> {
    let mut part = SelectorPart::default();

    loop {
        let state = p.state();
        let token = match p.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(name) if part.is_empty() => {
                part.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }
            Token::Delim('*') if part.is_empty() => {
                part.type_selector = Some(TypeSelector::Universal);
            }
            Token::IDHash(id) => part.ids.push(id.to_string()),
            Token::Delim('.') => {
                let location = p.current_source_location();
                match p.next_including_whitespace()? {
                    Token::Ident(class) => part.classes.push(class.to_string()),
                    t => return Err(location.new_unexpected_token_error(t.clone())),
                }
            }
            Token::SquareBracketBlock => {
                let attribute = p.parse_nested_block(parse_attribute)?;
                part.attributes.push(attribute);
            }
            Token::Colon => parse_pseudo(p, &mut part)?,
            _ => {
                p.reset(&state);
                break;
            }
        }
    }

    if part.is_empty() {
        return Err(p.new_custom_error("expected a selector"));
    }
    Ok(part)
}

/// Parse the inside of `[...]`.
fn parse_attribute<'i>(p: &mut Parser<'i, '_>) -> ParseResult<'i, AttributeSelector> {
    let name = p.expect_ident()?.to_ascii_lowercase();
    if p.is_exhausted() {
        return Ok(AttributeSelector {
            name,
            operation: None,
            case_insensitive: false,
        });
    }

    let location = p.current_source_location();
    let operator = match p.next()? {
        Token::Delim('=') => AttributeOperator::Equals,
        Token::IncludeMatch => AttributeOperator::Includes,
        Token::DashMatch => AttributeOperator::DashMatch,
        Token::PrefixMatch => AttributeOperator::Prefix,
        Token::SuffixMatch => AttributeOperator::Suffix,
        Token::SubstringMatch => AttributeOperator::Substring,
        t => return Err(location.new_unexpected_token_error(t.clone())),
    };
    let value = p.expect_ident_or_string()?.to_string();
    let case_insensitive = p.try_parse(|p| p.expect_ident_matching("i")).is_ok();
    p.expect_exhausted()?;

    Ok(AttributeSelector {
        name,
        operation: Some((operator, value)),
        case_insensitive,
    })
}

/// Parse what follows a `:` in a compound selector.
fn parse_pseudo<'i>(p: &mut Parser<'i, '_>, part: &mut SelectorPart) -> ParseResult<'i, ()> {
    let location = p.current_source_location();
    let token = p.next_including_whitespace()?.clone();

    match token {
        Token::Colon => match p.next_including_whitespace()? {
            Token::Ident(name) => part.pseudo_element = Some(name.to_ascii_lowercase()),
            t => return Err(location.new_unexpected_token_error(t.clone())),
        },
        Token::Ident(name) => {
            let name = name.to_ascii_lowercase();
            if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                part.pseudo_element = Some(name);
            } else if let Some(pseudo) = PseudoClass::from_name(&name) {
                part.pseudo_classes.push(pseudo);
            } else {
                return Err(location.new_custom_error("unsupported pseudo-class"));
            }
        }
        Token::Function(name) if name.eq_ignore_ascii_case("not") => {
            let inner = p.parse_nested_block(|p| {
                p.parse_comma_separated(|p| {
                    p.skip_whitespace();
                    parse_compound(p)
                })
            })?;
            part.pseudo_classes.push(PseudoClass::Not(inner));
        }
        Token::Function(_) => {
            return Err(location.new_custom_error("unsupported functional pseudo-class"));
        }
        t => return Err(location.new_unexpected_token_error(t)),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(text: &str) -> Selector {
        let mut list = parse_selector_list(text).unwrap();
        assert_eq!(list.len(), 1, "{text}");
        list.remove(0)
    }

    #[test]
    fn parses_compounds() {
        let sel = parse_one("Input#name.wide.tall[type=text]:focus");
        let part = sel.subject().unwrap();

        assert_eq!(part.type_selector, Some(TypeSelector::Type("input".into())));
        assert_eq!(part.ids, vec!["name"]);
        assert_eq!(part.classes, vec!["wide", "tall"]);
        assert_eq!(part.attributes.len(), 1);
        assert_eq!(part.pseudo_classes, vec![PseudoClass::Focus]);
    }

    #[test]
    fn parses_combinators() {
        let sel = parse_one("ul.menu > li + li ~ a  span");
        assert_eq!(sel.parts.len(), 5);
        assert_eq!(
            sel.combinators,
            vec![
                Combinator::Child,
                Combinator::AdjacentSibling,
                Combinator::GeneralSibling,
                Combinator::Descendant,
            ]
        );
        assert_eq!(sel.to_string(), "ul.menu > li + li ~ a span");
    }

    #[test]
    fn combinators_without_spaces() {
        let sel = parse_one("ul>li");
        assert_eq!(sel.combinators, vec![Combinator::Child]);
    }

    #[test]
    fn parses_selector_lists() {
        let list = parse_selector_list(" h1 , h2.title,#x ").unwrap();
        let rendered: Vec<_> = list.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["h1", "h2.title", "#x"]);
    }

    #[test]
    fn parses_attribute_forms() {
        let sel = parse_one("a[href][lang|=en][title~='x y' i]");
        let attrs = &sel.subject().unwrap().attributes;

        assert_eq!(attrs[0].operation, None);
        assert_eq!(
            attrs[1].operation,
            Some((AttributeOperator::DashMatch, "en".to_string()))
        );
        assert_eq!(
            attrs[2].operation,
            Some((AttributeOperator::Includes, "x y".to_string()))
        );
        assert!(attrs[2].case_insensitive);
    }

    #[test]
    fn parses_pseudo_elements_and_not() {
        let sel = parse_one("p:not(.a, #b)::first-line");
        let part = sel.subject().unwrap();
        assert_eq!(part.pseudo_element.as_deref(), Some("first-line"));
        match &part.pseudo_classes[0] {
            PseudoClass::Not(inner) => assert_eq!(inner.len(), 2),
            other => panic!("expected :not, got {other:?}"),
        }

        let legacy = parse_one("a:before");
        assert_eq!(legacy.subject().unwrap().pseudo_element.as_deref(), Some("before"));
    }

    #[test]
    fn rejects_invalid_selectors() {
        for text in ["", "a >", "a,", ".", "a:bogus", "a:nth-child(2)", "[x]div", "a!", "#"] {
            assert!(
                matches!(parse_selector_list(text), Err(Error::InvalidSelector { .. })),
                "{text:?} should be rejected"
            );
        }
    }
}
