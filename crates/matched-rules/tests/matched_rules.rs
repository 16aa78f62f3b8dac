//! Integration tests for collecting and ranking matched rules.

use std::sync::Arc;

use matched_rules::prelude::*;
use matched_rules::{ImportRule, collect_matching_rules};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Minimal element: a tag, an optional id and classes.
struct Node {
    tag: &'static str,
    id: Option<&'static str>,
    classes: &'static [&'static str],
}

/// Matches the subject compound of each selector branch; ancestors are not
/// checked, which is enough for these tests.
fn subject_matcher(node: &Node, selector_text: &str) -> bool {
    selector_text.split(',').any(|branch| {
        let Some(subject) = branch.split_whitespace().last() else {
            return false;
        };
        compound_matches(node, subject)
    })
}

fn compound_matches(node: &Node, compound: &str) -> bool {
    let mut rest = compound;
    let tag_len = rest
        .find(|c: char| c == '.' || c == '#')
        .unwrap_or(rest.len());
    let (tag, tail) = rest.split_at(tag_len);
    if !tag.is_empty() && tag != "*" && tag != node.tag {
        return false;
    }
    rest = tail;

    while !rest.is_empty() {
        let kind = rest.as_bytes()[0];
        let body = &rest[1..];
        let end = body
            .find(|c: char| c == '.' || c == '#')
            .unwrap_or(body.len());
        let name = &body[..end];
        let ok = match kind {
            b'.' => node.classes.iter().any(|c| *c == name),
            b'#' => node.id == Some(name),
            _ => false,
        };
        if !ok {
            return false;
        }
        rest = &body[end..];
    }
    true
}

fn data(rules: &[MatchedRule<'_, &'static str>]) -> Vec<&'static str> {
    rules.iter().map(|r| *r.data()).collect()
}

const TARGET: Node = Node {
    tag: "div",
    id: Some("id"),
    classes: &["cls", "b", "c"],
};

#[test]
fn end_to_end_orders_id_class_tag() {
    setup();
    let sheets = vec![
        StyleSheet::from_rules(vec![CssRule::style("#id", "#id")]),
        StyleSheet::from_rules(vec![
            CssRule::style("div", "tag"),
            CssRule::style(".cls", ".cls"),
        ]),
    ];
    let engine = MatchedRules::new(subject_matcher);

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&rules), vec!["#id", ".cls", "tag"]);
}

#[test]
fn output_is_exactly_the_matching_rules() {
    setup();
    let sheets = vec![StyleSheet::from_rules(vec![
        CssRule::style("span", "span"),
        CssRule::style("div.cls", "div.cls"),
        CssRule::style("p, .b", "p-or-b"),
        CssRule::style("#other", "#other"),
        CssRule::style(".missing, div", "missing-or-div"),
    ])];
    let engine = MatchedRules::new(subject_matcher);

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    let mut got = data(&rules);
    got.sort_unstable();
    assert_eq!(got, vec!["div.cls", "missing-or-div", "p-or-b"]);
}

#[test]
fn specificity_examples_rank_in_order() {
    setup();
    let sheets = vec![StyleSheet::from_rules(vec![
        CssRule::style("body div", "div span"),
        CssRule::style(".b.c", ".b.c"),
        CssRule::style("#id", "#a"),
    ])];
    let engine = MatchedRules::new(subject_matcher);

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&rules), vec!["#a", ".b.c", "div span"]);
    assert_eq!(
        rules.iter().map(|r| r.specificity).collect::<Vec<_>>(),
        vec![
            Specificity(1, 0, 0),
            Specificity(0, 2, 0),
            Specificity(0, 0, 2)
        ]
    );
}

#[test]
fn equal_specificity_keeps_flattened_order() {
    setup();
    let imported = StyleSheet::from_rules(vec![CssRule::style(".c", "imported")]);
    let sheets = vec![
        StyleSheet::from_rules(vec![
            CssRule::style(".b", "first"),
            CssRule::import(imported),
            CssRule::media("screen", vec![CssRule::style(".cls", "media")]),
        ]),
        StyleSheet::from_rules(vec![CssRule::style(".b", "last")]),
    ];
    let engine = MatchedRules::new(subject_matcher);

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&rules), vec!["first", "imported", "media", "last"]);
}

#[test]
fn deeply_nested_rule_lands_at_flattened_position() {
    setup();
    // Import -> Media -> Import
    let innermost = StyleSheet::from_rules(vec![CssRule::style("div", "deep")]);
    let level_two = StyleSheet::from_rules(vec![CssRule::media(
        "all",
        vec![
            CssRule::style("div", "before-deep"),
            CssRule::import(innermost),
            CssRule::style("div", "after-deep"),
        ],
    )]);
    let sheets = vec![StyleSheet::from_rules(vec![
        CssRule::style("div", "top-before"),
        CssRule::import(level_two),
        CssRule::style("div", "top-after"),
    ])];

    let collected = collect_matching_rules(
        &sheets,
        &TARGET,
        &subject_matcher,
        &AllMedia,
    )
    .unwrap();
    let order: Vec<_> = collected.iter().map(|r| r.data).collect();
    assert_eq!(
        order,
        vec!["top-before", "before-deep", "deep", "after-deep", "top-after"]
    );

    // All equal specificity, so ranking preserves the flattened order.
    let engine = MatchedRules::new(subject_matcher);
    let ranked = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&ranked), order);
}

#[test]
fn disabled_and_media_mismatched_sheets_are_ignored() {
    setup();
    let print_import = Arc::new(
        StyleSheet::from_rules(vec![CssRule::style("#id", "print-import")]).with_media("print"),
    );
    let sheets = vec![
        StyleSheet::from_rules(vec![CssRule::style("#id", "disabled")]).with_disabled(true),
        StyleSheet::from_rules(vec![CssRule::style("#id", "print")]).with_media("print"),
        StyleSheet::from_rules(vec![
            CssRule::import(Arc::clone(&print_import)),
            CssRule::Import(ImportRule::unresolved()),
            CssRule::style("div", "kept"),
        ]),
    ];
    let engine = MatchedRules::new(subject_matcher).with_media(|media: &str| media == "screen");

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&rules), vec!["kept"]);
}

#[test]
fn no_sheets_no_rules() {
    setup();
    let engine = MatchedRules::new(subject_matcher);
    let sheets: Vec<StyleSheet<&'static str>> = vec![];
    assert!(engine.matched_rules(&sheets, &TARGET).unwrap().is_empty());

    let empty = vec![StyleSheet::<&'static str>::new()];
    assert!(engine.matched_rules(&empty, &TARGET).unwrap().is_empty());
}

#[test]
fn pseudo_and_not_selectors_score_per_pattern() {
    setup();
    // The matcher ignores pseudo syntax; only the scores are under test.
    let sheets = vec![StyleSheet::from_rules(vec![
        CssRule::style("a::before", "pseudo-element"),
        CssRule::style("a:not(.b)", "not"),
    ])];
    let engine = MatchedRules::new(|_: &Node, _: &str| true);

    let rules = engine.matched_rules(&sheets, &TARGET).unwrap();
    assert_eq!(data(&rules), vec!["not", "pseudo-element"]);
    assert_eq!(rules[0].specificity, Specificity(0, 1, 1));
    assert_eq!(rules[1].specificity, Specificity(0, 0, 2));
}
