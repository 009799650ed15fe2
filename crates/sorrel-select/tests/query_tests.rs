//! Tests for matching selectors against hand-built trees.

use sorrel_dom::{Document, Node, NodeId, NodeRef};
use sorrel_select::{MatchContext, Select, Selector};

/// Helper to append a tag with attributes.
fn add(doc: &mut Document, parent: NodeId, name: &str, attrs: &[(&str, &str)]) -> NodeId {
    doc.append_node(parent, Node::tag_with_attrs(name, attrs.iter().copied()))
        .unwrap()
}

/// Helper: ids of query results.
fn ids(nodes: &[NodeRef<'_>]) -> Vec<NodeId> {
    nodes.iter().map(NodeRef::id).collect()
}

/// Helper building:
///
/// ```text
/// <div id="main" class="page wide">
///   <ul>
///     <li class="item">one</li>
///     <li class="item special">two</li>
///     <li>three</li>
///     <li class="item">four</li>
///   </ul>
///   <p><a href="/a/path/b" lang="en-US">x</a><a href="/pathway">y</a></p>
/// </div>
/// ```
struct Sample {
    doc: Document,
    div: NodeId,
    ul: NodeId,
    items: Vec<NodeId>,
    links: Vec<NodeId>,
}

fn sample() -> Sample {
    let mut doc = Document::new();
    let div = add(&mut doc, NodeId::ROOT, "div", &[("id", "main"), ("class", "page wide")]);
    let ul = add(&mut doc, div, "ul", &[]);
    let mut items = Vec::new();
    for (class, text) in [("item", "one"), ("item special", "two"), ("", "three"), ("item", "four")] {
        let li = if class.is_empty() {
            add(&mut doc, ul, "li", &[])
        } else {
            add(&mut doc, ul, "li", &[("class", class)])
        };
        let _ = doc.append_node(li, Node::text(text)).unwrap();
        items.push(li);
    }
    let p = add(&mut doc, div, "p", &[]);
    let first = add(&mut doc, p, "a", &[("href", "/a/path/b"), ("lang", "en-US")]);
    let _ = doc.append_node(first, Node::text("x")).unwrap();
    let second = add(&mut doc, p, "a", &[("href", "/pathway")]);
    let _ = doc.append_node(second, Node::text("y")).unwrap();
    Sample {
        doc,
        div,
        ul,
        items,
        links: vec![first, second],
    }
}

// ========== simple conditions ==========

#[test]
fn test_type_id_and_class() {
    let s = sample();
    assert_eq!(ids(&s.doc.select_str("LI")), s.items);
    assert_eq!(ids(&s.doc.select_str("#main")), vec![s.div]);
    assert_eq!(ids(&s.doc.select_str(".wide.page")), vec![s.div]);
    assert_eq!(
        ids(&s.doc.select_str("li.item")),
        vec![s.items[0], s.items[1], s.items[3]]
    );
    assert_eq!(ids(&s.doc.select_str(".special")), vec![s.items[1]]);
}

#[test]
fn test_universal_reaches_text_nodes() {
    let s = sample();
    let all = s.doc.select_str("*");
    // 1 div, 1 ul, 4 li, 1 p, 2 a, 6 text nodes
    assert_eq!(all.len(), 15);
    assert!(!ids(&all).contains(&NodeId::ROOT));
    let li_children = s.doc.select_str("li > *");
    assert_eq!(li_children.len(), 4);
}

#[test]
fn test_attribute_conditions() {
    let s = sample();
    let [first, second] = [s.links[0], s.links[1]];
    assert_eq!(ids(&s.doc.select_str("a[href]")), vec![first, second]);
    assert_eq!(ids(&s.doc.select_str("a[href='/pathway']")), vec![second]);
    assert_eq!(ids(&s.doc.select_str("a[href!='/pathway']")), vec![first]);
    assert_eq!(ids(&s.doc.select_str("a[href^='/a/']")), vec![first]);
    assert_eq!(ids(&s.doc.select_str("a[href$='way']")), vec![second]);
    assert_eq!(ids(&s.doc.select_str("a[href*='path']")), vec![first, second]);
    assert_eq!(ids(&s.doc.select_str("a[href~='path']")), vec![first]);
    assert_eq!(ids(&s.doc.select_str("a[lang|='en']")), vec![first]);
    assert_eq!(ids(&s.doc.select_str("a[HREF='/pathway']")), vec![second]);
    // value comparison is case-sensitive
    assert!(s.doc.select_str("a[href='/PATHWAY']").is_empty());
    // absent attribute counts as not equal
    assert_eq!(s.doc.select_str("li[class!='item']").len(), 2);
}

// ========== combinators ==========

#[test]
fn test_descendant_and_child() {
    let s = sample();
    assert_eq!(ids(&s.doc.select_str("div li")), s.items);
    assert_eq!(ids(&s.doc.select_str("div > ul")), vec![s.ul]);
    assert!(s.doc.select_str("div > li").is_empty());
    assert_eq!(ids(&s.doc.select_str("#main p > a")), s.links);
}

#[test]
fn test_descendant_backtracks_over_ancestors() {
    let mut doc = Document::new();
    let outer = add(&mut doc, NodeId::ROOT, "div", &[("class", "x")]);
    let inner = add(&mut doc, outer, "div", &[]);
    let span = add(&mut doc, inner, "span", &[]);
    // the nearest div is not .x; the outer one is
    assert_eq!(ids(&doc.select_str("div.x > div span")), vec![span]);
}

#[test]
fn test_selector_list_is_deduplicated_in_document_order() {
    let s = sample();
    let found = s.doc.select_str("a, p > a, ul");
    let mut expected = vec![s.ul];
    expected.extend(&s.links);
    assert_eq!(ids(&found), expected);
}

// ========== positions ==========

#[test]
fn test_positions_count_matching_siblings() {
    let s = sample();
    assert_eq!(ids(&s.doc.select_str("li:first")), vec![s.items[0]]);
    assert_eq!(ids(&s.doc.select_str("li:last")), vec![s.items[3]]);
    assert_eq!(ids(&s.doc.select_str("li:eq(1)")), vec![s.items[1]]);
    assert_eq!(ids(&s.doc.select_str("li.item:eq(2)")), vec![s.items[3]]);
    assert_eq!(
        ids(&s.doc.select_str("li:gt(1)")),
        vec![s.items[2], s.items[3]]
    );
    assert_eq!(
        ids(&s.doc.select_str("li:lt(2)")),
        vec![s.items[0], s.items[1]]
    );
    assert!(s.doc.select_str("li:eq(9)").is_empty());
}

#[test]
fn test_last_never_matches_while_streaming() {
    let s = sample();
    let last = Selector::parse("li:last");
    assert!(last.matches(&s.doc, s.items[3], MatchContext::Settled));
    assert!(!last.matches(&s.doc, s.items[3], MatchContext::Streaming));
    let first = Selector::parse("li:first");
    assert!(first.matches(&s.doc, s.items[0], MatchContext::Streaming));
}

// ========== scope ==========

#[test]
fn test_select_within_node() {
    let s = sample();
    let ul = s.doc.node(s.ul).unwrap();
    assert_eq!(ids(&ul.select_str("li")), s.items);
    // the scope node itself is not a candidate
    assert!(ul.select_str("ul").is_empty());
    // but ancestors above the scope still satisfy combinators
    assert_eq!(ul.select_str("#main li").len(), 4);
    assert_eq!(ul.select_first(&Selector::parse("li.special")).map(|n| n.id()), Some(s.items[1]));
}

#[test]
fn test_nested_switch() {
    let mut doc = Document::new();
    let outer = add(&mut doc, NodeId::ROOT, "div", &[]);
    let inner = add(&mut doc, outer, "div", &[]);
    let sibling = add(&mut doc, NodeId::ROOT, "div", &[]);

    let selector = Selector::parse("div");
    assert_eq!(ids(&doc.select(&selector, true)), vec![outer, inner, sibling]);
    assert_eq!(ids(&doc.select(&selector, false)), vec![outer, sibling]);
}

#[test]
fn test_non_nested_search_skips_subtree_for_every_alternative() {
    let mut doc = Document::new();
    let p = add(&mut doc, NodeId::ROOT, "p", &[]);
    let a = add(&mut doc, p, "a", &[]);

    let selector = Selector::parse("p, a");
    assert_eq!(ids(&doc.select(&selector, false)), vec![p]);
    assert_eq!(ids(&doc.select(&selector, true)), vec![p, a]);
}

#[test]
fn test_invalid_selector_matches_nothing() {
    let s = sample();
    assert!(s.doc.select_str("li:hover").is_empty());
    assert!(s.doc.select_str("").is_empty());
}
