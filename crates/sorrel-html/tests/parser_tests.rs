//! Integration tests for tree construction.

use std::io;

use sorrel_dom::{Document, NodeId, NodeKind, NodeRef};
use sorrel_html::{ParseError, Parser, parse};

/// Helper: one line per node, indented by depth, e.g. `  p` or `    "hi"`.
fn outline(doc: &Document) -> Vec<String> {
    fn visit(node: NodeRef<'_>, depth: usize, out: &mut Vec<String>) {
        let label = match node.kind {
            NodeKind::Tag => node.name.clone(),
            NodeKind::Text => format!("{:?}", node.content),
            NodeKind::Comment => format!("<!--{}-->", node.content),
            NodeKind::Doctype => format!("doctype {}", node.content),
            NodeKind::None => String::new(),
        };
        out.push(format!("{}{label}", "  ".repeat(depth)));
        for child in node.children() {
            visit(child, depth + 1, out);
        }
    }
    let mut out = Vec::new();
    for child in doc.root_ref().children() {
        visit(child, 0, &mut out);
    }
    out
}

/// Helper: first node with the given tag name, in document order.
fn find<'a>(doc: &'a Document, name: &str) -> NodeRef<'a> {
    doc.root_ref()
        .descendants()
        .find(|n| n.kind == NodeKind::Tag && n.name == name)
        .unwrap_or_else(|| panic!("no <{name}> in document"))
}

// ========== structure ==========

#[test]
fn test_nested_elements() {
    let doc = parse(r#"<div id="a"><p>hi <b>there</b></p></div>"#);
    assert_eq!(
        outline(&doc),
        vec!["div", "  p", "    \"hi \"", "    b", "      \"there\""]
    );
    let div = find(&doc, "div");
    assert_eq!(div.parent().map(|p| p.id()), Some(NodeId::ROOT));
    assert_eq!(div.get_attr("id"), Some("a"));
}

#[test]
fn test_attributes_keep_case_and_look_up_insensitively() {
    let doc = parse(r#"<A HREF="/X" Data-Id=7>x</A>"#);
    let a = find(&doc, "a");
    assert_eq!(a.get_attr("href"), Some("/X"));
    assert_eq!(a.get_attr("data-id"), Some("7"));
    assert_eq!(a.to_raw_html(true, true), r#"<a HREF="/X" Data-Id="7">x</a>"#);
}

#[test]
fn test_void_and_self_closing_elements_take_no_children() {
    let doc = parse("<p>a<br>b<img src=x>c</p><div/><span>s</span>");
    assert_eq!(
        outline(&doc),
        vec![
            "p",
            "  \"a\"",
            "  br",
            "  \"b\"",
            "  img",
            "  \"c\"",
            "div",
            "span",
            "  \"s\""
        ]
    );
    assert!(find(&doc, "div").self_closing);
    assert!(!find(&doc, "br").self_closing);
}

#[test]
fn test_text_runs_coalesce() {
    let doc = parse("one two<!--c-->three");
    assert_eq!(outline(&doc), vec!["\"one two\"", "<!--c-->", "\"three\""]);
}

#[test]
fn test_doctype_and_bogus_comment_nodes() {
    let doc = parse("<!DOCTYPE html><?php echo 1 ?><html></html>");
    let nodes: Vec<NodeRef<'_>> = doc.root_ref().children().collect();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0].kind, NodeKind::Doctype);
    assert_eq!(nodes[0].content, "html");
    assert_eq!(nodes[1].kind, NodeKind::Comment);
    assert!(nodes[1].bogus);
    assert_eq!(nodes[1].to_raw_html(true, true), "<?php echo 1 ?>");
}

#[test]
fn test_rawtext_element_holds_one_text_node() {
    let doc = parse("<script>if (a<b) { x = '</p>'; }</script><p>after</p>");
    let script = find(&doc, "script");
    assert_eq!(script.size(), 1);
    assert_eq!(
        script.at(0).map(|t| t.content.clone()),
        Some("if (a<b) { x = '</p>'; }".to_string())
    );
    assert_eq!(find(&doc, "p").parent().map(|p| p.id()), Some(NodeId::ROOT));
}

// ========== recovery ==========

#[test]
fn test_stray_end_tag_is_ignored() {
    let doc = parse("<div></span>text</div>after");
    assert_eq!(outline(&doc), vec!["div", "  \"text\"", "\"after\""]);
}

#[test]
fn test_text_around_stray_end_tag_stays_one_node() {
    let doc = parse("<div>a</x>b</div>");
    let div = find(&doc, "div");
    assert_eq!(div.size(), 1);
    assert_eq!(outline(&doc), vec!["div", "  \"ab\""]);

    let top = parse("x</br>y");
    assert_eq!(top.root_ref().size(), 1);
    assert_eq!(outline(&top), vec!["\"xy\""]);
}

#[test]
fn test_end_tag_closes_skipped_elements() {
    let doc = parse("<div><p><a>link</p>after</div>");
    assert_eq!(
        outline(&doc),
        vec!["div", "  p", "    a", "      \"link\"", "  \"after\""]
    );
}

#[test]
fn test_end_of_input_closes_everything() {
    let doc = parse("<div><p>open");
    assert_eq!(outline(&doc), vec!["div", "  p", "    \"open\""]);
}

#[test]
fn test_end_tag_matches_nearest_open_element() {
    let doc = parse("<div><div>inner</div>outer</div>");
    assert_eq!(
        outline(&doc),
        vec!["div", "  div", "    \"inner\"", "  \"outer\""]
    );
}

#[test]
fn test_end_tag_for_void_element_is_stray() {
    let doc = parse("<p>a<br></br>b</p>");
    assert_eq!(outline(&doc), vec!["p", "  \"a\"", "  br", "  \"b\""]);
}

// ========== walking ==========

#[test]
fn test_walk_can_skip_subtrees() {
    let doc = parse("<ul><li>li1</li><li>li2</li></ul><ol><li>li</li></ol>");
    let mut found = Vec::new();
    doc.root_ref().walk(|node| {
        if node.name == "ol" {
            return false;
        }
        if node.name == "li" {
            found.push(node.to_text(false));
        }
        true
    });
    assert_eq!(found, ["li1", "li2"]);
}

// ========== readers ==========

#[test]
fn test_parse_reader() {
    let doc = Parser::new()
        .parse_reader("<p>from a reader</p>".as_bytes())
        .unwrap();
    assert_eq!(doc.root_ref().to_text(false), "from a reader");

    let lossy = Parser::new().parse_reader(&b"<p>\xFFok</p>"[..]).unwrap();
    assert_eq!(lossy.root_ref().to_text(false), "\u{FFFD}ok");
}

/// Reader that always fails.
struct Broken;

impl io::Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

#[test]
fn test_parse_reader_reports_io_errors() {
    let err = Parser::new().parse_reader(Broken).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
    assert!(err.to_string().contains("disk on fire"));
}
