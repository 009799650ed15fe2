//! Round trips between parsing and serialization.

use sorrel_dom::{Document, NodeKind, NodeRef};
use sorrel_html::parse;

/// Helper: structure of a tree, ignoring whitespace-only text and the
/// whitespace around text.
fn shape(doc: &Document) -> String {
    fn visit(node: NodeRef<'_>, out: &mut String) {
        match node.kind {
            NodeKind::Tag => {
                out.push('<');
                out.push_str(&node.name);
                for (name, value) in node.attributes.iter() {
                    out.push_str(&format!(" {name}={value:?}"));
                }
                out.push('>');
                for child in node.children() {
                    visit(child, out);
                }
                out.push_str("</>");
            }
            NodeKind::Text if node.content.trim().is_empty() => {}
            NodeKind::Text => out.push_str(&format!("{:?}", node.content.trim())),
            NodeKind::Comment => out.push_str(&format!("#comment{:?}", node.content)),
            NodeKind::Doctype => out.push_str(&format!("#doctype({})", node.content)),
            NodeKind::None => {
                for child in node.children() {
                    visit(child, out);
                }
            }
        }
    }
    let mut out = String::new();
    visit(doc.root_ref(), &mut out);
    out
}

const WELL_FORMED: &str = concat!(
    "<!DOCTYPE html>",
    "<div class=\"card\" data-x=\"1\">",
    "<h1>Title</h1>",
    "<p>Hello <b>bold</b> world<br />again</p>",
    "<!-- note -->",
    "<ul><li>one</li><li>two</li></ul>",
    "<img src=\"a.png\" alt=\"\">",
    "<script>if (a < b) {}</script>",
    "</div>",
);

#[test]
fn test_raw_html_round_trips_exactly() {
    let doc = parse(WELL_FORMED);
    let raw = doc.root_ref().to_raw_html(true, true);
    assert_eq!(raw, WELL_FORMED.replace(" alt=\"\"", " alt"));
    assert_eq!(parse(&raw).root_ref().to_raw_html(true, true), raw);
}

#[test]
fn test_pretty_html_reparses_to_same_structure() {
    let doc = parse(WELL_FORMED);
    for indent in ['\t', ' '] {
        let pretty = doc.root_ref().to_html(indent, true, true);
        assert!(pretty.contains('\n'));
        assert_eq!(shape(&parse(&pretty)), shape(&doc), "{pretty}");
    }
}

#[test]
fn test_to_text_line_breaks() {
    let doc = parse(
        "<div><p><b>First</b> p</p><p><i>Second</i> p</p>Text<br />Text</div>",
    );
    let div = doc.root_ref().at(0).unwrap();
    assert_eq!(div.to_text(false), "First p\nSecond p\nText\nText");
    let collapsed = div.to_text(true);
    assert!(!collapsed.contains('\n'));
    assert_eq!(collapsed, "First p Second p Text Text");
}

#[test]
fn test_to_text_skips_scripts_and_keeps_entities() {
    let doc = parse("<p>a &amp; b<script>var x = 1;</script></p><style>p{}</style>");
    assert_eq!(doc.root_ref().to_text(false), "a &amp; b");
}

#[test]
fn test_serialize_subtree_without_children_or_text() {
    let doc = parse("<ul id=\"l\"><li>one</li><li>two</li></ul>");
    let ul = doc.root_ref().at(0).unwrap();
    assert_eq!(ul.to_raw_html(true, false), "<ul id=\"l\"><li></li><li></li></ul>");
    assert_eq!(ul.to_raw_html(false, true), "<ul id=\"l\"></ul>");
}

#[test]
fn test_without_children_drops_text_too() {
    let doc = parse("<p>long text <b>x</b></p>");
    let p = doc.root_ref().at(0).unwrap();
    assert_eq!(p.to_html(' ', false, true), "<p></p>");
    assert_eq!(p.to_raw_html(false, true), "<p></p>");
}
