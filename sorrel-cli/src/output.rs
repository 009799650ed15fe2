//! Tree and JSON renderings used by the `tree` and `json` formats.

use owo_colors::OwoColorize;
use serde::Serialize;
use sorrel_dom::{NodeKind, NodeRef};

/// One line per node, indented two spaces per level, with tags, text and
/// comments coloured apart. Spaces in text show as `·` and newlines as `\n`.
pub fn tree_lines(node: NodeRef<'_>, depth: usize, out: &mut Vec<String>) {
    let prefix = "  ".repeat(depth);
    match node.kind {
        NodeKind::None => out.push(format!("{prefix}{}", "Document".bold())),
        NodeKind::Tag => {
            let mut line = format!("<{}", node.name);
            for (name, value) in node.attributes.iter() {
                if value.is_empty() {
                    line.push_str(&format!(" {}", name.yellow()));
                } else {
                    line.push_str(&format!(" {}=\"{value}\"", name.yellow()));
                }
            }
            line.push_str(if node.self_closing { " />" } else { ">" });
            out.push(format!("{prefix}{}", line.cyan()));
        }
        NodeKind::Text => {
            let display = node.content.replace('\n', "\\n").replace(' ', "\u{00B7}");
            out.push(format!("{prefix}{}", format!("\"{display}\"").green()));
        }
        NodeKind::Comment => {
            out.push(format!("{prefix}{}", format!("<!--{}-->", node.content).dimmed()));
        }
        NodeKind::Doctype => {
            out.push(format!("{prefix}{}", format!("<!DOCTYPE {}>", node.content).magenta()));
        }
    }
    for child in node.children() {
        tree_lines(child, depth + 1, out);
    }
}

/// A name/value pair, kept in source order.
#[derive(Debug, Serialize)]
pub struct JsonAttribute {
    name: String,
    value: String,
}

/// Serializable copy of a subtree.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    /// The document root.
    Document {
        /// Top-level nodes.
        children: Vec<JsonNode>,
    },
    /// A tag.
    Element {
        /// Lowercase tag name.
        #[serde(rename = "tagName")]
        tag_name: String,
        /// Attributes in source order.
        attributes: Vec<JsonAttribute>,
        /// Written as `<name ... />`.
        #[serde(rename = "selfClosing", skip_serializing_if = "std::ops::Not::not")]
        self_closing: bool,
        /// Child nodes.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<JsonNode>,
    },
    /// Character data.
    Text {
        /// Text as written.
        content: String,
    },
    /// A comment, `bogus` when recovered from malformed markup.
    Comment {
        /// Comment body.
        content: String,
        /// Recovered from `<!...>` or `<?...>`.
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        bogus: bool,
    },
    /// A doctype declaration.
    Doctype {
        /// Declared name.
        name: String,
    },
}

impl From<NodeRef<'_>> for JsonNode {
    fn from(node: NodeRef<'_>) -> Self {
        let children = || node.children().map(Self::from).collect();
        match node.kind {
            NodeKind::None => Self::Document {
                children: children(),
            },
            NodeKind::Tag => Self::Element {
                tag_name: node.name.clone(),
                attributes: node
                    .attributes
                    .iter()
                    .map(|(name, value)| JsonAttribute {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect(),
                self_closing: node.self_closing,
                children: children(),
            },
            NodeKind::Text => Self::Text {
                content: node.content.clone(),
            },
            NodeKind::Comment => Self::Comment {
                content: node.content.clone(),
                bogus: node.bogus,
            },
            NodeKind::Doctype => Self::Doctype {
                name: node.content.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_shape() {
        let doc = sorrel_html::parse(r#"<!DOCTYPE html><a href="/x" hidden>hi</a><br/><?pi?>"#);
        let value = serde_json::to_value(JsonNode::from(doc.root_ref())).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "document",
                "children": [
                    { "type": "doctype", "name": "html" },
                    {
                        "type": "element",
                        "tagName": "a",
                        "attributes": [
                            { "name": "href", "value": "/x" },
                            { "name": "hidden", "value": "" }
                        ],
                        "children": [{ "type": "text", "content": "hi" }]
                    },
                    { "type": "element", "tagName": "br", "attributes": [], "selfClosing": true },
                    { "type": "comment", "content": "?pi?", "bogus": true }
                ]
            })
        );
    }

    #[test]
    fn test_tree_lines_mark_whitespace() {
        let doc = sorrel_html::parse("<p>a b\n</p>");
        let mut lines = Vec::new();
        for child in doc.root_ref().children() {
            tree_lines(child, 0, &mut lines);
        }
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("  "));
        assert!(lines[1].contains("a\u{00B7}b\\n"));
    }
}
