//! Rendering a (sub)tree back to markup or plain text.
//!
//! Three renderings are provided:
//! - [`to_html`]: one node per line, indented by depth.
//! - [`to_raw_html`]: the same markup with no added whitespace.
//! - [`to_text`]: text content, with line breaks for `<br>` and block elements.
//!
//! Text is written as stored. The parser does not decode character
//! references, so nothing is re-escaped on the way out.

use crate::{Document, Node, NodeId, NodeKind};

/// Elements that start and end a line in [`to_text`].
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "tr", "ul",
];

/// Elements whose content is never text for [`to_text`].
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

// =============================================================================
// Markup
// =============================================================================

/// Opening tag with attributes, e.g. `<a href="/x" hidden>` or `<br />`.
fn open_tag(node: &Node) -> String {
    let mut out = format!("<{}", node.name);
    for (name, value) in node.attributes.iter() {
        out.push(' ');
        out.push_str(name);
        if value.is_empty() {
            continue;
        }
        out.push('=');
        match (value.contains('"'), value.contains('\'')) {
            (false, _) => out.push_str(&format!("\"{value}\"")),
            (true, false) => out.push_str(&format!("'{value}'")),
            (true, true) => out.push_str(&format!("\"{}\"", value.replace('"', "&quot;"))),
        }
    }
    if node.self_closing {
        out.push_str(" />");
    } else {
        out.push('>');
    }
    out
}

fn close_tag(node: &Node) -> String {
    format!("</{}>", node.name)
}

/// Markup for comment and doctype nodes.
fn leaf_markup(node: &Node) -> String {
    match node.kind {
        NodeKind::Comment if node.bogus && node.content.starts_with('?') => {
            format!("<{}>", node.content)
        }
        NodeKind::Comment if node.bogus => format!("<!{}>", node.content),
        NodeKind::Comment => format!("<!--{}-->", node.content),
        NodeKind::Doctype => format!("<!DOCTYPE {}>", node.content),
        NodeKind::None | NodeKind::Text | NodeKind::Tag => String::new(),
    }
}

/// Tag without an end tag: self-closing, or void.
fn has_no_end_tag(node: &Node) -> bool {
    node.self_closing || node.is_void()
}

/// Children selected by the `recurse_children` / `include_text` switches.
///
/// Without `recurse_children` nothing below the node is emitted, text
/// included. Otherwise `include_text` decides whether text children appear.
fn emitted_children(
    document: &Document,
    id: NodeId,
    recurse_children: bool,
    include_text: bool,
) -> impl Iterator<Item = NodeId> + '_ {
    document.children(id).iter().copied().filter(move |&child| {
        recurse_children
            && document
                .get(child)
                .is_some_and(|n| include_text || n.kind != NodeKind::Text)
    })
}

/// Render `id` as indented markup: one node per line, `indent` repeated once
/// per depth level.
///
/// Elements without printable children stay on one line (`<p></p>`). Text is
/// trimmed, and whitespace-only text is dropped. Rendering the root renders
/// its children at depth zero.
#[must_use]
pub fn to_html(
    document: &Document,
    id: NodeId,
    indent: char,
    recurse_children: bool,
    include_text: bool,
) -> String {
    let mut printer = PrettyPrinter {
        document,
        indent,
        recurse_children,
        include_text,
        lines: Vec::new(),
    };
    printer.node(id, 0);
    printer.lines.join("\n")
}

struct PrettyPrinter<'a> {
    document: &'a Document,
    indent: char,
    recurse_children: bool,
    include_text: bool,
    lines: Vec<String>,
}

impl PrettyPrinter<'_> {
    fn line(&mut self, depth: usize, content: &str) {
        let mut line: String = std::iter::repeat_n(self.indent, depth).collect();
        line.push_str(content);
        self.lines.push(line);
    }

    fn printable(&self, id: NodeId) -> bool {
        self.document.get(id).is_some_and(|n| match n.kind {
            NodeKind::Text => !n.content.trim().is_empty(),
            _ => true,
        })
    }

    fn node(&mut self, id: NodeId, depth: usize) {
        let document = self.document;
        let Some(node) = document.get(id) else {
            return;
        };
        match node.kind {
            NodeKind::None => {
                for child in self.children(id) {
                    self.node(child, depth);
                }
            }
            NodeKind::Text => {
                let text = node.content.trim();
                if !text.is_empty() {
                    self.line(depth, text);
                }
            }
            NodeKind::Comment | NodeKind::Doctype => {
                let markup = leaf_markup(node);
                self.line(depth, &markup);
            }
            NodeKind::Tag => {
                let open = open_tag(node);
                if has_no_end_tag(node) {
                    self.line(depth, &open);
                    return;
                }
                let close = close_tag(node);
                let children = self.children(id);
                if children.is_empty() {
                    self.line(depth, &format!("{open}{close}"));
                    return;
                }
                self.line(depth, &open);
                for child in children {
                    self.node(child, depth + 1);
                }
                self.line(depth, &close);
            }
        }
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        emitted_children(self.document, id, self.recurse_children, self.include_text)
            .filter(|&child| self.printable(child))
            .collect()
    }
}

/// Render `id` as markup with no formatting whitespace added.
///
/// Text is written exactly as stored, so re-parsing the output of a parsed
/// document and rendering it again gives the same string. The exception is
/// an attribute value holding both `"` and `'`: it is written with `&quot;`,
/// which the parser keeps as literal text rather than decoding.
#[must_use]
pub fn to_raw_html(
    document: &Document,
    id: NodeId,
    recurse_children: bool,
    include_text: bool,
) -> String {
    let mut out = String::new();
    write_raw(document, id, recurse_children, include_text, &mut out);
    out
}

fn write_raw(
    document: &Document,
    id: NodeId,
    recurse_children: bool,
    include_text: bool,
    out: &mut String,
) {
    let Some(node) = document.get(id) else {
        return;
    };
    match node.kind {
        NodeKind::None => {
            for child in emitted_children(document, id, recurse_children, include_text) {
                write_raw(document, child, recurse_children, include_text, out);
            }
        }
        NodeKind::Text => out.push_str(&node.content),
        NodeKind::Comment | NodeKind::Doctype => out.push_str(&leaf_markup(node)),
        NodeKind::Tag => {
            out.push_str(&open_tag(node));
            if has_no_end_tag(node) {
                return;
            }
            for child in emitted_children(document, id, recurse_children, include_text) {
                write_raw(document, child, recurse_children, include_text, out);
            }
            out.push_str(&close_tag(node));
        }
    }
}

// =============================================================================
// Text
// =============================================================================

/// Flatten the text under `id`.
///
/// Text nodes are concatenated in document order, skipping `script` and
/// `style`. `<br>` and block elements end the current line, but never leave
/// a blank line behind. Newlines inside text are kept as written, blank lines
/// included. Lines are trimmed, except that inside `<pre>` leading whitespace
/// survives. Whitespace-only text outside `<pre>` counts as a single space.
///
/// With `collapse_linebreaks` the non-blank lines are joined with one space.
#[must_use]
pub fn to_text(document: &Document, id: NodeId, collapse_linebreaks: bool) -> String {
    let mut text = TextCollector::default();
    text.node(document, id);
    text.finish(collapse_linebreaks)
}

#[derive(Default)]
struct TextCollector {
    lines: Vec<String>,
    current: String,
    /// Depth of open `<pre>` elements.
    preformatted: usize,
}

impl TextCollector {
    fn node(&mut self, document: &Document, id: NodeId) {
        let Some(node) = document.get(id) else {
            return;
        };
        match node.kind {
            NodeKind::Text => self.text(&node.content),
            NodeKind::None => {
                for &child in node.children() {
                    self.node(document, child);
                }
            }
            NodeKind::Tag => {
                let name = node.name.as_str();
                if HIDDEN_ELEMENTS.contains(&name) {
                    return;
                }
                if name == "br" {
                    self.generated_break();
                    return;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                let pre = name == "pre";
                if block {
                    self.generated_break();
                }
                if pre {
                    self.preformatted += 1;
                }
                for &child in node.children() {
                    self.node(document, child);
                }
                if block {
                    self.generated_break();
                }
                if pre {
                    self.preformatted -= 1;
                }
            }
            NodeKind::Comment | NodeKind::Doctype => {}
        }
    }

    fn text(&mut self, content: &str) {
        if self.preformatted == 0 && content.trim().is_empty() {
            if !self.current.is_empty() && !self.current.ends_with(char::is_whitespace) {
                self.current.push(' ');
            }
            return;
        }
        for (i, segment) in content.split('\n').enumerate() {
            if i > 0 {
                self.end_line();
            }
            self.current.push_str(segment);
        }
    }

    /// Break for `<br>` or a block boundary. Does nothing on an empty line.
    fn generated_break(&mut self) {
        if self.current.trim().is_empty() {
            self.current.clear();
        } else {
            self.end_line();
        }
    }

    fn end_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        let line = if self.preformatted > 0 {
            line.trim_end()
        } else {
            line.trim()
        };
        self.lines.push(line.to_owned());
    }

    fn finish(mut self, collapse_linebreaks: bool) -> String {
        self.generated_break();
        if collapse_linebreaks {
            return self
                .lines
                .iter()
                .map(String::as_str)
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }
        let first = self.lines.iter().position(|line| !line.is_empty());
        let last = self.lines.iter().rposition(|line| !line.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => self.lines[first..=last].join("\n"),
            _ => String::new(),
        }
    }
}
