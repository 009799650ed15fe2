//! Tests for the HTML tokenizer state machine.

use sorrel_html::tokenizer::{Attribute, HTMLTokenizer, Token, TokenSink, TokenizerState, tokenize};

/// Helper: tokens with consecutive characters merged into one text entry,
/// rendered with `Token`'s Display except for text.
fn summarize(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut text = String::new();
    for token in tokenize(input) {
        if let Token::Character { data } = token {
            text.push(data);
            continue;
        }
        if !text.is_empty() {
            out.push(format!("text({})", std::mem::take(&mut text)));
        }
        out.push(token.to_string());
    }
    out
}

fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
    pairs
        .iter()
        .map(|&(n, v)| Attribute::new(n.to_string(), v.to_string()))
        .collect()
}

// ========== tags ==========

#[test]
fn test_start_and_end_tags() {
    assert_eq!(
        summarize("<p>Hello</p>"),
        vec!["<p>", "text(Hello)", "</p>", "EOF"]
    );
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DiV></DIV>");
    assert_eq!(tokens[0], Token::StartTag {
        name: "div".to_string(),
        self_closing: false,
        attributes: Vec::new(),
    });
    assert!(matches!(&tokens[1], Token::EndTag { name, .. } if name == "div"));
}

#[test]
fn test_attribute_forms() {
    let tokens = tokenize(r#"<a href="x y" title='it"s' data=z checked ID=Main>"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag, got {}", tokens[0]);
    };
    assert_eq!(
        *attributes,
        attrs(&[
            ("href", "x y"),
            ("title", "it\"s"),
            ("data", "z"),
            ("checked", ""),
            ("ID", "Main"),
        ])
    );
}

#[test]
fn test_duplicate_attributes_keep_first() {
    let tokens = tokenize("<a x=1 X=2 y=3 x=4>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected a start tag");
    };
    assert_eq!(*attributes, attrs(&[("x", "1"), ("y", "3")]));
}

#[test]
fn test_self_closing() {
    assert!(matches!(
        &tokenize("<br/>")[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
    let tokens = tokenize("<img src=a.png />");
    let Token::StartTag {
        self_closing,
        attributes,
        ..
    } = &tokens[0]
    else {
        panic!("expected a start tag");
    };
    assert!(*self_closing);
    assert_eq!(*attributes, attrs(&[("src", "a.png")]));
}

#[test]
fn test_less_than_that_does_not_open_a_tag_is_text() {
    assert_eq!(summarize("a < b"), vec!["text(a < b)", "EOF"]);
    assert_eq!(summarize("1 <3"), vec!["text(1 <3)", "EOF"]);
}

// ========== rawtext ==========

#[test]
fn test_rawtext_content_is_not_markup() {
    assert_eq!(
        summarize(r#"<script>if (a < b) { s = "<div>"; }</script><p>"#),
        vec![
            "<script>",
            r#"text(if (a < b) { s = "<div>"; })"#,
            "</script>",
            "<p>",
            "EOF"
        ]
    );
}

#[test]
fn test_rawtext_only_ends_at_its_own_end_tag() {
    assert_eq!(
        summarize("<style>a</styles></p></STYLE>"),
        vec!["<style>", "text(a</styles></p>)", "</style>", "EOF"]
    );
    assert_eq!(
        summarize("<title>x</title >y"),
        vec!["<title>", "text(x)", "</title>", "text(y)", "EOF"]
    );
}

#[test]
fn test_self_closing_rawtext_tag_stays_in_data() {
    assert_eq!(
        summarize("<script/><b>"),
        vec!["<script />", "<b>", "EOF"]
    );
}

#[test]
fn test_unterminated_rawtext_runs_to_eof() {
    assert_eq!(
        summarize("<textarea><b></"),
        vec!["<textarea>", "text(<b></)", "EOF"]
    );
}

// ========== comments and declarations ==========

#[test]
fn test_comments() {
    assert_eq!(
        tokenize("<!-- hi -->")[0],
        Token::Comment {
            data: " hi ".to_string(),
            bogus: false
        }
    );
    assert_eq!(summarize("<!---->"), vec!["<!---->", "EOF"]);
    assert_eq!(summarize("<!--a -- b-->"), vec!["<!--a -- b-->", "EOF"]);
    assert_eq!(summarize("<!--x--->"), vec!["<!--x--->", "EOF"]);
}

#[test]
fn test_bogus_comments() {
    assert_eq!(
        tokenize(r#"<?xml version="1.0"?>"#)[0],
        Token::Comment {
            data: r#"?xml version="1.0"?"#.to_string(),
            bogus: true
        }
    );
    assert_eq!(summarize("<!ELEMENT br EMPTY>"), vec!["Bogus(ELEMENT br EMPTY)", "EOF"]);
    assert_eq!(summarize("<![CDATA[x]]>"), vec!["Bogus([CDATA[x]])", "EOF"]);
    assert_eq!(summarize("</ 3>"), vec!["Bogus( 3)", "EOF"]);
}

#[test]
fn test_doctype() {
    assert_eq!(
        tokenize("<!DOCTYPE html>")[0],
        Token::Doctype {
            name: "html".to_string()
        }
    );
    assert_eq!(
        summarize(r#"<!doctype HTML PUBLIC "-//W3C//DTD HTML 4.01//EN">x"#),
        vec!["DOCTYPE html", "text(x)", "EOF"]
    );
    assert_eq!(summarize("<!DOCTYPE>"), vec!["DOCTYPE ", "EOF"]);
}

// ========== end of input ==========

#[test]
fn test_eof_inside_tag_drops_the_tag() {
    assert_eq!(summarize("ab<div class=\"x"), vec!["text(ab)", "EOF"]);
    assert_eq!(summarize("<p"), vec!["EOF"]);
}

#[test]
fn test_eof_inside_attribute_name_drops_the_tag() {
    assert_eq!(summarize("x<a hre"), vec!["text(x)", "EOF"]);
    assert_eq!(summarize("<a href"), vec!["EOF"]);
}

#[test]
fn test_eof_inside_comment_emits_it() {
    assert_eq!(summarize("<!-- open"), vec!["<!-- open-->", "EOF"]);
    assert_eq!(summarize("<!DOCTYPE html"), vec!["DOCTYPE html", "EOF"]);
}

#[test]
fn test_eof_after_less_than() {
    assert_eq!(summarize("a<"), vec!["text(a<)", "EOF"]);
    assert_eq!(summarize("a</"), vec!["text(a</)", "EOF"]);
}

#[test]
fn test_empty_end_tag_is_dropped() {
    assert_eq!(summarize("a</>b"), vec!["text(ab)", "EOF"]);
}

#[test]
fn test_always_ends_with_single_eof() {
    for input in ["", "x", "<a", "<!--", "<script>", "</", "<a b='"] {
        let tokens = tokenize(input);
        assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1, "{input:?}");
        assert!(tokens.last().is_some_and(Token::is_eof), "{input:?}");
    }
}

// ========== sinks ==========

/// Counts tokens instead of storing them.
#[derive(Default)]
struct Counter {
    tags: usize,
    characters: usize,
}

impl TokenSink for Counter {
    fn process_token(&mut self, token: Token) {
        match token {
            Token::StartTag { .. } | Token::EndTag { .. } => self.tags += 1,
            Token::Character { .. } => self.characters += 1,
            _ => {}
        }
    }
}

#[test]
fn test_custom_sink() {
    let mut tokenizer = HTMLTokenizer::new("<b>bold</b> text", Counter::default());
    assert_eq!(tokenizer.state(), TokenizerState::Data);
    tokenizer.run();
    let counter = tokenizer.into_sink();
    assert_eq!(counter.tags, 2);
    assert_eq!(counter.characters, 9);
}
