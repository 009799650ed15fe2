//! Helper functions for the tokenizer state machine.
//!
//! - State transitions ("switch to", "reconsume in")
//! - Input lookahead and consumption
//! - Token emission, including the switch into rawtext
//! - Rawtext end tag recovery
//! - Parse error reporting

use sorrel_common::warning::warn_once;

use super::TokenSink;
use super::machine::{HTMLTokenizer, TokenizerState};
use super::token::Token;

/// Elements whose content is read verbatim up to their own end tag.
pub const RAWTEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes", "noscript",
];

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// Move to a new state. The next character is consumed on the next
    /// iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Move to a new state and process the current character again there.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// Returns the character at the current position and advances past it,
    /// or None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Look at the character `offset` places ahead without consuming it.
    #[must_use]
    pub fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Whether the upcoming input starts with `target` exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Whether the upcoming input starts with `target`, ignoring ASCII case.
    #[must_use]
    pub fn next_few_characters_are_case_insensitive(&self, target: &str) -> bool {
        target
            .chars()
            .enumerate()
            .all(|(i, expected)| {
                self.peek_codepoint(i)
                    .is_some_and(|c| c.eq_ignore_ascii_case(&expected))
            })
    }

    /// Skip over `target`, which the caller has already matched.
    /// Only used with ASCII keywords, so bytes and characters agree.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Tab, line feed, form feed and space. Carriage returns are text.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// Hand the current token to the sink.
    ///
    /// Repeated attribute names are dropped here, keeping the first. A start
    /// tag for a rawtext element that is not self-closing switches the
    /// tokenizer into [`TokenizerState::RawText`].
    pub(super) fn emit_token(&mut self) {
        let Some(mut token) = self.current_token.take() else {
            return;
        };

        for name in token.remove_duplicate_attributes() {
            self.log_parse_error(&format!("duplicate attribute {name}"));
        }

        match token {
            Token::StartTag {
                ref name,
                self_closing,
                ..
            } => {
                self.last_start_tag_name = Some(name.clone());
                if !self_closing && RAWTEXT_ELEMENTS.contains(&name.as_str()) {
                    self.switch_to(TokenizerState::RawText);
                }
            }
            Token::EndTag { ref attributes, .. } if !attributes.is_empty() => {
                self.log_parse_error("end tag with attributes");
            }
            _ => {}
        }

        log::trace!(target: "sorrel.tokenizer", "{token}");
        self.sink.process_token(token);
    }

    /// Emit one character of text.
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.sink.process_token(Token::new_character(c));
    }

    /// Emit the end-of-file token. The main loop stops after this.
    pub(super) fn emit_eof_token(&mut self) {
        self.at_eof = true;
        self.sink.process_token(Token::EndOfFile);
    }

    /// Input ended inside a tag: the unfinished tag is dropped.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_parse_error("eof in tag");
        self.current_token = None;
        self.emit_eof_token();
    }

    /// Input ended inside a comment: what was read is still emitted.
    pub(super) fn eof_in_comment(&mut self) {
        self.log_parse_error("eof in comment");
        self.emit_token();
        self.emit_eof_token();
    }
}

// =============================================================================
// RawText Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// An end tag naming the element whose rawtext body is being read.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// Give up on a candidate end tag: `</` and the buffered name go out as
    /// text and the current character is processed again as rawtext.
    pub(super) fn emit_rawtext_end_tag_name_anything_else(&mut self) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_token = None;
        self.reconsume_in(TokenizerState::RawText);
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// Parse errors are never fatal; they are reported once each and the
    /// tokenizer recovers.
    pub(super) fn log_parse_error(&self, what: &str) {
        let pos = self.current_pos;
        warn_once("HTML Tokenizer", &format!("{what} at position {pos}"));
    }
}
