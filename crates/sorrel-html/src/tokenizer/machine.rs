use strum_macros::Display;

use super::TokenSink;
use super::token::Token;

/// States of the tokenizer. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Text outside of any markup.
    Data,
    /// Body of a rawtext element such as `script`; only its end tag is markup.
    RawText,
    /// After `<`.
    TagOpen,
    /// After `</`.
    EndTagOpen,
    /// Reading a tag name.
    TagName,
    /// After `<` inside rawtext.
    RawTextLessThanSign,
    /// After `</` inside rawtext.
    RawTextEndTagOpen,
    /// Reading what may be the end tag of the rawtext element.
    RawTextEndTagName,
    /// Between attributes.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// Reading an unquoted value.
    AttributeValueUnquoted,
    /// Right after a closing quote.
    AfterAttributeValueQuoted,
    /// After `/` inside a tag.
    SelfClosingStartTag,
    /// Inside a malformed `<!...>` or `<?...>`, up to the next `>`.
    BogusComment,
    /// After `<!`, deciding between comment, doctype and bogus comment.
    MarkupDeclarationOpen,
    /// After `<!--`.
    CommentStart,
    /// After `<!---`.
    CommentStartDash,
    /// Comment body.
    Comment,
    /// After `-` in a comment.
    CommentEndDash,
    /// After `--` in a comment.
    CommentEnd,
    /// After `--!` in a comment.
    CommentEndBang,
    /// After `<!DOCTYPE`.
    Doctype,
    /// Whitespace before the doctype name.
    BeforeDoctypeName,
    /// Reading the doctype name.
    DoctypeName,
    /// After the doctype name; the rest of the declaration is skipped.
    AfterDoctypeName,
}

/// Character-level state machine turning markup into [`Token`]s.
///
/// Every completed token goes straight to the sink; nothing is buffered
/// beyond the token under construction.
///
/// # Example
///
/// ```
/// use sorrel_html::tokenizer::{HTMLTokenizer, Token};
///
/// let mut tokenizer = HTMLTokenizer::new("<p>hi</p>", Vec::new());
/// tokenizer.run();
/// let tokens = tokenizer.into_sink();
/// assert_eq!(tokens.len(), 5);
/// assert!(tokens[4].is_eof());
/// ```
pub struct HTMLTokenizer<'a, S: TokenSink> {
    pub(super) state: TokenizerState,
    pub(super) input: &'a str,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    pub(super) sink: S,
    // When true, the next iteration of the main loop will not consume a new character.
    pub(super) reconsume: bool,

    /// Name of the rawtext element whose body is being read.
    pub(super) last_start_tag_name: Option<String>,

    /// Characters of a candidate rawtext end tag name, as written.
    pub(super) temporary_buffer: String,
}

impl<'a, S: TokenSink> HTMLTokenizer<'a, S> {
    /// Create a tokenizer over `input`, starting in the data state.
    #[must_use]
    pub const fn new(input: &'a str, sink: S) -> Self {
        HTMLTokenizer {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            at_eof: false,
            sink,
            reconsume: false,
            last_start_tag_name: None,
            temporary_buffer: String::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// The sink receiving tokens.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Give back the sink. Call this after [`HTMLTokenizer::run`].
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Text outside markup.
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// Rawtext body: everything is text except a possible end tag.
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.switch_to(TokenizerState::RawTextLessThanSign);
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    fn handle_rawtext_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RawTextEndTagOpen);
            }
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    fn handle_rawtext_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::RawTextEndTagName);
            }
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::RawText);
            }
        }
    }

    /// Only the end tag of the element that opened the rawtext section ends
    /// it; anything else is re-emitted as text.
    fn handle_rawtext_end_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                } else {
                    self.emit_rawtext_end_tag_name_anything_else();
                }
            }
            Some('/') => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                } else {
                    self.emit_rawtext_end_tag_name_anything_else();
                }
            }
            Some('>') => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::Data);
                    self.emit_token();
                } else {
                    self.emit_rawtext_end_tag_name_anything_else();
                }
            }
            Some(c) if c.is_ascii_alphabetic() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            _ => {
                self.emit_rawtext_end_tag_name_anything_else();
            }
        }
    }

    /// After `<`.
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // MarkupDeclarationOpen looks ahead without consuming, so it is
            // entered with the `!` still current.
            Some('!') => {
                self.reconsume_in(TokenizerState::MarkupDeclarationOpen);
            }
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // `<?...>`: the `?` is kept as the first character of the data.
            Some('?') => {
                self.log_parse_error("unexpected question mark instead of tag name");
                self.current_token = Some(Token::new_bogus_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            None => {
                self.log_parse_error("eof before tag name");
                self.emit_character_token('<');
                self.emit_eof_token();
            }
            // `a < b`: the `<` is text.
            Some(_) => {
                self.log_parse_error("invalid first character of tag name");
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// After `<!`, with the `!` as the current character.
    fn handle_markup_declaration_open_state(&mut self) {
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        } else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.switch_to(TokenizerState::Doctype);
        } else {
            // `<![CDATA[...]]>`, `<!ELEMENT ...>` and friends: everything up
            // to `>` after the `!`.
            self.log_parse_error("incorrectly opened comment");
            self.current_token = Some(Token::new_bogus_comment());
            self.switch_to(TokenizerState::BogusComment);
        }
    }

    /// After `</`.
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // `</>` is dropped.
            Some('>') => {
                self.log_parse_error("missing end tag name");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_parse_error("eof before tag name");
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.emit_eof_token();
            }
            Some(_) => {
                self.log_parse_error("invalid first character of tag name");
                self.current_token = Some(Token::new_bogus_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // `<a =x>`: the `=` starts the attribute name.
            Some('=') => {
                self.log_parse_error("unexpected equals sign before attribute name");
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                    token.append_to_current_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// Attribute names keep the case they were written in.
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            None | Some('\t' | '\n' | '\x0C' | ' ' | '/' | '>') => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c) => {
                if matches!(c, '"' | '\'' | '<') {
                    self.log_parse_error("unexpected character in attribute name");
                }
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
            }
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_tag();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            // `<a href=>`: empty value.
            Some('>') => {
                self.log_parse_error("missing attribute value");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.log_parse_error("unexpected character in unquoted attribute value");
                }
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_tag();
            }
            // `<a x="1"y="2">`
            Some(_) => {
                self.log_parse_error("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(ref mut token) = self.current_token {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_tag();
            }
            // `<a / href=x>`: the stray `/` is ignored.
            Some(_) => {
                self.log_parse_error("unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
            }
            // `<!-->`
            Some('>') => {
                self.log_parse_error("abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            _ => {
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            // `<!--->`
            Some('>') => {
                self.log_parse_error("abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_comment();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
            }
            None => {
                self.eof_in_comment();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            None => {
                self.eof_in_comment();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            Some('!') => {
                self.switch_to(TokenizerState::CommentEndBang);
            }
            // `<!-- a --->`: extra dashes belong to the data.
            Some('-') => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
            }
            None => {
                self.eof_in_comment();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_comment("--");
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_comment("--!");
                }
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('>') => {
                self.log_parse_error("incorrectly closed comment");
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.eof_in_comment();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_comment("--!");
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// After the `DOCTYPE` keyword.
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDoctypeName);
            }
            None => {
                self.log_parse_error("eof in doctype");
                self.current_token = Some(Token::new_doctype());
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if c != '>' {
                    self.log_parse_error("missing whitespace before doctype name");
                }
                self.reconsume_in(TokenizerState::BeforeDoctypeName);
            }
        }
    }

    fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.log_parse_error("missing doctype name");
                self.current_token = Some(Token::new_doctype());
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof in doctype");
                self.current_token = Some(Token::new_doctype());
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                let mut token = Token::new_doctype();
                token.append_to_doctype_name(c.to_ascii_lowercase());
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DoctypeName);
            }
        }
    }

    fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::AfterDoctypeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof in doctype");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    /// Public and system identifiers are not kept.
    fn handle_after_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_token();
            }
            None => {
                self.log_parse_error("eof in doctype");
                self.emit_token();
                self.emit_eof_token();
            }
            Some(_) => {}
        }
    }

    /// Run the tokenizer to completion, feeding every token to the sink.
    /// The last token is always [`Token::EndOfFile`].
    pub fn run(&mut self) {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            if self.current_input_character.is_none() && self.at_eof {
                break;
            }
            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::RawText => self.handle_rawtext_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::RawTextLessThanSign => self.handle_rawtext_less_than_sign_state(),
                TokenizerState::RawTextEndTagOpen => self.handle_rawtext_end_tag_open_state(),
                TokenizerState::RawTextEndTagName => self.handle_rawtext_end_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"');
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'');
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
                TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
                TokenizerState::Doctype => self.handle_doctype_state(),
                TokenizerState::BeforeDoctypeName => self.handle_before_doctype_name_state(),
                TokenizerState::DoctypeName => self.handle_doctype_name_state(),
                TokenizerState::AfterDoctypeName => self.handle_after_doctype_name_state(),
            }
        }
    }
}
