//! HTML tokenizer.
//!
//! A character-level state machine that turns markup into [`Token`]s and
//! hands each one to a [`TokenSink`] as soon as it is complete. It never
//! fails: malformed markup is logged as a parse error and recovered from.

/// Helper methods for state transitions and token emission.
pub mod helpers;
/// The tokenizer state machine.
pub mod machine;
/// Token types produced by the tokenizer.
pub mod token;

pub use machine::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};

/// Receiver of tokens, in input order.
pub trait TokenSink {
    /// Handle one token. The last token of a run is [`Token::EndOfFile`].
    fn process_token(&mut self, token: Token);
}

impl TokenSink for Vec<Token> {
    fn process_token(&mut self, token: Token) {
        self.push(token);
    }
}

/// Tokenize `input` completely and collect the tokens.
///
/// # Example
///
/// ```
/// use sorrel_html::tokenizer::{tokenize, Token};
///
/// let tokens = tokenize("<br/>");
/// assert!(matches!(tokens[0], Token::StartTag { self_closing: true, .. }));
/// ```
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input, Vec::new());
    tokenizer.run();
    tokenizer.into_sink()
}
