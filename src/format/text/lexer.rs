//! Logos-based lexer for OCCI header values.

use logos::Logos;

/// A token with its kind and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Text of a `<uri>` token without the angle brackets.
    pub fn uri(&self) -> &'a str {
        self.text
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .unwrap_or(self.text)
    }

    /// Inner text of a quoted token, escapes removed.
    pub fn unquoted(&self) -> String {
        let inner = self
            .text
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(self.text);
        crate::attributes::unescape(inner)
    }
}

/// Lexer wrapping the logos-generated tokenizer.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(TokenKind::Error);
        Some(Token {
            kind,
            text: self.inner.slice(),
        })
    }
}

/// Tokenize a header value, dropping whitespace.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input)
        .filter(|t| t.kind != TokenKind::Whitespace)
        .collect()
}

/// Split a header value on commas outside quotes and `<...>`.
pub fn split_header_value(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut lexer = TokenKind::lexer(value);
    let mut start = 0;
    while let Some(token) = lexer.next() {
        if token == Ok(TokenKind::Comma) {
            parts.push(value[start..lexer.span().start].trim());
            start = lexer.span().end;
        }
    }
    parts.push(value[start..].trim());
    parts.retain(|part| !part.is_empty());
    parts
}

/// Token kinds of the OCCI text rendering.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"<[^<>]*>")]
    Uri,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,

    #[token(";")]
    Semicolon,

    #[token("=")]
    Equals,

    #[token(",")]
    Comma,

    #[regex(r#"[^ \t\r\n;=,"<>]+"#)]
    Word,

    /// Input no rule matches, such as an unterminated quote.
    Error,
}
