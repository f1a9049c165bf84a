//! Per-line grammars of the OCCI text rendering.
//!
//! Each function parses the value of one header line (the part after
//! `Name:`) into a typed line. Errors are plain messages; the caller adds
//! the line number.
//!
//! ```text
//! category  = term *( ";" param )
//! param     = name "=" ( quoted | word | uri )
//! attribute = name "=" ( quoted | number | "true" | "false" )
//! link      = "<" uri ">" *( ";" param )
//! location  = uri | word
//! ```

use super::lexer::{Token, TokenKind, tokenize};
use crate::attributes::AttributeValue;
use crate::category::CategoryClass;

type LineResult<T> = std::result::Result<T, String>;

// ============================================================================
// LINES
// ============================================================================

/// A `Category:` value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLine {
    pub term: String,
    pub scheme: String,
    pub class: CategoryClass,
    pub title: Option<String>,
    pub rel: Vec<String>,
    pub location: Option<String>,
    pub attributes: Vec<AttributeDeclaration>,
    pub actions: Vec<String>,
}

impl CategoryLine {
    pub fn identifier(&self) -> String {
        format!("{}{}", self.scheme, self.term)
    }
}

/// One entry of a category's `attributes="..."` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDeclaration {
    pub name: String,
    pub required: bool,
    pub mutable: bool,
}

/// An `X-OCCI-Attribute:` value, or an inline link attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeLine {
    pub name: String,
    pub value: AttributeValue,
}

/// A `Link:` value.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkLine {
    pub target: String,
    pub rel: Option<String>,
    pub self_location: Option<String>,
    pub categories: Vec<String>,
    pub attributes: Vec<AttributeLine>,
}

impl LinkLine {
    /// Whether this line links an action (`</location?action=term>`).
    pub fn is_action(&self) -> bool {
        self.target.contains("?action=")
    }
}

// ============================================================================
// CURSOR
// ============================================================================

struct Cursor<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(value: &'a str) -> LineResult<Self> {
        let tokens = tokenize(value);
        if let Some(bad) = tokens.iter().find(|t| t.kind == TokenKind::Error) {
            return Err(format!("unexpected input {:?}", bad.text));
        }
        Ok(Self { tokens, pos: 0 })
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> LineResult<Token<'a>> {
        match self.bump() {
            Some(token) if token.kind == kind => Ok(token),
            Some(token) => Err(format!("expected {what}, found {:?}", token.text)),
            None => Err(format!("expected {what}, found end of line")),
        }
    }

    /// `*( ";" name "=" value )` up to the end of the line.
    fn params(&mut self) -> LineResult<Vec<(String, Token<'a>)>> {
        let mut params = Vec::new();
        while !self.at_end() {
            self.expect(TokenKind::Semicolon, "';'")?;
            if self.at_end() {
                break;
            }
            let name = self.expect(TokenKind::Word, "parameter name")?;
            self.expect(TokenKind::Equals, "'='")?;
            let value = match self.bump() {
                Some(t) if matches!(t.kind, TokenKind::Quoted | TokenKind::Word | TokenKind::Uri) => t,
                Some(t) => return Err(format!("bad value {:?} for {}", t.text, name.text)),
                None => return Err(format!("missing value for {}", name.text)),
            };
            params.push((name.text.to_string(), value));
        }
        Ok(params)
    }
}

/// String content of a parameter value, whatever its quoting.
fn text_of(token: &Token<'_>) -> String {
    match token.kind {
        TokenKind::Quoted => token.unquoted(),
        TokenKind::Uri => token.uri().to_string(),
        _ => token.text.to_string(),
    }
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Attribute literal: quoted string, boolean or number.
fn literal(token: &Token<'_>) -> LineResult<AttributeValue> {
    match token.kind {
        TokenKind::Quoted => Ok(AttributeValue::String(token.unquoted())),
        TokenKind::Word => AttributeValue::from_bare_literal(token.text)
            .ok_or_else(|| format!("invalid attribute value {:?}", token.text)),
        _ => Err(format!("invalid attribute value {:?}", token.text)),
    }
}

// ============================================================================
// LINE PARSERS
// ============================================================================

/// `term; scheme="..."; class="..."[; title=..][; rel=..][; location=..][; attributes=..][; actions=..]`
pub fn category(value: &str) -> LineResult<CategoryLine> {
    let mut cursor = Cursor::new(value)?;
    let term = cursor.expect(TokenKind::Word, "category term")?.text.to_string();

    let mut scheme = None;
    let mut class = None;
    let mut line = CategoryLine {
        term,
        scheme: String::new(),
        class: CategoryClass::Kind,
        title: None,
        rel: Vec::new(),
        location: None,
        attributes: Vec::new(),
        actions: Vec::new(),
    };
    for (name, token) in cursor.params()? {
        let text = text_of(&token);
        match name.as_str() {
            "scheme" => scheme = Some(text),
            "class" => {
                class = Some(CategoryClass::parse(&text).map_err(|_| format!("unknown class {text:?}"))?)
            }
            "title" => line.title = Some(text),
            "rel" => line.rel = words(&text),
            "location" => line.location = Some(text),
            "attributes" => line.attributes = attribute_declarations(&text)?,
            "actions" => line.actions = words(&text),
            other => tracing::trace!(parameter = other, "ignoring category parameter"),
        }
    }
    line.scheme = scheme.ok_or("category without scheme")?;
    line.class = class.ok_or("category without class")?;
    Ok(line)
}

/// `name1 name2{required} name3{immutable required}`
pub fn attribute_declarations(text: &str) -> LineResult<Vec<AttributeDeclaration>> {
    let mut declarations = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let end = rest
            .find(|c: char| c.is_whitespace() || c == '{')
            .unwrap_or(rest.len());
        let name = &rest[..end];
        rest = &rest[end..];
        if name.is_empty() {
            return Err(format!("attribute flags without a name in {text:?}"));
        }

        let mut declaration = AttributeDeclaration {
            name: name.to_string(),
            required: false,
            mutable: true,
        };
        if let Some(flags) = rest.strip_prefix('{') {
            let close = flags
                .find('}')
                .ok_or_else(|| format!("unclosed flags after {name}"))?;
            for flag in flags[..close].split_whitespace() {
                match flag {
                    "required" => declaration.required = true,
                    "immutable" => declaration.mutable = false,
                    other => return Err(format!("unknown attribute flag {other:?}")),
                }
            }
            rest = &flags[close + 1..];
        }
        declarations.push(declaration);
        rest = rest.trim_start();
    }
    Ok(declarations)
}

/// `name=literal`
pub fn attribute(value: &str) -> LineResult<AttributeLine> {
    let mut cursor = Cursor::new(value)?;
    let name = cursor.expect(TokenKind::Word, "attribute name")?.text.to_string();
    cursor.expect(TokenKind::Equals, "'='")?;
    let token = cursor
        .bump()
        .ok_or_else(|| format!("missing value for {name}"))?;
    let value = literal(&token)?;
    if let Some(extra) = cursor.peek() {
        return Err(format!("unexpected {:?} after attribute value", extra.text));
    }
    Ok(AttributeLine { name, value })
}

/// `<target>; rel="..."[; self="..."][; category="..."]*( ; name=literal )`
pub fn link(value: &str) -> LineResult<LinkLine> {
    let mut cursor = Cursor::new(value)?;
    let target = cursor.expect(TokenKind::Uri, "link target")?.uri().to_string();
    let mut line = LinkLine {
        target,
        rel: None,
        self_location: None,
        categories: Vec::new(),
        attributes: Vec::new(),
    };
    for (name, token) in cursor.params()? {
        match name.as_str() {
            "rel" => line.rel = Some(text_of(&token)),
            "self" => line.self_location = Some(text_of(&token)),
            "category" => line.categories = words(&text_of(&token)),
            _ => line.attributes.push(AttributeLine {
                value: literal(&token)?,
                name,
            }),
        }
    }
    Ok(line)
}

/// `<uri>` or a bare uri.
pub fn location(value: &str) -> LineResult<String> {
    let mut cursor = Cursor::new(value)?;
    let location = match cursor.bump() {
        Some(t) if t.kind == TokenKind::Uri => t.uri().to_string(),
        Some(t) if t.kind == TokenKind::Word => t.text.to_string(),
        Some(t) => return Err(format!("invalid location {:?}", t.text)),
        None => return Err("empty location".to_string()),
    };
    if let Some(extra) = cursor.peek() {
        return Err(format!("unexpected {:?} after location", extra.text));
    }
    Ok(location)
}
