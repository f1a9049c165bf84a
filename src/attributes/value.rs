//! Attribute values.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::base::TypeIdentifier;

/// A value stored under an attribute name.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// String value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// Boolean value.
    Boolean(bool),
    /// List of values.
    Array(Vec<AttributeValue>),
    /// Map of values.
    Object(IndexMap<String, AttributeValue>),
    /// Reference to an entity by location.
    Entity(String),
    /// Reference to a category by identifier.
    Category(TypeIdentifier),
}

impl AttributeValue {
    /// Human-readable name of the runtime type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Entity(_) => "entity",
            Self::Category(_) => "category",
        }
    }

    /// The string form of string-like values (strings and references).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Entity(s) => Some(s),
            Self::Category(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns true for numbers of either representation.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }

    /// Returns true for blank strings.
    pub fn is_blank(&self) -> bool {
        self.as_str().is_some_and(|s| s.trim().is_empty())
    }

    /// Convert a JSON value. `null` has no attribute value.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Boolean(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Self::Integer(i)),
                None => n.as_f64().map(Self::Float),
            },
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Array(items) => Some(Self::Array(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Object(map) => Some(Self::Object(
                map.iter()
                    .filter_map(|(k, v)| Self::from_json(v).map(|v| (k.clone(), v)))
                    .collect(),
            )),
        }
    }

    /// False for a NaN or infinite float, at any depth.
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(f) => f.is_finite(),
            Self::Array(items) => items.iter().all(Self::is_finite),
            Self::Object(map) => map.values().all(Self::is_finite),
            _ => true,
        }
    }

    /// Convert to a JSON value. References become their string form.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Entity(s) => Value::String(s.clone()),
            Self::Category(id) => Value::String(id.to_string()),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }

    /// Render as a text-format literal.
    ///
    /// Strings and references are quoted, numbers and booleans are bare,
    /// arrays and objects are quoted compact JSON. Whole floats keep a
    /// fractional digit so they read back as floats.
    pub fn to_text_literal(&self) -> String {
        match self {
            Self::String(s) | Self::Entity(s) => quote(s),
            Self::Category(id) => quote(id.as_str()),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Self::Float(f) => f.to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Array(_) | Self::Object(_) => quote(&self.to_json().to_string()),
        }
    }

    /// Coerce an unquoted text literal.
    ///
    /// `true`/`false` become booleans; a number with `.` or an exponent
    /// becomes a float, any other number an integer (falling back to float
    /// when it does not fit `i64`). Anything else is not a literal.
    pub fn from_bare_literal(word: &str) -> Option<Self> {
        match word {
            "true" => return Some(Self::Boolean(true)),
            "false" => return Some(Self::Boolean(false)),
            _ => {}
        }
        let numeric = word.chars().any(|c| c.is_ascii_digit())
            && word
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
        if !numeric {
            return None;
        }
        let floating = word.contains(['.', 'e', 'E']);
        if !floating {
            if let Ok(i) = word.parse::<i64>() {
                return Some(Self::Integer(i));
            }
        }
        word.parse::<f64>().ok().map(Self::Float)
    }
}

/// Quote a string for the text rendering.
///
/// Backslash and `"` are escaped with a backslash. Newline, carriage return
/// and tab become `\n`, `\r` and `\t` so a value never spans more than
/// one line.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Undo [`quote`] on the inner text of a quoted string.
pub fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) | Self::Entity(s) => write!(f, "{s}"),
            Self::Category(id) => write!(f, "{id}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Array(_) | Self::Object(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        Self::Integer(v.into())
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<TypeIdentifier> for AttributeValue {
    fn from(id: TypeIdentifier) -> Self {
        Self::Category(id)
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(items: Vec<AttributeValue>) -> Self {
        Self::Array(items)
    }
}
