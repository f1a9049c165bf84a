//! Validated attribute definitions used by the category layer.

use regex::Regex;
use serde_json::{Map, Value};

use super::properties::{Properties, PropertyType};
use super::value::AttributeValue;
use crate::base::constants::DEFAULT_PATTERN;
use crate::error::{OcciError, Result};

/// Type tag of an attribute definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeType {
    String,
    /// Any number; integers and floats both qualify.
    Numeric,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    /// Reference to an entity (or its location string).
    Entity,
    /// Reference to a category (or its identifier string).
    Category,
}

impl AttributeType {
    /// Look up a JSON rendering type name.
    pub fn from_json_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "number" => Some(Self::Numeric),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// The JSON rendering type name.
    pub fn json_name(&self) -> &'static str {
        match self {
            Self::String | Self::Entity | Self::Category => "string",
            Self::Numeric | Self::Integer | Self::Float => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether a value of this runtime type satisfies the tag.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        use AttributeValue as V;
        match self {
            Self::String => matches!(value, V::String(_)),
            Self::Numeric => value.is_numeric(),
            Self::Integer => matches!(value, V::Integer(_)),
            Self::Float => matches!(value, V::Float(_)),
            Self::Boolean => matches!(value, V::Boolean(_)),
            Self::Array => matches!(value, V::Array(_)),
            Self::Object => matches!(value, V::Object(_)),
            Self::Entity => matches!(value, V::Entity(_) | V::String(_)),
            Self::Category => matches!(value, V::Category(_) | V::String(_)),
        }
    }

    /// Whether values of this type are matched against patterns.
    pub fn is_string_like(&self) -> bool {
        matches!(self, Self::String | Self::Entity | Self::Category)
    }
}

impl From<PropertyType> for AttributeType {
    fn from(kind: PropertyType) -> Self {
        match kind {
            PropertyType::String => Self::String,
            PropertyType::Number => Self::Numeric,
            PropertyType::Boolean => Self::Boolean,
        }
    }
}

/// A compiled attribute pattern, matched against the whole value.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{source})$")).map_err(|e| OcciError::Pattern {
            pattern: source.to_string(),
            source: e,
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// The declared shape of one attribute, as held by categories and
/// [`Attributes`](super::Attributes).
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeDefinition {
    attr_type: AttributeType,
    pub required: bool,
    pub mutable: bool,
    pub default: Option<AttributeValue>,
    pub description: Option<String>,
    pattern: Option<Pattern>,
}

impl AttributeDefinition {
    /// Create an optional, immutable definition of the given type.
    pub fn new(attr_type: AttributeType) -> Self {
        Self {
            attr_type,
            required: false,
            mutable: false,
            default: None,
            description: None,
            pattern: None,
        }
    }

    pub fn attr_type(&self) -> AttributeType {
        self.attr_type
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    pub fn with_default(mut self, default: impl Into<AttributeValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a pattern. The match-anything pattern `.*` is not stored.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self> {
        self.pattern = if pattern == DEFAULT_PATTERN {
            None
        } else {
            Some(Pattern::new(pattern)?)
        };
        Ok(self)
    }

    /// Whether the value's runtime type satisfies this definition.
    pub fn accepts_type(&self, value: &AttributeValue) -> bool {
        self.attr_type.accepts(value)
    }

    /// Whether the value satisfies the pattern. Values that are not
    /// string-like, and definitions without a pattern, always match.
    pub fn matches_pattern(&self, value: &AttributeValue) -> bool {
        match (&self.pattern, value.as_str()) {
            (Some(pattern), Some(text)) if self.attr_type.is_string_like() => {
                pattern.is_match(text)
            }
            _ => true,
        }
    }

    /// Check a value against the type and pattern (`valid!`).
    pub fn validate(&self, value: &AttributeValue) -> Result<()> {
        if !value.is_finite() {
            return Err(OcciError::attribute_validation(format!(
                "{value} is not a finite number"
            )));
        }
        if !self.accepts_type(value) {
            return Err(OcciError::attribute_validation(format!(
                "{} value {value} is not of type {:?}",
                value.type_name(),
                self.attr_type
            )));
        }
        if !self.matches_pattern(value) {
            let pattern = self.pattern.as_ref().map(Pattern::as_str).unwrap_or_default();
            let shown = value.to_string();
            return Err(OcciError::attribute_validation(format!(
                "value {shown:?} does not match pattern {pattern:?}"
            )));
        }
        Ok(())
    }

    /// Boolean form of [`validate`](Self::validate) (`valid?`).
    pub fn is_valid(&self, value: &AttributeValue) -> bool {
        self.validate(value).is_ok()
    }

    /// Declaration view of this definition.
    pub fn to_properties(&self) -> Properties {
        let property_type = match self.attr_type {
            AttributeType::Numeric | AttributeType::Integer | AttributeType::Float => {
                PropertyType::Number
            }
            AttributeType::Boolean => PropertyType::Boolean,
            _ => PropertyType::String,
        };
        Properties {
            property_type,
            required: self.required,
            mutable: self.mutable,
            pattern: self
                .pattern
                .as_ref()
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            default: self.default.clone(),
            description: self.description.clone(),
        }
    }

    /// JSON rendering of this definition.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(self.attr_type.json_name()));
        obj.insert("required".to_string(), Value::Bool(self.required));
        obj.insert("mutable".to_string(), Value::Bool(self.mutable));
        if let Some(ref default) = self.default {
            obj.insert("default".to_string(), default.to_json());
        }
        if let Some(ref description) = self.description {
            obj.insert("description".to_string(), Value::from(description.as_str()));
        }
        if let Some(ref pattern) = self.pattern {
            obj.insert("pattern".to_string(), Value::from(pattern.as_str()));
        }
        Value::Object(obj)
    }
}

impl TryFrom<&Properties> for AttributeDefinition {
    type Error = OcciError;

    fn try_from(props: &Properties) -> Result<Self> {
        let mut definition = Self::new(props.property_type.into())
            .with_required(props.required)
            .with_mutable(props.mutable)
            .with_pattern(&props.pattern)?;
        definition.default = props.default.clone();
        definition.description = props.description.clone();
        Ok(definition)
    }
}
