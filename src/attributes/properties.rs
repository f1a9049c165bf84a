//! Attribute declarations as they appear on the wire.

use serde_json::{Map, Value};

use super::value::AttributeValue;
use crate::base::constants::DEFAULT_PATTERN;
use crate::error::{OcciError, Result};

/// Recognized declaration keys, in canonical spelling.
pub const PROPERTY_KEYS: [&str; 6] = [
    "type",
    "required",
    "mutable",
    "pattern",
    "default",
    "description",
];

/// Declared type of an attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyType {
    #[default]
    String,
    Number,
    Boolean,
}

impl PropertyType {
    /// Parse a type name, case-insensitively.
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            other => Err(OcciError::attribute_type(format!(
                "unsupported property type {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    pub fn accepts(&self, value: &AttributeValue) -> bool {
        match self {
            Self::String => matches!(value, AttributeValue::String(_)),
            Self::Number => value.is_numeric(),
            Self::Boolean => matches!(value, AttributeValue::Boolean(_)),
        }
    }
}

/// Declared shape of one attribute: type, flags, pattern, default and description.
#[derive(Clone, Debug, PartialEq)]
pub struct Properties {
    pub property_type: PropertyType,
    pub required: bool,
    pub mutable: bool,
    pub pattern: String,
    pub default: Option<AttributeValue>,
    pub description: Option<String>,
}

impl Default for Properties {
    fn default() -> Self {
        Self::new(PropertyType::String)
    }
}

impl Properties {
    pub fn new(property_type: PropertyType) -> Self {
        Self {
            property_type,
            required: false,
            mutable: false,
            pattern: DEFAULT_PATTERN.to_string(),
            default: None,
            description: None,
        }
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_mutable(mut self, mutable: bool) -> Self {
        self.mutable = mutable;
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
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

    /// Build from a declaration map, matching keys case-insensitively and
    /// filling defaults for absent keys. Unknown keys are ignored.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        let mut props = Self::default();
        let mut default = None;

        for (key, value) in map {
            match key.to_ascii_lowercase().as_str() {
                "type" => props.property_type = PropertyType::parse(expect_str(key, value)?)?,
                "required" => props.required = expect_bool(key, value)?,
                "mutable" => props.mutable = expect_bool(key, value)?,
                "pattern" => props.pattern = expect_str(key, value)?.to_string(),
                "description" => props.description = Some(expect_str(key, value)?.to_string()),
                "default" => default = AttributeValue::from_json(value),
                _ => {}
            }
        }

        if let Some(ref value) = default {
            if !props.property_type.accepts(value) {
                return Err(OcciError::attribute_type(format!(
                    "default {value} is not a {}",
                    props.property_type.as_str()
                )));
            }
        }
        props.default = default;
        Ok(props)
    }

    /// Whether `map` is a declaration rather than a nested attribute namespace.
    ///
    /// True iff every key is a recognized property key and no value is a map.
    pub fn contains_props(map: &Map<String, Value>) -> bool {
        map.iter().all(|(key, value)| {
            PROPERTY_KEYS.contains(&key.to_ascii_lowercase().as_str()) && !value.is_object()
        })
    }

    /// True when every field has its default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// JSON form with only the fields that are set.
    pub fn as_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(self.property_type.as_str()));
        obj.insert("required".to_string(), Value::Bool(self.required));
        obj.insert("mutable".to_string(), Value::Bool(self.mutable));
        if self.pattern != DEFAULT_PATTERN {
            obj.insert("pattern".to_string(), Value::from(self.pattern.as_str()));
        }
        if let Some(ref default) = self.default {
            obj.insert("default".to_string(), default.to_json());
        }
        if let Some(ref description) = self.description {
            obj.insert("description".to_string(), Value::from(description.as_str()));
        }
        Value::Object(obj)
    }

    /// All six keys, `null` for unset ones.
    pub fn to_hash(&self) -> Map<String, Value> {
        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(self.property_type.as_str()));
        obj.insert("required".to_string(), Value::Bool(self.required));
        obj.insert("mutable".to_string(), Value::Bool(self.mutable));
        obj.insert("pattern".to_string(), Value::from(self.pattern.as_str()));
        obj.insert(
            "default".to_string(),
            self.default.as_ref().map(AttributeValue::to_json).unwrap_or(Value::Null),
        );
        obj.insert(
            "description".to_string(),
            self.description.clone().map(Value::from).unwrap_or(Value::Null),
        );
        obj
    }
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| OcciError::attribute_type(format!("property {key:?} must be a string")))
}

fn expect_bool(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| OcciError::attribute_type(format!("property {key:?} must be a boolean")))
}
