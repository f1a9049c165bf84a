//! Typed, dot-addressable attribute store.
//!
//! An [`Attributes`] value keeps two tables keyed by the full dotted name:
//!
//! ```text
//! Attributes
//! ├── values:      IndexMap<name, Option<AttributeValue>>  (None = declared, unset)
//! ├── definitions: IndexMap<name, AttributeDefinition>
//! └── policy:      ValidationPolicy
//! ```
//!
//! Namespaces such as `occi.core` are implied by the dotted names; nested
//! JSON maps are flattened by [`Attributes::parse`] and rebuilt by
//! [`Attributes::to_nested`].

mod definition;
mod properties;
mod value;

pub use definition::{AttributeDefinition, AttributeType, Pattern};
pub use properties::{PROPERTY_KEYS, Properties, PropertyType};
pub use value::{AttributeValue, quote, unescape};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::warn;

use crate::base::{ValidationPolicy, naming};
use crate::error::{OcciError, Result};

/// Ordered store of attribute values and their definitions.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    values: IndexMap<String, Option<AttributeValue>>,
    definitions: IndexMap<String, AttributeDefinition>,
    policy: ValidationPolicy,
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.definitions == other.definitions
    }
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single undefined value. `name` must already be a
    /// valid attribute name.
    pub(crate) fn from_value(name: &str, value: AttributeValue) -> Self {
        let mut attrs = Self::default();
        attrs.values.insert(name.to_string(), Some(value));
        attrs
    }

    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ValidationPolicy) {
        self.policy = policy;
    }

    /// Number of known names, set or not.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether `name` is known as an attribute or as a namespace.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.has_namespace(name)
    }

    fn has_namespace(&self, prefix: &str) -> bool {
        self.values
            .keys()
            .any(|name| name.len() > prefix.len() && name.starts_with(prefix) && name.as_bytes()[prefix.len()] == b'.')
    }

    /// The value stored under `name`, if set.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Dotted lookup that distinguishes unknown namespaces.
    ///
    /// Fails with `AttributeMissing` when the namespace above `name` does not
    /// exist; an unknown leaf inside an existing namespace reads as `None`.
    pub fn fetch(&self, name: &str) -> Result<Option<&AttributeValue>> {
        if let Some(slot) = self.values.get(name) {
            return Ok(slot.as_ref());
        }
        match name.rsplit_once('.') {
            Some((parent, _)) if !self.has_namespace(parent) => {
                Err(OcciError::attribute_missing(parent))
            }
            _ => Ok(None),
        }
    }

    /// String value under `name`, if set and string-like.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_str)
    }

    /// Assign a value, checking it against any definition for `name`.
    pub fn set(&mut self, name: &str, value: impl Into<AttributeValue>) -> Result<()> {
        naming::check_attribute_name(name)?;
        let value = value.into();
        if !value.is_finite() {
            return Err(OcciError::attribute_type(format!(
                "{name}: {value} is not a finite number"
            )));
        }
        if let Some(definition) = self.definitions.get(name) {
            self.check_assignment(name, definition, &value)?;
        }
        self.values.insert(name.to_string(), Some(value));
        Ok(())
    }

    fn check_assignment(
        &self,
        name: &str,
        definition: &AttributeDefinition,
        value: &AttributeValue,
    ) -> Result<()> {
        if !definition.accepts_type(value) {
            return Err(OcciError::attribute_type(format!(
                "{name}: {} value is not of type {:?}",
                value.type_name(),
                definition.attr_type()
            )));
        }
        if !self.policy.verify_attribute_pattern || definition.matches_pattern(value) {
            return Ok(());
        }
        let pattern = definition.pattern().map(Pattern::as_str).unwrap_or_default();
        if self.policy.compatibility {
            warn!(attribute = name, pattern, "value does not match pattern, accepted in compatibility mode");
            Ok(())
        } else {
            Err(OcciError::attribute_type(format!(
                "{name}: value {:?} does not match pattern {pattern:?}",
                value.to_string()
            )))
        }
    }

    /// Declare `name` without a value. An existing value is kept.
    pub fn declare(&mut self, name: &str) -> Result<()> {
        naming::check_attribute_name(name)?;
        self.values.entry(name.to_string()).or_insert(None);
        Ok(())
    }

    /// Clear the value under `name`, keeping the name and its definition.
    pub fn unset(&mut self, name: &str) -> Option<AttributeValue> {
        self.values.get_mut(name).and_then(Option::take)
    }

    /// Install a definition for `name`.
    pub fn define(&mut self, name: &str, definition: AttributeDefinition) -> Result<()> {
        self.declare(name)?;
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    /// Install a declaration for `name`; its default, if any, becomes the value.
    pub fn set_properties(&mut self, name: &str, properties: &Properties) -> Result<()> {
        let definition = AttributeDefinition::try_from(properties)?;
        let default = definition.default.clone();
        self.define(name, definition)?;
        if let Some(default) = default {
            self.set(name, default)?;
        }
        Ok(())
    }

    pub fn definition(&self, name: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(name)
    }

    /// Declaration view of the definition under `name`.
    pub fn properties(&self, name: &str) -> Option<Properties> {
        self.definitions.get(name).map(AttributeDefinition::to_properties)
    }

    pub fn definitions(&self) -> impl Iterator<Item = (&str, &AttributeDefinition)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// Every known name mapped to its value.
    pub fn names(&self) -> IndexMap<String, Option<AttributeValue>> {
        self.values.clone()
    }

    /// Remove `name` with its value and definition.
    pub fn remove_name(&mut self, name: &str) -> Option<AttributeValue> {
        self.definitions.shift_remove(name);
        self.values.shift_remove(name).flatten()
    }

    /// Remove every name `other` knows, together with its definition.
    pub fn remove(&mut self, other: &Attributes) {
        for name in other.values.keys().chain(other.definitions.keys()) {
            self.remove_name(name);
        }
    }

    /// Add names, values and definitions missing here. Nothing already
    /// present is overwritten.
    pub fn merge(&mut self, other: &Attributes) {
        for (name, definition) in &other.definitions {
            self.definitions
                .entry(name.clone())
                .or_insert_with(|| definition.clone());
        }
        for (name, value) in &other.values {
            let slot = self.values.entry(name.clone()).or_insert(None);
            if slot.is_none() {
                *slot = value.clone();
            }
        }
    }

    /// Definition-only mirror: every value erased, every definition kept.
    pub fn convert(&self) -> Attributes {
        let mut converted = self.clone();
        converted.convert_in_place();
        converted
    }

    /// In-place form of [`convert`](Self::convert).
    pub fn convert_in_place(&mut self) {
        for slot in self.values.values_mut() {
            *slot = None;
        }
    }

    /// Fill unset values from definition defaults.
    pub fn apply_defaults(&mut self) {
        for (name, definition) in &self.definitions {
            if let Some(ref default) = definition.default {
                let slot = self.values.entry(name.clone()).or_insert(None);
                if slot.is_none() {
                    *slot = Some(default.clone());
                }
            }
        }
    }

    /// The sub-store below `prefix`, with the prefix stripped.
    pub fn namespace(&self, prefix: &str) -> Result<Attributes> {
        if !self.has_namespace(prefix) {
            return Err(OcciError::attribute_missing(prefix));
        }
        let strip = |name: &str| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('.'))
                .map(str::to_string)
        };
        let mut sub = Attributes::with_policy(self.policy);
        for (name, value) in &self.values {
            if let Some(short) = strip(name) {
                sub.values.insert(short, value.clone());
            }
        }
        for (name, definition) in &self.definitions {
            if let Some(short) = strip(name) {
                sub.definitions.insert(short, definition.clone());
            }
        }
        Ok(sub)
    }

    /// Graft `other` below `prefix`. Values go through [`set`](Self::set).
    pub fn insert_namespace(&mut self, prefix: &str, other: &Attributes) -> Result<()> {
        for (name, definition) in &other.definitions {
            self.define(&format!("{prefix}.{name}"), definition.clone())?;
        }
        for (name, value) in &other.values {
            let full = format!("{prefix}.{name}");
            match value {
                Some(value) => self.set(&full, value.clone())?,
                None => self.declare(&full)?,
            }
        }
        Ok(())
    }

    /// Validate every definition: required values present, values well-typed
    /// and matching their pattern (subject to the policy).
    pub fn check(&self) -> Result<()> {
        for (name, definition) in &self.definitions {
            match self.get(name) {
                None if definition.required => {
                    return Err(OcciError::attribute_validation(format!(
                        "required attribute {name} is missing"
                    )));
                }
                None => {}
                Some(value) => {
                    self.check_assignment(name, definition, value)
                        .map_err(|e| OcciError::attribute_validation(e.to_string()))?;
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Conversions
    // ------------------------------------------------------------------

    /// Build from a nested (or flat dotted) map. Leaves that look like
    /// declarations become definitions; other maps are namespaces.
    pub fn parse(map: &Map<String, Value>) -> Result<Self> {
        Self::parse_with_policy(map, ValidationPolicy::default())
    }

    pub fn parse_with_policy(map: &Map<String, Value>, policy: ValidationPolicy) -> Result<Self> {
        let mut attrs = Self::with_policy(policy);
        attrs.parse_into("", map)?;
        Ok(attrs)
    }

    /// Assign values from a nested or flat map onto existing definitions.
    pub fn parse_into(&mut self, prefix: &str, map: &Map<String, Value>) -> Result<()> {
        for (key, value) in map {
            let name = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let object_typed = self
                .definitions
                .get(&name)
                .is_some_and(|d| d.attr_type() == AttributeType::Object);
            match value {
                Value::Object(inner) if !object_typed && Properties::contains_props(inner) => {
                    self.set_properties(&name, &Properties::from_map(inner)?)?;
                }
                Value::Object(inner) if !object_typed => self.parse_into(&name, inner)?,
                other => match AttributeValue::from_json(other) {
                    Some(value) => self.set(&name, value)?,
                    None => self.declare(&name)?,
                },
            }
        }
        Ok(())
    }

    /// Build from a flat `dotted name -> value` map.
    pub fn split<I, K>(flat: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
    {
        let mut attrs = Self::new();
        for (name, value) in flat {
            attrs.set(name.as_ref(), value)?;
        }
        Ok(attrs)
    }

    /// Nested JSON map of the set values. When a name is both a value and a
    /// namespace the first one inserted wins.
    pub fn to_nested(&self) -> Map<String, Value> {
        let mut root = Map::new();
        for (name, value) in self.iter() {
            insert_nested(&mut root, name, value.to_json());
        }
        root
    }

    /// Flat JSON map of the set values.
    pub fn to_flat_json(&self) -> Map<String, Value> {
        self.iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect()
    }

    /// Flat JSON map of the definitions.
    pub fn definitions_to_json(&self) -> Map<String, Value> {
        self.definitions
            .iter()
            .map(|(name, definition)| (name.clone(), definition.to_json()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Text rendering
    // ------------------------------------------------------------------

    /// `name=value` pairs of the set values.
    pub fn text_pairs(&self) -> Vec<String> {
        self.iter()
            .map(|(name, value)| format!("{name}={}", value.to_text_literal()))
            .collect()
    }

    /// One `X-OCCI-Attribute:` line per set value.
    pub fn to_text(&self) -> String {
        self.text_pairs()
            .into_iter()
            .map(|pair| format!("X-OCCI-Attribute: {pair}\n"))
            .collect()
    }

    /// Value of an `X-OCCI-Attribute` header.
    pub fn to_header(&self) -> String {
        self.text_pairs().join(",")
    }

    /// The `;attributes="..."` parameter of a `Category` line, empty when
    /// no names are known.
    pub fn to_string_short(&self) -> String {
        if self.values.is_empty() {
            return String::new();
        }
        let names: Vec<String> = self
            .values
            .keys()
            .map(|name| match self.definitions.get(name) {
                Some(definition) => {
                    let mut flags = Vec::new();
                    if definition.required {
                        flags.push("required");
                    }
                    if !definition.mutable {
                        flags.push("immutable");
                    }
                    if flags.is_empty() {
                        name.clone()
                    } else {
                        format!("{name}{{{}}}", flags.join(" "))
                    }
                }
                None => name.clone(),
            })
            .collect();
        format!(";attributes={}", quote(&names.join(" ")))
    }
}

fn insert_nested(map: &mut Map<String, Value>, name: &str, value: Value) {
    match name.split_once('.') {
        None => {
            map.entry(name.to_string()).or_insert(value);
        }
        Some((head, rest)) => {
            let entry = map
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(inner) = entry {
                insert_nested(inner, rest, value);
            }
        }
    }
}
