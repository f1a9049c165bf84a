//! Error types for OCCI model, parsing and rendering operations.

use thiserror::Error;

/// Result type alias for OCCI operations.
pub type Result<T> = std::result::Result<T, OcciError>;

/// Errors raised by the OCCI core.
///
/// Every operation surfaces its failure synchronously to the caller. The
/// only place a failure is downgraded is the compatibility-mode pattern
/// check in [`Attributes::set`](crate::attributes::Attributes::set), which
/// logs a warning instead.
#[derive(Debug, Error)]
pub enum OcciError {
    /// A required constructor argument is missing or blank.
    #[error("Mandatory argument missing: {0}")]
    MandatoryArgument(String),

    /// A term, scheme or identifier does not follow the OCCI naming grammar.
    #[error("Invalid category: {0}")]
    CategoryValidation(String),

    /// A value fails its attribute definition, or a required attribute is absent.
    #[error("Attribute validation failed: {0}")]
    AttributeValidation(String),

    /// A value assigned into an attribute store does not match its declared type or pattern.
    #[error("Attribute type mismatch: {0}")]
    AttributeType(String),

    /// A dotted lookup named an attribute or namespace that does not exist.
    #[error("Attribute not found: {0}")]
    AttributeMissing(String),

    /// Wire-format input failed its grammar or references unknown categories.
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// A category identifier could not be found in the model.
    #[error("Model lookup failed: {0}")]
    ModelLookup(String),

    /// A kind, mixin or action is not defined in the model.
    #[error("Category not defined: {0}")]
    CategoryNotDefined(String),

    /// An entity instance could not be found or built.
    #[error("Instance lookup failed: {0}")]
    InstanceLookup(String),

    /// Rendering was attempted on an ambiguous collection or an unrenderable value.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// A declared attribute pattern is not a valid regular expression.
    #[error("Invalid attribute pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl OcciError {
    /// Create a mandatory argument error.
    pub fn mandatory(name: impl Into<String>) -> Self {
        Self::MandatoryArgument(name.into())
    }

    /// Create a category validation error.
    pub fn invalid_category(message: impl Into<String>) -> Self {
        Self::CategoryValidation(message.into())
    }

    /// Create an attribute validation error.
    pub fn attribute_validation(message: impl Into<String>) -> Self {
        Self::AttributeValidation(message.into())
    }

    /// Create an attribute type error.
    pub fn attribute_type(message: impl Into<String>) -> Self {
        Self::AttributeType(message.into())
    }

    /// Create an attribute missing error.
    pub fn attribute_missing(name: impl Into<String>) -> Self {
        Self::AttributeMissing(name.into())
    }

    /// Create a parsing error.
    pub fn parsing(message: impl Into<String>) -> Self {
        Self::Parsing(message.into())
    }

    /// Create a parsing error tied to a line of the input.
    pub fn parsing_at(line: usize, message: impl std::fmt::Display) -> Self {
        Self::Parsing(format!("line {line}: {message}"))
    }

    /// Create a model lookup error.
    pub fn model_lookup(identifier: impl Into<String>) -> Self {
        Self::ModelLookup(identifier.into())
    }

    /// Create a category-not-defined error.
    pub fn not_defined(identifier: impl Into<String>) -> Self {
        Self::CategoryNotDefined(identifier.into())
    }

    /// Create an instance lookup error.
    pub fn instance_lookup(message: impl Into<String>) -> Self {
        Self::InstanceLookup(message.into())
    }

    /// Create a rendering error.
    pub fn rendering(message: impl Into<String>) -> Self {
        Self::Rendering(message.into())
    }

    /// Returns true if this error came from wire-format parsing.
    pub fn is_parsing(&self) -> bool {
        matches!(self, Self::Parsing(_))
    }
}
