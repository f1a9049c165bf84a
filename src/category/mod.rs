//! Category type descriptors: [`Kind`], [`Mixin`] and [`Action`].
//!
//! Every category is identified by `scheme#term` and owns the definitions
//! of the attributes it contributes. Relations to other categories
//! (parent, depends, applies, actions) are held as identifiers and
//! dereferenced through a [`Model`](crate::collection::Model).

mod action;
mod kind;
mod mixin;

pub use action::Action;
pub use kind::Kind;
pub use mixin::Mixin;

use crate::attributes::{AttributeDefinition, Attributes};
use crate::base::TypeIdentifier;
use crate::error::{OcciError, Result};

/// Fields shared by all categories.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    identifier: TypeIdentifier,
    pub title: Option<String>,
    pub attributes: Attributes,
}

impl Category {
    pub fn new(scheme: &str, term: &str) -> Result<Self> {
        Ok(Self::from_identifier(TypeIdentifier::new(scheme, term)?))
    }

    pub fn from_identifier(identifier: TypeIdentifier) -> Self {
        Self {
            identifier,
            title: None,
            attributes: Attributes::new(),
        }
    }

    pub fn identifier(&self) -> &TypeIdentifier {
        &self.identifier
    }

    pub fn scheme(&self) -> &str {
        self.identifier.scheme()
    }

    pub fn term(&self) -> &str {
        self.identifier.term()
    }

    /// Declare an attribute on this category.
    pub fn define(&mut self, name: &str, definition: AttributeDefinition) -> Result<()> {
        self.attributes.define(name, definition)
    }
}

/// The three category classes, as named on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryClass {
    Kind,
    Mixin,
    Action,
}

impl CategoryClass {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "kind" => Ok(Self::Kind),
            "mixin" => Ok(Self::Mixin),
            "action" => Ok(Self::Action),
            other => Err(OcciError::invalid_category(format!(
                "unknown category class {other:?}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kind => "kind",
            Self::Mixin => "mixin",
            Self::Action => "action",
        }
    }
}

/// A borrowed category of any class.
#[derive(Clone, Copy, Debug)]
pub enum CategoryRef<'a> {
    Kind(&'a Kind),
    Mixin(&'a Mixin),
    Action(&'a Action),
}

impl<'a> CategoryRef<'a> {
    pub fn category(&self) -> &'a Category {
        match self {
            Self::Kind(k) => &k.category,
            Self::Mixin(m) => &m.category,
            Self::Action(a) => &a.category,
        }
    }

    pub fn identifier(&self) -> &'a TypeIdentifier {
        self.category().identifier()
    }

    pub fn class(&self) -> CategoryClass {
        match self {
            Self::Kind(_) => CategoryClass::Kind,
            Self::Mixin(_) => CategoryClass::Mixin,
            Self::Action(_) => CategoryClass::Action,
        }
    }

    /// Mount path; actions have none.
    pub fn location(&self) -> Option<&'a str> {
        match self {
            Self::Kind(k) => Some(&k.location),
            Self::Mixin(m) => Some(&m.location),
            Self::Action(_) => None,
        }
    }

    pub fn as_kind(&self) -> Option<&'a Kind> {
        match self {
            Self::Kind(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_mixin(&self) -> Option<&'a Mixin> {
        match self {
            Self::Mixin(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_action(&self) -> Option<&'a Action> {
        match self {
            Self::Action(a) => Some(a),
            _ => None,
        }
    }
}

/// Default mount path of a kind or mixin.
pub(crate) fn default_location(term: &str) -> String {
    format!("/{term}/")
}
