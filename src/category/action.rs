//! Actions invocable on entities.

use super::Category;
use crate::attributes::AttributeDefinition;
use crate::base::TypeIdentifier;
use crate::error::Result;

/// A category describing an operation; its attributes are the operation's parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub category: Category,
}

impl Action {
    pub fn new(scheme: &str, term: &str) -> Result<Self> {
        Ok(Self {
            category: Category::new(scheme, term)?,
        })
    }

    pub fn from_category(category: Category) -> Self {
        Self { category }
    }

    pub fn identifier(&self) -> &TypeIdentifier {
        self.category.identifier()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.category.title = Some(title.into());
        self
    }

    pub fn with_attribute(mut self, name: &str, definition: AttributeDefinition) -> Result<Self> {
        self.category.define(name, definition)?;
        Ok(self)
    }

    /// True iff `other` is this action.
    pub fn related_to(&self, other: &TypeIdentifier) -> bool {
        self.identifier() == other
    }
}
