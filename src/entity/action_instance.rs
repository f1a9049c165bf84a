//! Action triggers.

use crate::attributes::Attributes;
use crate::base::TypeIdentifier;
use crate::category::Action;

/// A request to run an action, with its parameter values.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionInstance {
    action: TypeIdentifier,
    pub attributes: Attributes,
}

impl ActionInstance {
    /// Create a trigger for `action`, declaring its parameters without values.
    pub fn new(action: &Action) -> Self {
        Self {
            action: action.identifier().clone(),
            attributes: action.category.attributes.convert(),
        }
    }

    /// Create a trigger from an identifier and values, without definitions.
    pub fn from_parts(action: TypeIdentifier, attributes: Attributes) -> Self {
        Self { action, attributes }
    }

    pub fn action(&self) -> &TypeIdentifier {
        &self.action
    }
}
