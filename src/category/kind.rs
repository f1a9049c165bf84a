//! Kinds: the types of entities.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::{Category, default_location};
use crate::attributes::AttributeDefinition;
use crate::base::TypeIdentifier;
use crate::error::Result;

/// A category describing an entity type.
#[derive(Clone, Debug, PartialEq)]
pub struct Kind {
    pub category: Category,
    /// Single supertype, `None` only for the root kind.
    pub parent: Option<TypeIdentifier>,
    pub actions: IndexSet<TypeIdentifier>,
    pub location: String,
    /// Ids of entities of this kind (bookkeeping only).
    entities: FxHashSet<String>,
}

impl Kind {
    pub fn new(scheme: &str, term: &str) -> Result<Self> {
        Ok(Self::from_category(Category::new(scheme, term)?))
    }

    pub fn from_category(category: Category) -> Self {
        let location = default_location(category.term());
        Self {
            category,
            parent: None,
            actions: IndexSet::new(),
            location,
            entities: FxHashSet::default(),
        }
    }

    pub fn identifier(&self) -> &TypeIdentifier {
        self.category.identifier()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.category.title = Some(title.into());
        self
    }

    pub fn with_parent(mut self, parent: TypeIdentifier) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_action(mut self, action: TypeIdentifier) -> Self {
        self.actions.insert(action);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_attribute(mut self, name: &str, definition: AttributeDefinition) -> Result<Self> {
        self.category.define(name, definition)?;
        Ok(self)
    }

    /// True iff `other` is this kind or its direct parent.
    pub fn related_to(&self, other: &TypeIdentifier) -> bool {
        self.identifier() == other || self.parent.as_ref() == Some(other)
    }

    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().map(String::as_str)
    }

    pub fn has_entity(&self, id: &str) -> bool {
        self.entities.contains(id)
    }

    pub(crate) fn register_entity(&mut self, id: &str) {
        self.entities.insert(id.to_string());
    }

    pub(crate) fn unregister_entity(&mut self, id: &str) {
        self.entities.remove(id);
    }
}
