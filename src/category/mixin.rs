//! Mixins: optional capabilities attachable to entities.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::{Category, default_location};
use crate::attributes::AttributeDefinition;
use crate::base::TypeIdentifier;
use crate::error::Result;

/// A category contributing attributes and actions to entities it is attached to.
#[derive(Clone, Debug, PartialEq)]
pub struct Mixin {
    pub category: Category,
    /// Mixins this one requires.
    pub depends: IndexSet<TypeIdentifier>,
    /// Kinds this mixin may be attached to.
    pub applies: IndexSet<TypeIdentifier>,
    pub actions: IndexSet<TypeIdentifier>,
    pub location: String,
    entities: FxHashSet<String>,
}

impl Mixin {
    pub fn new(scheme: &str, term: &str) -> Result<Self> {
        Ok(Self::from_category(Category::new(scheme, term)?))
    }

    pub fn from_category(category: Category) -> Self {
        let location = default_location(category.term());
        Self {
            category,
            depends: IndexSet::new(),
            applies: IndexSet::new(),
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

    pub fn with_depends(mut self, mixin: TypeIdentifier) -> Self {
        self.depends.insert(mixin);
        self
    }

    pub fn with_applies(mut self, kind: TypeIdentifier) -> Self {
        self.applies.insert(kind);
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

    /// True iff `other` is this mixin or one of its depends/applies.
    pub fn related_to(&self, other: &TypeIdentifier) -> bool {
        self.identifier() == other || self.depends.contains(other) || self.applies.contains(other)
    }

    /// Every related identifier (depends, then applies), as rendered in `rel`.
    pub fn related(&self) -> impl Iterator<Item = &TypeIdentifier> {
        self.depends.iter().chain(self.applies.iter())
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
