//! Links between resources.

use super::Entity;
use crate::attributes::{AttributeValue, Attributes};
use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_SOURCE, ATTR_TARGET};
use crate::error::Result;

/// An entity connecting a source resource to a target.
///
/// Source and target live in the `occi.core.source` / `occi.core.target`
/// attributes as locations; `rel` names the kind of the target.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub entity: Entity,
    pub rel: Option<TypeIdentifier>,
}

impl Link {
    pub fn new(kind: TypeIdentifier) -> Self {
        Self::from_entity(Entity::new(kind))
    }

    pub fn with_attributes(kind: TypeIdentifier, attributes: Attributes) -> Result<Self> {
        Entity::with_attributes(kind, attributes).map(Self::from_entity)
    }

    pub fn from_entity(entity: Entity) -> Self {
        Self { entity, rel: None }
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn kind(&self) -> &TypeIdentifier {
        self.entity.kind()
    }

    pub fn source(&self) -> Option<&str> {
        self.entity.attributes.get_str(ATTR_SOURCE)
    }

    pub fn target(&self) -> Option<&str> {
        self.entity.attributes.get_str(ATTR_TARGET)
    }

    pub fn set_source(&mut self, location: impl Into<String>) -> Result<()> {
        self.entity
            .attributes
            .set(ATTR_SOURCE, AttributeValue::String(location.into()))
    }

    pub fn set_target(&mut self, location: impl Into<String>) -> Result<()> {
        self.entity
            .attributes
            .set(ATTR_TARGET, AttributeValue::String(location.into()))
    }

    pub fn with_rel(mut self, rel: TypeIdentifier) -> Self {
        self.rel = Some(rel);
        self
    }
}
