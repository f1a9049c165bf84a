//! Resources.

use super::{Entity, Link};
use crate::attributes::Attributes;
use crate::base::TypeIdentifier;
use crate::base::constants::ATTR_SUMMARY;
use crate::error::Result;

/// An entity that owns outgoing links.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    pub entity: Entity,
    pub links: Vec<Link>,
}

impl Resource {
    pub fn new(kind: TypeIdentifier) -> Self {
        Self::from_entity(Entity::new(kind))
    }

    pub fn with_attributes(kind: TypeIdentifier, attributes: Attributes) -> Result<Self> {
        Entity::with_attributes(kind, attributes).map(Self::from_entity)
    }

    pub fn from_entity(entity: Entity) -> Self {
        Self {
            entity,
            links: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.entity.id()
    }

    pub fn kind(&self) -> &TypeIdentifier {
        self.entity.kind()
    }

    pub fn summary(&self) -> Option<&str> {
        self.entity.attributes.get_str(ATTR_SUMMARY)
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<()> {
        self.entity.attributes.set(ATTR_SUMMARY, summary.into())
    }

    /// Add an outgoing link. A link without a source gets this resource's
    /// location, when known.
    pub fn add_link(&mut self, mut link: Link) -> Result<()> {
        if link.source().is_none() {
            if let Some(ref location) = self.entity.location {
                link.set_source(location.clone())?;
            }
        }
        self.links.push(link);
        Ok(())
    }

    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id() == id)
    }
}
