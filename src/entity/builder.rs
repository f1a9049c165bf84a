//! Construction of correctly-typed entities from kind identifiers.

use super::{Entity, Instance, Link, Resource};
use crate::attributes::Attributes;
use crate::base::TypeIdentifier;
use crate::base::constants::LINK_KIND;
use crate::collection::Model;
use crate::error::Result;

/// Factory turning a kind identifier into an entity of the right shape.
pub trait InstanceBuilder {
    /// Build an entity of `kind` carrying `attributes`.
    fn build(&self, kind: &TypeIdentifier, attributes: Attributes, model: &Model) -> Result<Instance>;
}

/// Default builder: kinds related to `core#link` become links, every other
/// kind a resource. The kind's attribute definitions (parents included)
/// are attached to the new entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelInstanceBuilder;

impl InstanceBuilder for ModelInstanceBuilder {
    fn build(&self, kind: &TypeIdentifier, attributes: Attributes, model: &Model) -> Result<Instance> {
        model.kind(kind)?;
        let mut entity = Entity::with_attributes(kind.clone(), attributes)?;
        entity.attributes.merge(&model.definitions_for(kind, std::iter::empty())?);

        let is_link = TypeIdentifier::parse(LINK_KIND)
            .map(|link| model.is_related(kind, &link))
            .unwrap_or(false);
        Ok(if is_link {
            Instance::Link(Link::from_entity(entity))
        } else {
            Instance::Resource(Resource::from_entity(entity))
        })
    }
}
