//! Entities: instances of a [`Kind`](crate::category::Kind).
//!
//! ```text
//! Entity (kind, mixins, attributes, actions, location)
//! ├── Resource + links
//! └── Link     + rel, occi.core.source, occi.core.target
//! ActionInstance (action, attributes)
//! ```
//!
//! The concrete type of an entity is decided at runtime by an
//! [`InstanceBuilder`] from the kind's place in the model's relation graph.

mod action_instance;
mod builder;
mod link;
mod resource;

pub use action_instance::ActionInstance;
pub use builder::{InstanceBuilder, ModelInstanceBuilder};
pub use link::Link;
pub use resource::Resource;

use indexmap::IndexSet;
use uuid::Uuid;

use crate::attributes::{AttributeValue, Attributes};
use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_ID, ATTR_TITLE};
use crate::category::Mixin;
use crate::collection::Model;
use crate::error::Result;

/// Fields shared by resources and links.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    kind: TypeIdentifier,
    pub mixins: IndexSet<TypeIdentifier>,
    pub attributes: Attributes,
    pub actions: IndexSet<TypeIdentifier>,
    /// Explicit location; when unset the model derives one from the kind.
    pub location: Option<String>,
}

impl Entity {
    /// Create an entity of `kind` with a freshly generated id.
    pub fn new(kind: TypeIdentifier) -> Self {
        let id = AttributeValue::String(Uuid::new_v4().to_string());
        Self::from_parts(kind, Attributes::from_value(ATTR_ID, id))
    }

    /// Create an entity from existing attributes, generating
    /// `occi.core.id` when it is absent or blank.
    ///
    /// Fails when `attributes` defines `occi.core.id` in a way a generated
    /// UUID does not satisfy.
    pub fn with_attributes(kind: TypeIdentifier, mut attributes: Attributes) -> Result<Self> {
        let missing = attributes.get(ATTR_ID).is_none_or(|id| id.is_blank());
        if missing {
            attributes.set(ATTR_ID, Uuid::new_v4().to_string())?;
        }
        Ok(Self::from_parts(kind, attributes))
    }

    fn from_parts(kind: TypeIdentifier, attributes: Attributes) -> Self {
        Self {
            kind,
            mixins: IndexSet::new(),
            attributes,
            actions: IndexSet::new(),
            location: None,
        }
    }

    pub fn kind(&self) -> &TypeIdentifier {
        &self.kind
    }

    /// The entity id, empty if someone removed it from the attributes.
    pub fn id(&self) -> &str {
        self.attributes.get_str(ATTR_ID).unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.attributes.get_str(ATTR_TITLE)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.attributes.set(ATTR_TITLE, title.into())
    }

    /// True iff the id is blank.
    pub fn is_empty(&self) -> bool {
        self.kind.as_str().is_empty() || self.id().trim().is_empty()
    }

    /// Attach a mixin: record it and import its attribute definitions
    /// without any sample values.
    pub fn add_mixin(&mut self, mixin: &Mixin) {
        self.mixins.insert(mixin.identifier().clone());
        self.attributes.merge(&mixin.category.attributes.convert());
    }

    /// Detach a mixin and retract the attributes it contributed.
    pub fn remove_mixin(&mut self, mixin: &Mixin) {
        self.mixins.shift_remove(mixin.identifier());
        self.attributes.remove(&mixin.category.attributes);
    }

    /// Attach the model's attribute definitions and register this entity
    /// with its kind and mixins.
    pub fn bind_model(&mut self, model: &mut Model) -> Result<()> {
        model.attach(self)
    }

    /// Validate against the model: known kind, mixins and actions, required
    /// attributes present and every value well-formed.
    pub fn check(&self, model: &Model) -> Result<()> {
        model.check_entity(self)
    }
}

/// A resource or a link, as produced by an [`InstanceBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub enum Instance {
    Resource(Resource),
    Link(Link),
}

impl Instance {
    pub fn entity(&self) -> &Entity {
        match self {
            Self::Resource(r) => &r.entity,
            Self::Link(l) => &l.entity,
        }
    }

    pub fn entity_mut(&mut self) -> &mut Entity {
        match self {
            Self::Resource(r) => &mut r.entity,
            Self::Link(l) => &mut l.entity,
        }
    }

    pub fn id(&self) -> &str {
        self.entity().id()
    }
}
