//! Category registry used to resolve identifiers and validate entities.

use rustc_hash::FxHashSet;

use super::{Collection, registry};
use crate::attributes::Attributes;
use crate::base::TypeIdentifier;
use crate::category::{Action, CategoryRef, Kind, Mixin};
use crate::entity::Entity;
use crate::error::{OcciError, Result};

/// A collection of kinds, mixins and actions acting as a type registry.
///
/// Entities are not stored here; binding an entity to the model records its
/// id in the kind's and mixins' back-reference sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    categories: Collection,
}

impl Model {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The OCCI core kinds: `entity`, `resource` and `link`.
    pub fn core() -> Result<Self> {
        Ok(Self::from_collection(registry::core()?))
    }

    /// The core kinds plus the OCCI infrastructure extension.
    pub fn infrastructure() -> Result<Self> {
        let mut model = Self::core()?;
        model.register(&registry::infrastructure()?);
        Ok(model)
    }

    /// Wrap the categories of `collection`; its entities are dropped.
    pub fn from_collection(collection: Collection) -> Self {
        Self {
            categories: Collection {
                kinds: collection.kinds,
                mixins: collection.mixins,
                actions: collection.actions,
                ..Collection::default()
            },
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.categories
    }

    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.categories.kinds.values()
    }

    pub fn mixins(&self) -> impl Iterator<Item = &Mixin> {
        self.categories.mixins.values()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.categories.actions.values()
    }

    pub fn register_kind(&mut self, kind: Kind) {
        self.categories.add_kind(kind);
    }

    pub fn register_mixin(&mut self, mixin: Mixin) {
        self.categories.add_mixin(mixin);
    }

    pub fn register_action(&mut self, action: Action) {
        self.categories.add_action(action);
    }

    /// Register every category of `collection` not already known.
    pub fn register(&mut self, collection: &Collection) {
        let categories = Collection {
            kinds: collection.kinds.clone(),
            mixins: collection.mixins.clone(),
            actions: collection.actions.clone(),
            ..Collection::default()
        };
        self.categories.merge(&categories);
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    pub fn get_by_id(&self, identifier: &str) -> Option<CategoryRef<'_>> {
        self.categories.category_by_str(identifier)
    }

    pub fn category(&self, identifier: &TypeIdentifier) -> Option<CategoryRef<'_>> {
        self.categories.category(identifier)
    }

    /// Category lookup that fails with `ModelLookup` (`find_by_identifier!`).
    pub fn find_by_identifier(&self, identifier: &str) -> Result<CategoryRef<'_>> {
        self.get_by_id(identifier)
            .ok_or_else(|| OcciError::model_lookup(identifier))
    }

    pub fn kind(&self, identifier: &TypeIdentifier) -> Result<&Kind> {
        self.categories
            .kinds
            .get(identifier)
            .ok_or_else(|| OcciError::not_defined(identifier.as_str()))
    }

    pub fn mixin(&self, identifier: &TypeIdentifier) -> Result<&Mixin> {
        self.categories
            .mixins
            .get(identifier)
            .ok_or_else(|| OcciError::not_defined(identifier.as_str()))
    }

    pub fn action(&self, identifier: &TypeIdentifier) -> Result<&Action> {
        self.categories
            .actions
            .get(identifier)
            .ok_or_else(|| OcciError::not_defined(identifier.as_str()))
    }

    /// The kind and its ancestors, nearest first.
    pub fn ancestors(&self, identifier: &TypeIdentifier) -> Result<Vec<&Kind>> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut next = Some(identifier);
        while let Some(id) = next {
            if !seen.insert(id) {
                break;
            }
            let kind = self.kind(id)?;
            chain.push(kind);
            next = kind.parent.as_ref();
        }
        Ok(chain)
    }

    /// Whether `other` is reachable from `identifier` through parent,
    /// depends and applies relations (the category itself included).
    pub fn is_related(&self, identifier: &TypeIdentifier, other: &TypeIdentifier) -> bool {
        let mut seen = FxHashSet::default();
        let mut stack = vec![identifier];
        while let Some(id) = stack.pop() {
            if id == other {
                return true;
            }
            if !seen.insert(id) {
                continue;
            }
            match self.category(id) {
                Some(CategoryRef::Kind(kind)) => stack.extend(kind.parent.iter()),
                Some(CategoryRef::Mixin(mixin)) => stack.extend(mixin.related()),
                _ => {}
            }
        }
        false
    }

    /// Definition-only attributes of a kind (ancestors included) and the
    /// given mixins (their depends included). Nearer categories win.
    pub fn definitions_for<'a, I>(&self, kind: &TypeIdentifier, mixins: I) -> Result<Attributes>
    where
        I: IntoIterator<Item = &'a TypeIdentifier>,
    {
        let mut attributes = Attributes::new();
        for kind in self.ancestors(kind)? {
            attributes.merge(&kind.category.attributes.convert());
        }
        let mut seen = FxHashSet::default();
        let mut pending: Vec<&TypeIdentifier> = mixins.into_iter().collect();
        pending.reverse();
        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let mixin = self.mixin(id)?;
            attributes.merge(&mixin.category.attributes.convert());
            pending.extend(mixin.depends.iter().rev());
        }
        Ok(attributes)
    }

    /// Location of an entity: explicit, or `<kind location><id>`.
    pub fn location_of(&self, entity: &Entity) -> String {
        self.categories.entity_location(entity)
    }

    // ------------------------------------------------------------------
    // Binding and validation
    // ------------------------------------------------------------------

    /// Attach the kind's and mixins' definitions to `entity` and record it
    /// in their back-reference sets.
    pub fn attach(&mut self, entity: &mut Entity) -> Result<()> {
        let definitions = self.definitions_for(entity.kind(), entity.mixins.iter())?;
        entity.attributes.merge(&definitions);

        let id = entity.id().to_string();
        if let Some(kind) = self.categories.kinds.get_mut(entity.kind()) {
            kind.register_entity(&id);
        }
        for mixin in &entity.mixins {
            if let Some(mixin) = self.categories.mixins.get_mut(mixin) {
                mixin.register_entity(&id);
            }
        }
        Ok(())
    }

    /// Drop `entity` from its kind's and mixins' back-reference sets.
    pub fn detach(&mut self, entity: &Entity) {
        let id = entity.id();
        if let Some(kind) = self.categories.kinds.get_mut(entity.kind()) {
            kind.unregister_entity(id);
        }
        for mixin in &entity.mixins {
            if let Some(mixin) = self.categories.mixins.get_mut(mixin) {
                mixin.unregister_entity(id);
            }
        }
    }

    /// Validate one entity: kind, mixins and actions must be registered,
    /// required attributes present and every value well-formed.
    pub fn check_entity(&self, entity: &Entity) -> Result<()> {
        if entity.is_empty() {
            return Err(OcciError::attribute_validation("entity has no occi.core.id"));
        }
        let definitions = self.definitions_for(entity.kind(), entity.mixins.iter())?;
        for action in &entity.actions {
            self.action(action)?;
        }
        let mut attributes = entity.attributes.clone();
        attributes.merge(&definitions);
        attributes.check()
    }

    /// Validate every entity and the action trigger of `collection`.
    pub fn check(&self, collection: &Collection) -> Result<()> {
        for entity in collection.entities() {
            self.check_entity(entity)?;
        }
        if let Some(ref trigger) = collection.action {
            let action = self.action(trigger.action())?;
            let mut attributes = trigger.attributes.clone();
            attributes.merge(&action.category.attributes.convert());
            attributes.check()?;
        }
        Ok(())
    }
}
