//! Containers for categories and entities.
//!
//! A [`Collection`] is the unit every parser produces and every renderer
//! consumes. A [`Model`] wraps a collection used purely as a category
//! registry.
//!
//! ```text
//! Collection
//! ├── kinds:     IndexMap<TypeIdentifier, Kind>
//! ├── mixins:    IndexMap<TypeIdentifier, Mixin>
//! ├── actions:   IndexMap<TypeIdentifier, Action>
//! ├── resources: IndexMap<id, Resource>
//! ├── links:     IndexMap<id, Link>
//! └── action:    Option<ActionInstance>
//! ```

mod model;
mod registry;

pub use model::Model;

use indexmap::IndexMap;

use crate::base::TypeIdentifier;
use crate::category::{Action, CategoryRef, Kind, Mixin, default_location};
use crate::entity::{ActionInstance, Entity, Instance, Link, Resource};

/// Result of an identifier or location lookup.
#[derive(Clone, Copy, Debug)]
pub enum Lookup<'a> {
    Category(CategoryRef<'a>),
    Resource(&'a Resource),
    Link(&'a Link),
}

impl<'a> Lookup<'a> {
    pub fn as_category(&self) -> Option<CategoryRef<'a>> {
        match self {
            Self::Category(c) => Some(*c),
            _ => None,
        }
    }

    /// The entity behind a resource or link hit.
    pub fn entity(&self) -> Option<&'a Entity> {
        match self {
            Self::Resource(r) => Some(&r.entity),
            Self::Link(l) => Some(&l.entity),
            Self::Category(_) => None,
        }
    }
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Categories, entities and at most one action trigger.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    pub kinds: IndexMap<TypeIdentifier, Kind>,
    pub mixins: IndexMap<TypeIdentifier, Mixin>,
    pub actions: IndexMap<TypeIdentifier, Action>,
    pub resources: IndexMap<String, Resource>,
    pub links: IndexMap<String, Link>,
    pub action: Option<ActionInstance>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_kind(&mut self, kind: Kind) -> Option<Kind> {
        self.kinds.insert(kind.identifier().clone(), kind)
    }

    pub fn add_mixin(&mut self, mixin: Mixin) -> Option<Mixin> {
        self.mixins.insert(mixin.identifier().clone(), mixin)
    }

    pub fn add_action(&mut self, action: Action) -> Option<Action> {
        self.actions.insert(action.identifier().clone(), action)
    }

    pub fn add_resource(&mut self, resource: Resource) -> Option<Resource> {
        self.resources.insert(resource.id().to_string(), resource)
    }

    pub fn add_link(&mut self, link: Link) -> Option<Link> {
        self.links.insert(link.id().to_string(), link)
    }

    /// Add a built entity to the matching table.
    pub fn add_instance(&mut self, instance: Instance) {
        match instance {
            Instance::Resource(r) => {
                self.add_resource(r);
            }
            Instance::Link(l) => {
                self.add_link(l);
            }
        }
    }

    /// Builder-style [`add_kind`](Self::add_kind).
    pub fn with_kind(mut self, kind: Kind) -> Self {
        self.add_kind(kind);
        self
    }

    pub fn with_mixin(mut self, mixin: Mixin) -> Self {
        self.add_mixin(mixin);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.add_action(action);
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.add_resource(resource);
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.add_link(link);
        self
    }

    /// Every category: kinds, then mixins, then actions.
    pub fn categories(&self) -> impl Iterator<Item = CategoryRef<'_>> {
        self.kinds
            .values()
            .map(CategoryRef::Kind)
            .chain(self.mixins.values().map(CategoryRef::Mixin))
            .chain(self.actions.values().map(CategoryRef::Action))
    }

    pub fn category(&self, identifier: &TypeIdentifier) -> Option<CategoryRef<'_>> {
        if let Some(kind) = self.kinds.get(identifier) {
            return Some(CategoryRef::Kind(kind));
        }
        if let Some(mixin) = self.mixins.get(identifier) {
            return Some(CategoryRef::Mixin(mixin));
        }
        self.actions.get(identifier).map(CategoryRef::Action)
    }

    /// Category lookup by its string identifier.
    pub fn category_by_str(&self, identifier: &str) -> Option<CategoryRef<'_>> {
        self.categories().find(|c| c.identifier().as_str() == identifier)
    }

    /// Every link: the top-level ones, then those owned by resources.
    pub fn all_links(&self) -> impl Iterator<Item = &Link> {
        self.links
            .values()
            .chain(self.resources.values().flat_map(|r| r.links.iter()))
    }

    /// Every entity: resources first, then links.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.resources
            .values()
            .map(|r| &r.entity)
            .chain(self.all_links().map(|l| &l.entity))
    }

    /// Find a category by identifier, then (unless `categories_only`) an
    /// entity by id.
    pub fn get_by_id(&self, id: &str, categories_only: bool) -> Option<Lookup<'_>> {
        if let Some(category) = self.category_by_str(id) {
            return Some(Lookup::Category(category));
        }
        if categories_only {
            return None;
        }
        if let Some(resource) = self.resources.get(id) {
            return Some(Lookup::Resource(resource));
        }
        self.all_links().find(|l| l.id() == id).map(Lookup::Link)
    }

    /// Find a category by its location, then an entity by its location.
    pub fn get_by_location(&self, location: &str) -> Option<Lookup<'_>> {
        if let Some(category) = self.categories().find(|c| c.location() == Some(location)) {
            return Some(Lookup::Category(category));
        }
        if let Some(resource) = self
            .resources
            .values()
            .find(|r| self.entity_location(&r.entity) == location)
        {
            return Some(Lookup::Resource(resource));
        }
        self.all_links()
            .find(|l| self.entity_location(&l.entity) == location)
            .map(Lookup::Link)
    }

    /// Explicit location of an entity, else `<kind location><id>` using the
    /// kind's location in this collection or its default `/<term>/`.
    pub fn entity_location(&self, entity: &Entity) -> String {
        if let Some(ref location) = entity.location {
            return location.clone();
        }
        match self.kinds.get(entity.kind()) {
            Some(kind) => format!("{}{}", kind.location, entity.id()),
            None => format!("{}{}", default_location(entity.kind().term()), entity.id()),
        }
    }

    /// Add everything from `other` that is not present here. Existing
    /// entries are never overwritten.
    pub fn merge(&mut self, other: &Collection) {
        for (id, kind) in &other.kinds {
            self.kinds.entry(id.clone()).or_insert_with(|| kind.clone());
        }
        for (id, mixin) in &other.mixins {
            self.mixins.entry(id.clone()).or_insert_with(|| mixin.clone());
        }
        for (id, action) in &other.actions {
            self.actions.entry(id.clone()).or_insert_with(|| action.clone());
        }
        for (id, resource) in &other.resources {
            self.resources
                .entry(id.clone())
                .or_insert_with(|| resource.clone());
        }
        for (id, link) in &other.links {
            self.links.entry(id.clone()).or_insert_with(|| link.clone());
        }
        if self.action.is_none() {
            self.action = other.action.clone();
        }
    }

    /// Keep only the entries whose key is also present in `other`.
    pub fn intersect(&self, other: &Collection) -> Collection {
        Collection {
            kinds: keep_shared(&self.kinds, &other.kinds),
            mixins: keep_shared(&self.mixins, &other.mixins),
            actions: keep_shared(&self.actions, &other.actions),
            resources: keep_shared(&self.resources, &other.resources),
            links: keep_shared(&self.links, &other.links),
            action: match (&self.action, &other.action) {
                (Some(mine), Some(theirs)) if mine.action() == theirs.action() => {
                    Some(mine.clone())
                }
                _ => None,
            },
        }
    }

    pub fn has_categories(&self) -> bool {
        !(self.kinds.is_empty() && self.mixins.is_empty() && self.actions.is_empty())
    }

    pub fn has_entities(&self) -> bool {
        !(self.resources.is_empty() && self.links.is_empty())
    }

    /// Number of resources and top-level links.
    pub fn entity_count(&self) -> usize {
        self.resources.len() + self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_categories() && !self.has_entities() && self.action.is_none()
    }
}

fn keep_shared<K, V>(mine: &IndexMap<K, V>, theirs: &IndexMap<K, V>) -> IndexMap<K, V>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
{
    mine.iter()
        .filter(|(key, _)| theirs.contains_key(*key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::constants::{INFRASTRUCTURE_SCHEME, RESOURCE_KIND};
    use crate::category::CategoryClass;

    fn compute_kind() -> Kind {
        Kind::new(INFRASTRUCTURE_SCHEME, "compute")
            .unwrap()
            .with_parent(TypeIdentifier::parse(RESOURCE_KIND).unwrap())
    }

    fn resource(id: &str) -> Resource {
        let mut attrs = crate::attributes::Attributes::new();
        attrs.set("occi.core.id", id).unwrap();
        Resource::with_attributes(compute_kind().identifier().clone(), attrs).unwrap()
    }

    #[test]
    fn test_get_by_id_categories_first() {
        let collection = Collection::new()
            .with_kind(compute_kind())
            .with_resource(resource("vm-1"));

        let hit = collection
            .get_by_id(&format!("{INFRASTRUCTURE_SCHEME}compute"), false)
            .unwrap();
        assert_eq!(hit.as_category().unwrap().class(), CategoryClass::Kind);

        assert!(matches!(collection.get_by_id("vm-1", false), Some(Lookup::Resource(_))));
        assert!(collection.get_by_id("vm-1", true).is_none());
    }

    #[test]
    fn test_get_by_location() {
        let mut explicit = resource("vm-2");
        explicit.entity.location = Some("/vms/two".to_string());
        let collection = Collection::new()
            .with_kind(compute_kind())
            .with_resource(resource("vm-1"))
            .with_resource(explicit);

        assert!(matches!(collection.get_by_location("/compute/"), Some(Lookup::Category(_))));
        let hit = collection.get_by_location("/compute/vm-1").unwrap();
        assert_eq!(hit.entity().unwrap().id(), "vm-1");
        let hit = collection.get_by_location("/vms/two").unwrap();
        assert_eq!(hit.entity().unwrap().id(), "vm-2");
        assert!(collection.get_by_location("/compute/vm-9").is_none());
    }

    #[test]
    fn test_merge_never_overwrites() {
        let mut first = resource("vm-1");
        first.entity.set_title("first").unwrap();
        let mut second = resource("vm-1");
        second.entity.set_title("second").unwrap();

        let mut left = Collection::new().with_resource(first);
        let right = Collection::new()
            .with_resource(second)
            .with_resource(resource("vm-2"))
            .with_kind(compute_kind());
        left.merge(&right);

        assert_eq!(left.resources.len(), 2);
        assert_eq!(left.resources["vm-1"].entity.title(), Some("first"));
        assert_eq!(left.kinds.len(), 1);
    }

    #[test]
    fn test_intersect_by_id() {
        let left = Collection::new()
            .with_resource(resource("vm-1"))
            .with_resource(resource("vm-2"))
            .with_kind(compute_kind());
        let right = Collection::new().with_resource(resource("vm-2"));
        let shared = left.intersect(&right);
        assert_eq!(shared.resources.keys().collect::<Vec<_>>(), vec!["vm-2"]);
        assert!(!shared.has_categories());
    }

    #[test]
    fn test_emptiness() {
        let mut collection = Collection::new();
        assert!(collection.is_empty());
        collection.add_kind(compute_kind());
        assert!(collection.has_categories());
        assert!(!collection.has_entities());
        assert!(!collection.is_empty());
    }
}
