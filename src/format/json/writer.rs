//! JSON rendering writer.

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_SOURCE, ATTR_TARGET};
use crate::category::{Action, Category, Kind, Mixin};
use crate::collection::Collection;
use crate::entity::{ActionInstance, Entity, Link, Resource};
use crate::error::{OcciError, Result};

fn identifiers<'a>(ids: impl IntoIterator<Item = &'a TypeIdentifier>) -> Value {
    Value::Array(ids.into_iter().map(|id| json!(id.as_str())).collect())
}

fn category_to_json(category: &Category) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("term".to_string(), json!(category.term()));
    obj.insert("scheme".to_string(), json!(category.scheme()));
    if let Some(ref title) = category.title {
        obj.insert("title".to_string(), json!(title));
    }
    let attributes = category.attributes.definitions_to_json();
    if !attributes.is_empty() {
        obj.insert("attributes".to_string(), Value::Object(attributes));
    }
    obj
}

fn kind_to_json(kind: &Kind) -> Value {
    let mut obj = category_to_json(&kind.category);
    if let Some(ref parent) = kind.parent {
        obj.insert("parent".to_string(), json!(parent.as_str()));
    }
    if !kind.actions.is_empty() {
        obj.insert("actions".to_string(), identifiers(&kind.actions));
    }
    obj.insert("location".to_string(), json!(kind.location));
    Value::Object(obj)
}

fn mixin_to_json(mixin: &Mixin) -> Value {
    let mut obj = category_to_json(&mixin.category);
    if !mixin.depends.is_empty() {
        obj.insert("depends".to_string(), identifiers(&mixin.depends));
    }
    if !mixin.applies.is_empty() {
        obj.insert("applies".to_string(), identifiers(&mixin.applies));
    }
    if !mixin.actions.is_empty() {
        obj.insert("actions".to_string(), identifiers(&mixin.actions));
    }
    obj.insert("location".to_string(), json!(mixin.location));
    Value::Object(obj)
}

fn action_to_json(action: &Action) -> Value {
    Value::Object(category_to_json(&action.category))
}

/// `{kinds, mixins, actions}`, empty arrays omitted.
pub fn categories_to_json(collection: &Collection) -> Value {
    let mut obj = Map::new();
    if !collection.kinds.is_empty() {
        let kinds = collection.kinds.values().map(kind_to_json).collect();
        obj.insert("kinds".to_string(), Value::Array(kinds));
    }
    if !collection.mixins.is_empty() {
        let mixins = collection.mixins.values().map(mixin_to_json).collect();
        obj.insert("mixins".to_string(), Value::Array(mixins));
    }
    if !collection.actions.is_empty() {
        let actions = collection.actions.values().map(action_to_json).collect();
        obj.insert("actions".to_string(), Value::Array(actions));
    }
    Value::Object(obj)
}

fn entity_to_json(entity: &Entity, skip: &[&str]) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("kind".to_string(), json!(entity.kind().as_str()));
    if !entity.mixins.is_empty() {
        obj.insert("mixins".to_string(), identifiers(&entity.mixins));
    }
    let attributes: Map<String, Value> = entity
        .attributes
        .to_flat_json()
        .into_iter()
        .filter(|(name, _)| !skip.contains(&name.as_str()))
        .collect();
    if !attributes.is_empty() {
        obj.insert("attributes".to_string(), Value::Object(attributes));
    }
    if !entity.actions.is_empty() {
        obj.insert("actions".to_string(), identifiers(&entity.actions));
    }
    obj.insert("id".to_string(), json!(entity.id()));
    if let Some(ref location) = entity.location {
        obj.insert("location".to_string(), json!(location));
    }
    obj
}

fn link_to_json(link: &Link) -> Value {
    let mut obj = entity_to_json(&link.entity, &[ATTR_SOURCE, ATTR_TARGET]);
    if let Some(ref rel) = link.rel {
        obj.insert("rel".to_string(), json!(rel.as_str()));
    }
    if let Some(source) = link.source() {
        obj.insert("source".to_string(), json!({ "location": source }));
    }
    if let Some(target) = link.target() {
        let mut target_obj = json!({ "location": target });
        if let Some(ref rel) = link.rel {
            target_obj["kind"] = json!(rel.as_str());
        }
        obj.insert("target".to_string(), target_obj);
    }
    Value::Object(obj)
}

fn resource_to_json(resource: &Resource) -> Value {
    let mut obj = entity_to_json(&resource.entity, &[]);
    if !resource.links.is_empty() {
        let links = resource.links.iter().map(link_to_json).collect();
        obj.insert("links".to_string(), Value::Array(links));
    }
    Value::Object(obj)
}

fn trigger_to_json(trigger: &ActionInstance) -> Value {
    let mut obj = Map::new();
    obj.insert("action".to_string(), json!(trigger.action().as_str()));
    let attributes = trigger.attributes.to_flat_json();
    if !attributes.is_empty() {
        obj.insert("attributes".to_string(), Value::Object(attributes));
    }
    Value::Object(obj)
}

/// `{resources, links, action}`, empty parts omitted.
pub fn entities_to_json(collection: &Collection) -> Value {
    let mut obj = Map::new();
    if !collection.resources.is_empty() {
        let resources = collection.resources.values().map(resource_to_json).collect();
        obj.insert("resources".to_string(), Value::Array(resources));
    }
    if !collection.links.is_empty() {
        let links = collection.links.values().map(link_to_json).collect();
        obj.insert("links".to_string(), Value::Array(links));
    }
    if let Some(ref trigger) = collection.action {
        obj.insert("action".to_string(), trigger_to_json(trigger));
    }
    Value::Object(obj)
}

/// Entities and action triggers when present, categories otherwise.
pub fn to_value(collection: &Collection) -> Value {
    if collection.has_entities() || collection.action.is_some() {
        entities_to_json(collection)
    } else {
        categories_to_json(collection)
    }
}

/// Pretty-printed [`to_value`].
pub fn render(collection: &Collection) -> Result<String> {
    let value = to_value(collection);
    debug!(
        categories = collection.categories().count(),
        entities = collection.entity_count(),
        "rendered JSON"
    );
    serde_json::to_string_pretty(&value)
        .map_err(|e| OcciError::rendering(format!("JSON serialization error: {e}")))
}
