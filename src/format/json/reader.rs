//! JSON rendering parser.

use serde_json::{Map, Value};
use tracing::debug;

use crate::attributes::{AttributeDefinition, AttributeType, AttributeValue, Attributes, Properties};
use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_ID, ATTR_SUMMARY, ATTR_TITLE, LINK_KIND};
use crate::category::{Action, Category, Kind, Mixin};
use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, Entity, Instance, InstanceBuilder, Link, Resource};
use crate::error::{OcciError, Result};
use crate::format::text::dereference_identifiers;

type Object = Map<String, Value>;

fn parse_value(input: &str) -> Result<Value> {
    serde_json::from_str(input).map_err(|e| OcciError::parsing(format!("invalid JSON: {e}")))
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| OcciError::parsing(format!("{what} must be an object")))
}

fn str_field<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(OcciError::parsing(format!("{key} must be a string"))),
    }
}

fn required_str<'a>(obj: &'a Object, key: &str) -> Result<&'a str> {
    str_field(obj, key)?.ok_or_else(|| OcciError::parsing(format!("missing {key}")))
}

fn bool_field(obj: &Object, key: &str) -> Result<Option<bool>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(OcciError::parsing(format!("{key} must be a boolean"))),
    }
}

fn array_field<'a>(obj: &'a Object, key: &str) -> Result<&'a [Value]> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(OcciError::parsing(format!("{key} must be an array"))),
    }
}

fn identifier(text: &str) -> Result<TypeIdentifier> {
    TypeIdentifier::parse(text).map_err(|e| OcciError::parsing(e.to_string()))
}

fn identifiers(obj: &Object, key: &str) -> Result<Vec<TypeIdentifier>> {
    array_field(obj, key)?
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| OcciError::parsing(format!("{key} entries must be strings")))
                .and_then(identifier)
        })
        .collect()
}

// ============================================================================
// CATEGORIES
// ============================================================================

/// Parse `{kinds, mixins, actions}` and dereference relations against `model`.
pub fn parse_categories(input: &str, model: &Model) -> Result<Collection> {
    categories_from_value(&parse_value(input)?, model)
}

/// [`parse_categories`] over an already decoded document.
pub fn categories_from_value(value: &Value, model: &Model) -> Result<Collection> {
    let root = as_object(value, "category listing")?;

    let mut collection = Collection::new();
    for item in array_field(root, "kinds")? {
        let obj = as_object(item, "kind")?;
        let mut kind = Kind::from_category(category(obj)?);
        if let Some(parent) = str_field(obj, "parent")? {
            kind.parent = Some(identifier(parent)?);
        }
        kind.actions.extend(identifiers(obj, "actions")?);
        if let Some(location) = str_field(obj, "location")? {
            kind.location = location.to_string();
        }
        collection.add_kind(kind);
    }
    for item in array_field(root, "mixins")? {
        let obj = as_object(item, "mixin")?;
        let mut mixin = Mixin::from_category(category(obj)?);
        mixin.depends.extend(identifiers(obj, "depends")?);
        mixin.applies.extend(identifiers(obj, "applies")?);
        mixin.actions.extend(identifiers(obj, "actions")?);
        if let Some(location) = str_field(obj, "location")? {
            mixin.location = location.to_string();
        }
        collection.add_mixin(mixin);
    }
    for item in array_field(root, "actions")? {
        let obj = as_object(item, "action")?;
        collection.add_action(Action::from_category(category(obj)?));
    }

    debug!(
        kinds = collection.kinds.len(),
        mixins = collection.mixins.len(),
        actions = collection.actions.len(),
        "parsed JSON categories"
    );
    dereference_identifiers(&mut collection, model)?;
    Ok(collection)
}

fn category(obj: &Object) -> Result<Category> {
    let term = required_str(obj, "term")?;
    let scheme = required_str(obj, "scheme")?;
    let mut category =
        Category::new(scheme, term).map_err(|e| OcciError::parsing(e.to_string()))?;
    category.title = str_field(obj, "title")?.map(str::to_string);
    if let Some(attributes) = obj.get("attributes") {
        definitions("", as_object(attributes, "attributes")?, &mut category)?;
    }
    Ok(category)
}

/// Whether a JSON object declares an attribute rather than a namespace.
fn is_declaration(obj: &Object) -> bool {
    obj.get("type").is_some_and(Value::is_string)
        || (!obj.is_empty() && Properties::contains_props(obj))
}

fn definitions(prefix: &str, map: &Object, category: &mut Category) -> Result<()> {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let obj = as_object(value, &name)?;
        if is_declaration(obj) {
            category.define(&name, definition(&name, obj)?)?;
        } else {
            definitions(&name, obj, category)?;
        }
    }
    Ok(())
}

/// One attribute declaration. Type names go through a fixed lookup table;
/// a missing type means `string`.
pub fn definition(name: &str, obj: &Object) -> Result<AttributeDefinition> {
    let attr_type = match str_field(obj, "type")? {
        None => AttributeType::String,
        Some(type_name) => AttributeType::from_json_name(type_name).ok_or_else(|| {
            OcciError::parsing(format!("{name}: unknown attribute type {type_name:?}"))
        })?,
    };
    let mut definition = AttributeDefinition::new(attr_type)
        .with_required(bool_field(obj, "required")?.unwrap_or(false))
        .with_mutable(bool_field(obj, "mutable")?.unwrap_or(false));
    if let Some(pattern) = str_field(obj, "pattern")? {
        definition = definition.with_pattern(pattern)?;
    }
    if let Some(description) = str_field(obj, "description")? {
        definition = definition.with_description(description);
    }
    if let Some(default) = obj.get("default").and_then(AttributeValue::from_json) {
        if !definition.accepts_type(&default) {
            return Err(OcciError::parsing(format!(
                "{name}: default {default} is not a {}",
                attr_type.json_name()
            )));
        }
        definition = definition.with_default(default);
    }
    Ok(definition)
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Parse a single resource, link or action hash, or a
/// `{resources, links, action}` collection.
pub fn parse_entities(
    input: &str,
    model: &Model,
    builder: &dyn InstanceBuilder,
) -> Result<Collection> {
    entities_from_value(&parse_value(input)?, model, builder)
}

/// [`parse_entities`] over an already decoded document.
pub fn entities_from_value(
    value: &Value,
    model: &Model,
    builder: &dyn InstanceBuilder,
) -> Result<Collection> {
    let root = as_object(value, "entity document")?;
    let reader = EntityReader { model, builder };
    let mut collection = Collection::new();

    // a resource hash also has `links`, but always a `kind`
    let collection_mode = root.contains_key("resources")
        || (root.contains_key("links") && !root.contains_key("kind"))
        || root.get("action").is_some_and(Value::is_object);
    if collection_mode {
        let mut links = Vec::new();
        for item in array_field(root, "links")? {
            links.push(reader.link(as_object(item, "link")?, None)?);
        }
        let mut referenced = Vec::new();
        for item in array_field(root, "resources")? {
            let resource = reader.resource(as_object(item, "resource")?, &links, &mut referenced)?;
            collection.add_resource(resource);
        }
        for link in links {
            if !referenced.contains(&link.id().to_string()) {
                collection.add_link(link);
            }
        }
        if let Some(action) = root.get("action") {
            collection.action = Some(reader.action(as_object(action, "action")?)?);
        }
    } else if root.get("action").is_some_and(Value::is_string) {
        collection.action = Some(reader.action(root)?);
    } else if root.contains_key("source") || root.contains_key("target") {
        collection.add_link(reader.link(root, None)?);
    } else {
        collection.add_resource(reader.resource(root, &[], &mut Vec::new())?);
    }

    debug!(
        resources = collection.resources.len(),
        links = collection.links.len(),
        action = collection.action.is_some(),
        "parsed JSON entities"
    );
    Ok(collection)
}

/// Parse an action trigger hash.
pub fn parse_action(input: &str, model: &Model) -> Result<ActionInstance> {
    action_from_value(&parse_value(input)?, model)
}

/// [`parse_action`] over an already decoded document.
pub fn action_from_value(value: &Value, model: &Model) -> Result<ActionInstance> {
    let root = as_object(value, "action trigger")?;
    let builder = crate::entity::ModelInstanceBuilder;
    EntityReader {
        model,
        builder: &builder,
    }
    .action(root)
}

struct EntityReader<'a> {
    model: &'a Model,
    builder: &'a dyn InstanceBuilder,
}

impl EntityReader<'_> {
    fn build(&self, kind: &TypeIdentifier) -> Result<Instance> {
        self.model
            .kind(kind)
            .map_err(|_| OcciError::parsing(format!("kind {kind} is not defined")))?;
        self.builder.build(kind, Attributes::new(), self.model)
    }

    /// Kind, mixins, attributes and the shared top-level keys.
    fn fill_entity(&self, entity: &mut Entity, obj: &Object) -> Result<()> {
        for id in identifiers(obj, "mixins")? {
            let mixin = self
                .model
                .mixin(&id)
                .map_err(|_| OcciError::parsing(format!("mixin {id} is not defined")))?;
            entity.add_mixin(mixin);
        }
        if let Some(attributes) = obj.get("attributes") {
            assign_all(&mut entity.attributes, "", as_object(attributes, "attributes")?)?;
        }
        for (key, name) in [("id", ATTR_ID), ("title", ATTR_TITLE), ("summary", ATTR_SUMMARY)] {
            if let Some(value) = str_field(obj, key)? {
                assign(&mut entity.attributes, name, AttributeValue::from(value))?;
            }
        }
        entity.actions.extend(identifiers(obj, "actions")?);
        entity.location = str_field(obj, "location")?.map(str::to_string);
        Ok(())
    }

    fn resource(
        &self,
        obj: &Object,
        shared_links: &[Link],
        referenced: &mut Vec<String>,
    ) -> Result<Resource> {
        let kind = identifier(required_str(obj, "kind")?)?;
        let Instance::Resource(mut resource) = self.build(&kind)? else {
            return Err(OcciError::parsing(format!("{kind} is not a resource kind")));
        };
        self.fill_entity(&mut resource.entity, obj)?;

        let location = self.model.location_of(&resource.entity);
        for item in array_field(obj, "links")? {
            let link = match item {
                Value::String(reference) => {
                    let found = shared_links
                        .iter()
                        .find(|l| {
                            l.id() == reference
                                || self.model.location_of(&l.entity) == *reference
                        })
                        .ok_or_else(|| {
                            OcciError::parsing(format!("unresolved link reference {reference:?}"))
                        })?;
                    referenced.push(found.id().to_string());
                    found.clone()
                }
                other => self.link(as_object(other, "link")?, Some(&location))?,
            };
            resource.links.push(link);
        }
        Ok(resource)
    }

    fn link(&self, obj: &Object, owner: Option<&str>) -> Result<Link> {
        let kind = identifier(str_field(obj, "kind")?.unwrap_or(LINK_KIND))?;
        let Instance::Link(mut link) = self.build(&kind)? else {
            return Err(OcciError::parsing(format!("{kind} is not a link kind")));
        };
        self.fill_entity(&mut link.entity, obj)?;
        link.rel = str_field(obj, "rel")?.map(identifier).transpose()?;

        match endpoint(obj, "source")?.or(owner) {
            Some(source) => link.set_source(source)?,
            None if link.source().is_none() => {
                return Err(OcciError::parsing("link without source"));
            }
            None => {}
        }
        match endpoint(obj, "target")? {
            Some(target) => link.set_target(target)?,
            None if link.target().is_none() => {
                return Err(OcciError::parsing("link without target"));
            }
            None => {}
        }
        Ok(link)
    }

    fn action(&self, obj: &Object) -> Result<ActionInstance> {
        let id = identifier(required_str(obj, "action")?)?;
        let action = self
            .model
            .action(&id)
            .map_err(|_| OcciError::parsing(format!("action {id} is not defined")))?;
        let mut trigger = ActionInstance::new(action);
        if let Some(attributes) = obj.get("attributes") {
            assign_all(&mut trigger.attributes, "", as_object(attributes, "attributes")?)?;
        }
        Ok(trigger)
    }
}

/// `source`/`target` as a location string or a `{location, kind}` object.
fn endpoint<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a str>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(location)) => Ok(Some(location)),
        Some(Value::Object(inner)) => Ok(Some(required_str(inner, "location")?)),
        Some(_) => Err(OcciError::parsing(format!("{key} must be a string or an object"))),
    }
}

fn assign(attributes: &mut Attributes, name: &str, value: AttributeValue) -> Result<()> {
    if attributes.definition(name).is_none() {
        return Err(OcciError::parsing(format!("attribute {name} is not declared")));
    }
    attributes.set(name, value)
}

/// Assign values from a flat or nested map onto declared attributes.
fn assign_all(attributes: &mut Attributes, prefix: &str, map: &Object) -> Result<()> {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        let declared_object = attributes
            .definition(&name)
            .is_some_and(|d| d.attr_type() == AttributeType::Object);
        match value {
            Value::Object(inner) if !declared_object => assign_all(attributes, &name, inner)?,
            Value::Null => {}
            other => {
                if let Some(value) = AttributeValue::from_json(other) {
                    assign(attributes, &name, value)?;
                }
            }
        }
    }
    Ok(())
}
