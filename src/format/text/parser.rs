//! Text rendering parsers: header lines to categories, entities, action
//! triggers and locations.

use tracing::{debug, trace};

use super::grammar::{self, AttributeLine, CategoryLine, LinkLine};
use super::lexer::split_header_value;
use crate::attributes::{AttributeDefinition, AttributeType, Attributes};
use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_TARGET_KIND, LINK_KIND};
use crate::category::{Action, Category, CategoryClass, CategoryRef, Kind, Mixin};
use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, Instance, InstanceBuilder, Link};
use crate::error::{OcciError, Result};

/// Header names of the text rendering.
pub mod headers {
    pub const CATEGORY: &str = "Category";
    pub const ATTRIBUTE: &str = "X-OCCI-Attribute";
    pub const LINK: &str = "Link";
    pub const LOCATION: &str = "X-OCCI-Location";
}

/// One recognised header line.
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Category(CategoryLine),
    Attribute(AttributeLine),
    Link(LinkLine),
    Location(String),
}

/// A parsed line with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
struct Numbered {
    number: usize,
    line: Line,
}

/// Dispatch each line of `body` on its header name. Unknown headers and
/// blank lines are skipped.
fn lines(body: &str) -> Result<Vec<Numbered>> {
    let mut parsed = Vec::new();
    for (index, raw) in body.lines().enumerate() {
        let number = index + 1;
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let Some((name, value)) = raw.split_once(':') else {
            trace!(line = number, "skipping line without header name");
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        let line = if name.eq_ignore_ascii_case(headers::CATEGORY) {
            grammar::category(value).map(Line::Category)
        } else if name.eq_ignore_ascii_case(headers::ATTRIBUTE) {
            grammar::attribute(value).map(Line::Attribute)
        } else if name.eq_ignore_ascii_case(headers::LINK) {
            grammar::link(value).map(Line::Link)
        } else if name.eq_ignore_ascii_case(headers::LOCATION) {
            grammar::location(value).map(Line::Location)
        } else {
            trace!(line = number, header = name, "skipping unknown header");
            continue;
        };
        let line = line.map_err(|message| OcciError::parsing_at(number, message))?;
        trace!(line = number, header = name, "parsed line");
        parsed.push(Numbered { number, line });
    }
    Ok(parsed)
}

fn identifier_at(number: usize, identifier: &str) -> Result<TypeIdentifier> {
    TypeIdentifier::parse(identifier).map_err(|e| OcciError::parsing_at(number, e))
}

/// Turn `text/occi` headers into body lines: each value is split on commas
/// outside quotes and `<...>`.
pub fn headers_to_body<I, K, V>(headers: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut body = String::new();
    for (name, value) in headers {
        for part in split_header_value(value.as_ref()) {
            body.push_str(name.as_ref());
            body.push_str(": ");
            body.push_str(part);
            body.push('\n');
        }
    }
    body
}

// ============================================================================
// CATEGORIES
// ============================================================================

/// Parse `Category:` lines into kinds, mixins and actions and dereference
/// their relations against the batch and `model`.
pub fn parse_categories(body: &str, model: &Model) -> Result<Collection> {
    let mut collection = Collection::new();
    for Numbered { number, line } in lines(body)? {
        let Line::Category(line) = line else {
            continue;
        };
        add_category(&mut collection, number, line)?;
    }
    debug!(
        kinds = collection.kinds.len(),
        mixins = collection.mixins.len(),
        actions = collection.actions.len(),
        "parsed text categories"
    );
    dereference_identifiers(&mut collection, model)?;
    Ok(collection)
}

fn add_category(collection: &mut Collection, number: usize, line: CategoryLine) -> Result<()> {
    let at = |e: OcciError| OcciError::parsing_at(number, e);
    let mut category = Category::new(&line.scheme, &line.term).map_err(at)?;
    category.title = line.title;
    for declaration in &line.attributes {
        let definition = AttributeDefinition::new(AttributeType::String)
            .with_required(declaration.required)
            .with_mutable(declaration.mutable);
        category.define(&declaration.name, definition).map_err(at)?;
    }

    let actions = line
        .actions
        .iter()
        .map(|a| identifier_at(number, a))
        .collect::<Result<Vec<_>>>()?;
    let rel = line
        .rel
        .iter()
        .map(|r| identifier_at(number, r))
        .collect::<Result<Vec<_>>>()?;

    match line.class {
        CategoryClass::Kind => {
            if rel.len() > 1 {
                return Err(OcciError::parsing_at(number, "a kind has at most one parent"));
            }
            let mut kind = Kind::from_category(category);
            kind.parent = rel.into_iter().next();
            kind.actions.extend(actions);
            if let Some(location) = line.location {
                kind.location = location;
            }
            collection.add_kind(kind);
        }
        CategoryClass::Mixin => {
            let mut mixin = Mixin::from_category(category);
            // classified into depends/applies by dereferencing
            mixin.depends.extend(rel);
            mixin.actions.extend(actions);
            if let Some(location) = line.location {
                mixin.location = location;
            }
            collection.add_mixin(mixin);
        }
        CategoryClass::Action => {
            collection.add_action(Action::from_category(category));
        }
    }
    Ok(())
}

/// Resolve every relation of the categories in `collection` against the
/// collection itself and `model`.
///
/// Kind parents must be kinds and action lists must name actions. Mixin
/// relations are classified: kinds go to `applies`, mixins to `depends`.
/// Anything unresolved is a parsing error.
pub fn dereference_identifiers(collection: &mut Collection, model: &Model) -> Result<()> {
    let class_of = |collection: &Collection, id: &TypeIdentifier| -> Result<CategoryClass> {
        collection
            .category(id)
            .or_else(|| model.category(id))
            .map(|c| c.class())
            .ok_or_else(|| OcciError::parsing(format!("category {id} is not defined")))
    };
    let expect_class = |collection: &Collection, id: &TypeIdentifier, class: CategoryClass| -> Result<()> {
        let found = class_of(collection, id)?;
        if found == class {
            Ok(())
        } else {
            Err(OcciError::parsing(format!(
                "{id} is a {}, expected a {}",
                found.as_str(),
                class.as_str()
            )))
        }
    };

    for kind in collection.kinds.values() {
        if let Some(ref parent) = kind.parent {
            expect_class(collection, parent, CategoryClass::Kind)?;
        }
        for action in &kind.actions {
            expect_class(collection, action, CategoryClass::Action)?;
        }
    }

    let mut classified = Vec::new();
    for (id, mixin) in &collection.mixins {
        for action in &mixin.actions {
            expect_class(collection, action, CategoryClass::Action)?;
        }
        let mut depends = Vec::new();
        let mut applies = Vec::new();
        for related in mixin.related() {
            match class_of(collection, related)? {
                CategoryClass::Kind => applies.push(related.clone()),
                CategoryClass::Mixin => depends.push(related.clone()),
                CategoryClass::Action => {
                    return Err(OcciError::parsing(format!(
                        "mixin {id} cannot relate to action {related}"
                    )));
                }
            }
        }
        classified.push((id.clone(), depends, applies));
    }
    for (id, depends, applies) in classified {
        if let Some(mixin) = collection.mixins.get_mut(&id) {
            mixin.depends = depends.into_iter().collect();
            mixin.applies = applies.into_iter().collect();
        }
    }
    Ok(())
}

// ============================================================================
// ENTITIES
// ============================================================================

/// Parse one resource or link. The kind and mixins must be known to
/// `model`, and every attribute must be declared by one of them.
pub fn parse_entity(body: &str, model: &Model, builder: &dyn InstanceBuilder) -> Result<Instance> {
    let lines = lines(body)?;

    let mut kind = None;
    let mut mixins = Vec::new();
    for numbered in &lines {
        let Line::Category(ref category) = numbered.line else {
            continue;
        };
        let id = identifier_at(numbered.number, &category.identifier())?;
        match category.class {
            CategoryClass::Kind if kind.is_some() => {
                return Err(OcciError::parsing_at(numbered.number, "more than one kind"));
            }
            CategoryClass::Kind => kind = Some((numbered.number, id)),
            CategoryClass::Mixin => mixins.push((numbered.number, id)),
            CategoryClass::Action => {
                return Err(OcciError::parsing_at(
                    numbered.number,
                    "action category in an entity body",
                ));
            }
        }
    }
    let (kind_line, kind) = kind.ok_or_else(|| OcciError::parsing("entity without a kind"))?;
    if model.kind(&kind).is_err() {
        return Err(OcciError::parsing_at(kind_line, format!("kind {kind} is not defined")));
    }

    let mut instance = builder.build(&kind, Attributes::new(), model)?;
    for (number, id) in &mixins {
        let mixin = model
            .mixin(id)
            .map_err(|_| OcciError::parsing_at(*number, format!("mixin {id} is not defined")))?;
        instance.entity_mut().add_mixin(mixin);
    }

    for numbered in &lines {
        let Line::Attribute(ref attribute) = numbered.line else {
            continue;
        };
        match instance {
            Instance::Link(ref mut link) if attribute.name == ATTR_TARGET_KIND => {
                let rel = attribute.value.as_str().ok_or_else(|| {
                    let message = format!("{ATTR_TARGET_KIND} must be a category identifier");
                    OcciError::parsing_at(numbered.number, message)
                })?;
                link.rel = Some(identifier_at(numbered.number, rel)?);
            }
            _ => assign(&mut instance.entity_mut().attributes, numbered.number, attribute)?,
        }
    }

    for numbered in &lines {
        if let Line::Link(ref link) = numbered.line {
            let Instance::Resource(ref mut resource) = instance else {
                return Err(OcciError::parsing_at(numbered.number, "a link cannot own links"));
            };
            if link.is_action() {
                let rel = link
                    .rel
                    .as_deref()
                    .ok_or_else(|| OcciError::parsing_at(numbered.number, "action link without rel"))?;
                let action = identifier_at(numbered.number, rel)?;
                resource.entity.actions.insert(action);
            } else {
                let source = model.location_of(&resource.entity);
                let built = build_link(numbered.number, link, &source, model, builder)?;
                resource.links.push(built);
            }
        }
    }

    debug!(kind = %kind, id = instance.id(), "parsed text entity");
    Ok(instance)
}

fn assign(attributes: &mut Attributes, number: usize, line: &AttributeLine) -> Result<()> {
    if attributes.definition(&line.name).is_none() {
        return Err(OcciError::parsing_at(
            number,
            format!("attribute {} is not declared", line.name),
        ));
    }
    attributes.set(&line.name, line.value.clone())
}

fn build_link(
    number: usize,
    line: &LinkLine,
    source: &str,
    model: &Model,
    builder: &dyn InstanceBuilder,
) -> Result<Link> {
    let mut categories = line.categories.iter();
    let kind = match categories.next() {
        Some(kind) => identifier_at(number, kind)?,
        None => identifier_at(number, LINK_KIND)?,
    };
    if model.kind(&kind).is_err() {
        return Err(OcciError::parsing_at(number, format!("kind {kind} is not defined")));
    }
    let Instance::Link(mut link) = builder.build(&kind, Attributes::new(), model)? else {
        return Err(OcciError::parsing_at(number, format!("{kind} is not a link kind")));
    };
    for mixin in categories {
        let id = identifier_at(number, mixin)?;
        let mixin = model
            .mixin(&id)
            .map_err(|_| OcciError::parsing_at(number, format!("mixin {id} is not defined")))?;
        link.entity.add_mixin(mixin);
    }
    for attribute in &line.attributes {
        assign(&mut link.entity.attributes, number, attribute)?;
    }
    link.rel = line
        .rel
        .as_deref()
        .map(|rel| identifier_at(number, rel))
        .transpose()?;
    link.entity.location = line.self_location.clone();
    link.set_source(source)?;
    link.set_target(line.target.clone())?;
    Ok(link)
}

/// Parse the entity or action trigger in `body` into a collection.
pub fn parse_entities(body: &str, model: &Model, builder: &dyn InstanceBuilder) -> Result<Collection> {
    let triggers_action = lines(body)?.iter().any(|numbered| {
        matches!(numbered.line, Line::Category(ref c) if c.class == CategoryClass::Action)
    });
    let mut collection = Collection::new();
    if triggers_action {
        collection.action = Some(parse_action(body, model)?);
    } else {
        collection.add_instance(parse_entity(body, model, builder)?);
    }
    Ok(collection)
}

// ============================================================================
// ACTIONS AND LOCATIONS
// ============================================================================

/// Parse an action trigger: one action category known to `model` plus its
/// parameters as attribute lines.
pub fn parse_action(body: &str, model: &Model) -> Result<ActionInstance> {
    let lines = lines(body)?;
    let mut found = None;
    for numbered in &lines {
        let Line::Category(ref category) = numbered.line else {
            continue;
        };
        if category.class != CategoryClass::Action {
            return Err(OcciError::parsing_at(
                numbered.number,
                format!("expected an action, found a {}", category.class.as_str()),
            ));
        }
        if found.is_some() {
            return Err(OcciError::parsing_at(numbered.number, "more than one action"));
        }
        found = Some((numbered.number, identifier_at(numbered.number, &category.identifier())?));
    }
    let (number, id) = found.ok_or_else(|| OcciError::parsing("action trigger without an action"))?;
    let action = match model.category(&id) {
        Some(CategoryRef::Action(action)) => action,
        _ => return Err(OcciError::parsing_at(number, format!("action {id} is not defined"))),
    };

    let mut trigger = ActionInstance::new(action);
    for numbered in &lines {
        if let Line::Attribute(ref attribute) = numbered.line {
            assign(&mut trigger.attributes, numbered.number, attribute)?;
        }
    }
    debug!(action = %id, "parsed text action trigger");
    Ok(trigger)
}

/// Parse `X-OCCI-Location:` lines.
pub fn parse_locations(body: &str) -> Result<Vec<String>> {
    Ok(lines(body)?
        .into_iter()
        .filter_map(|numbered| match numbered.line {
            Line::Location(location) => Some(location),
            _ => None,
        })
        .collect())
}

/// Whether `body` has no content lines.
pub fn is_blank(body: &str) -> bool {
    body.lines().all(|line| line.trim().is_empty())
}
