//! Text rendering of collections, as body lines or as `text/occi` headers.

use indexmap::IndexMap;
use tracing::debug;

use super::parser::headers;
use crate::attributes::quote;
use crate::base::TypeIdentifier;
use crate::base::constants::{ATTR_SOURCE, ATTR_TARGET, ATTR_TARGET_KIND};
use crate::category::{CategoryClass, CategoryRef};
use crate::collection::Collection;
use crate::entity::{ActionInstance, Entity, Link, Resource};
use crate::error::{OcciError, Result};

type HeaderLine = (&'static str, String);

/// Full `Category:` value of a kind, mixin or action.
pub fn category_value(category: CategoryRef<'_>) -> String {
    let inner = category.category();
    let mut value = short_category_value(inner.identifier(), category.class());
    if let Some(ref title) = inner.title {
        value.push_str(&format!(";title={}", quote(title)));
    }
    let rel: Vec<&str> = match category {
        CategoryRef::Kind(kind) => kind.parent.iter().map(TypeIdentifier::as_str).collect(),
        CategoryRef::Mixin(mixin) => mixin.related().map(TypeIdentifier::as_str).collect(),
        CategoryRef::Action(_) => Vec::new(),
    };
    if !rel.is_empty() {
        value.push_str(&format!(";rel={}", quote(&rel.join(" "))));
    }
    if let Some(location) = category.location() {
        value.push_str(&format!(";location={}", quote(location)));
    }
    value.push_str(&inner.attributes.to_string_short());
    let actions: Vec<&str> = match category {
        CategoryRef::Kind(kind) => kind.actions.iter().map(TypeIdentifier::as_str).collect(),
        CategoryRef::Mixin(mixin) => mixin.actions.iter().map(TypeIdentifier::as_str).collect(),
        CategoryRef::Action(_) => Vec::new(),
    };
    if !actions.is_empty() {
        value.push_str(&format!(";actions={}", quote(&actions.join(" "))));
    }
    value
}

/// `term;scheme="...";class="..."` as used in entity renderings.
fn short_category_value(identifier: &TypeIdentifier, class: CategoryClass) -> String {
    format!(
        "{};scheme={};class={}",
        identifier.term(),
        quote(identifier.scheme()),
        quote(class.as_str())
    )
}

fn entity_lines(entity: &Entity, out: &mut Vec<HeaderLine>) {
    out.push((
        headers::CATEGORY,
        short_category_value(entity.kind(), CategoryClass::Kind),
    ));
    for mixin in &entity.mixins {
        out.push((headers::CATEGORY, short_category_value(mixin, CategoryClass::Mixin)));
    }
    for pair in entity.attributes.text_pairs() {
        out.push((headers::ATTRIBUTE, pair));
    }
}

/// `Link:` value of a resource's link.
fn link_value(link: &Link, collection: &Collection) -> String {
    let mut value = format!("<{}>", link.target().unwrap_or_default());
    if let Some(ref rel) = link.rel {
        value.push_str(&format!(";rel={}", quote(rel.as_str())));
    }
    value.push_str(&format!(";self={}", quote(&collection.entity_location(&link.entity))));
    let categories: Vec<&str> = std::iter::once(link.kind())
        .chain(link.entity.mixins.iter())
        .map(TypeIdentifier::as_str)
        .collect();
    value.push_str(&format!(";category={}", quote(&categories.join(" "))));
    for (name, attribute) in link.entity.attributes.iter() {
        if name != ATTR_SOURCE && name != ATTR_TARGET {
            value.push_str(&format!(";{name}={}", attribute.to_text_literal()));
        }
    }
    value
}

fn resource_lines(resource: &Resource, collection: &Collection, out: &mut Vec<HeaderLine>) {
    entity_lines(&resource.entity, out);
    for link in &resource.links {
        out.push((headers::LINK, link_value(link, collection)));
    }
    let location = collection.entity_location(&resource.entity);
    for action in &resource.entity.actions {
        out.push((
            headers::LINK,
            format!(
                "<{location}?action={}>;rel={}",
                action.term(),
                quote(action.as_str())
            ),
        ));
    }
}

fn action_lines(trigger: &ActionInstance, out: &mut Vec<HeaderLine>) {
    out.push((
        headers::CATEGORY,
        short_category_value(trigger.action(), CategoryClass::Action),
    ));
    for pair in trigger.attributes.text_pairs() {
        out.push((headers::ATTRIBUTE, pair));
    }
}

/// Header lines for `collection`.
///
/// A collection with entities renders its single resource or link, one
/// with only an action trigger renders the trigger, anything else renders
/// its categories.
fn render_lines(collection: &Collection) -> Result<Vec<HeaderLine>> {
    let mut out = Vec::new();
    if collection.has_entities() {
        if collection.entity_count() > 1 {
            return Err(OcciError::rendering(format!(
                "Only one resource allowed in the text rendering, found {}",
                collection.entity_count()
            )));
        }
        if collection.action.is_some() {
            return Err(OcciError::rendering(
                "cannot render an entity together with an action trigger",
            ));
        }
        if let Some(resource) = collection.resources.values().next() {
            resource_lines(resource, collection, &mut out);
        } else if let Some(link) = collection.links.values().next() {
            entity_lines(&link.entity, &mut out);
            if let Some(ref rel) = link.rel {
                out.push((
                    headers::ATTRIBUTE,
                    format!("{ATTR_TARGET_KIND}={}", quote(rel.as_str())),
                ));
            }
        }
    } else if let Some(ref trigger) = collection.action {
        action_lines(trigger, &mut out);
    } else {
        for category in collection.categories() {
            out.push((headers::CATEGORY, category_value(category)));
        }
    }
    Ok(out)
}

/// Render as a text body, one `Name: value` line per header value.
pub fn render(collection: &Collection) -> Result<String> {
    let lines = render_lines(collection)?;
    debug!(lines = lines.len(), "rendered text body");
    Ok(lines
        .into_iter()
        .map(|(name, value)| format!("{name}: {value}\n"))
        .collect())
}

/// Render as `text/occi` headers: header name to comma-joined values.
pub fn render_headers(collection: &Collection) -> Result<IndexMap<String, String>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, value) in render_lines(collection)? {
        grouped.entry(name.to_string()).or_default().push(value);
    }
    debug!(headers = grouped.len(), "rendered text headers");
    Ok(grouped
        .into_iter()
        .map(|(name, values)| (name, values.join(",")))
        .collect())
}

/// `X-OCCI-Location:` lines.
pub fn render_locations(locations: &[String]) -> String {
    locations
        .iter()
        .map(|location| format!("{}: {location}\n", headers::LOCATION))
        .collect()
}

/// Header form of [`render_locations`].
pub fn render_location_headers(locations: &[String]) -> IndexMap<String, String> {
    let mut out = IndexMap::new();
    if !locations.is_empty() {
        out.insert(headers::LOCATION.to_string(), locations.join(","));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::constants::{INFRASTRUCTURE_NAMESPACE, INFRASTRUCTURE_SCHEME, LINK_KIND};
    use crate::collection::Model;

    fn infra(term: &str) -> TypeIdentifier {
        TypeIdentifier::new(INFRASTRUCTURE_SCHEME, term).unwrap()
    }

    #[test]
    fn test_category_value() {
        let model = Model::infrastructure().unwrap();
        let compute = model.category(&infra("compute")).unwrap();
        let value = category_value(compute);
        assert!(value.starts_with(
            "compute;scheme=\"http://schemas.ogf.org/occi/infrastructure#\";class=\"kind\";title=\"Compute Resource\";rel=\"http://schemas.ogf.org/occi/core#resource\";location=\"/compute/\";attributes=\""
        ));
        assert!(value.contains("occi.compute.architecture"));
        assert!(value.contains("occi.compute.state{immutable}"));
        assert!(value.ends_with("compute/action#suspend\""));
    }

    #[test]
    fn test_resource_lines_in_order() {
        let mut resource = Resource::new(infra("compute"));
        resource.entity.set_title("vm").unwrap();
        resource.entity.mixins.insert(infra("os_tpl"));
        resource
            .entity
            .actions
            .insert(TypeIdentifier::parse(&format!("{INFRASTRUCTURE_NAMESPACE}compute/action#start")).unwrap());
        let mut link = Link::new(TypeIdentifier::parse(LINK_KIND).unwrap());
        link.set_target("/storage/1").unwrap();
        resource.add_link(link).unwrap();
        let id = resource.id().to_string();

        let body = render(&Collection::new().with_resource(resource)).unwrap();
        let names: Vec<&str> = body.lines().map(|l| l.split(':').next().unwrap()).collect();
        assert_eq!(
            names,
            vec!["Category", "Category", "X-OCCI-Attribute", "X-OCCI-Attribute", "Link", "Link"]
        );
        assert!(body.contains("Link: </storage/1>;self=\"/link/"));
        assert!(body.contains(&format!("Link: </compute/{id}?action=start>;rel=")));
    }

    #[test]
    fn test_only_one_resource() {
        let collection = Collection::new()
            .with_resource(Resource::new(infra("compute")))
            .with_resource(Resource::new(infra("compute")));
        let err = render(&collection).unwrap_err();
        assert!(err.to_string().contains("Only one resource allowed"));
        assert!(render_headers(&collection).is_err());
    }

    #[test]
    fn test_headers_join_values() {
        let model = Model::core().unwrap();
        let headers = render_headers(model.collection()).unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Category"].matches("class=\"kind\"").count(), 3);

        let locations = vec!["/compute/1".to_string(), "/compute/2".to_string()];
        assert_eq!(
            render_locations(&locations),
            "X-OCCI-Location: /compute/1\nX-OCCI-Location: /compute/2\n"
        );
        assert_eq!(render_location_headers(&locations)["X-OCCI-Location"], "/compute/1,/compute/2");
    }
}
