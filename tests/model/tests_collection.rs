//! Tests for collection set algebra and lookups.

use crate::helpers::infra;
use occi::base::constants::ATTR_ID;
use occi::collection::Lookup;
use occi::{Collection, Kind, Link, Model, Resource, TypeIdentifier};

fn compute(id: &str, title: &str) -> Resource {
    let mut resource = Resource::new(infra("compute"));
    resource.entity.attributes.set(ATTR_ID, id).unwrap();
    resource.entity.set_title(title).unwrap();
    resource
}

#[test]
fn test_merge_never_overwrites() {
    let mut left = Collection::new().with_resource(compute("vm-1", "left"));
    let right = Collection::new()
        .with_resource(compute("vm-1", "right"))
        .with_resource(compute("vm-2", "added"));

    left.merge(&right);
    assert_eq!(left.resources.len(), 2);
    assert_eq!(left.resources["vm-1"].entity.title(), Some("left"));
    assert_eq!(left.resources["vm-2"].entity.title(), Some("added"));
}

#[test]
fn test_merge_categories_keeps_left() {
    let mut left = Collection::new()
        .with_kind(Kind::new("http://example.org/occi#", "thing").unwrap().with_title("mine"));
    let right = Collection::new()
        .with_kind(Kind::new("http://example.org/occi#", "thing").unwrap().with_title("theirs"));
    left.merge(&right);

    let id = TypeIdentifier::new("http://example.org/occi#", "thing").unwrap();
    assert_eq!(left.kinds[&id].category.title.as_deref(), Some("mine"));
}

#[test]
fn test_intersect_by_key() {
    let left = Collection::new()
        .with_resource(compute("vm-1", "left"))
        .with_resource(compute("vm-2", "left"));
    let right = Collection::new()
        .with_resource(compute("vm-2", "right"))
        .with_resource(compute("vm-3", "right"));

    let shared = left.intersect(&right);
    assert_eq!(shared.resources.len(), 1);
    assert_eq!(shared.resources["vm-2"].entity.title(), Some("left"));
}

#[test]
fn test_get_by_id_prefers_categories() {
    let model = Model::infrastructure().unwrap();
    let mut collection = model.collection().clone();
    collection.add_resource(compute("vm-1", "web"));

    let compute_id = format!("{}", infra("compute"));
    assert!(matches!(
        collection.get_by_id(&compute_id, false),
        Some(Lookup::Category(_))
    ));
    assert!(matches!(
        collection.get_by_id("vm-1", false),
        Some(Lookup::Resource(_))
    ));
    assert!(collection.get_by_id("vm-1", true).is_none());
}

#[test]
fn test_get_by_location() {
    let model = Model::infrastructure().unwrap();
    let mut collection = model.collection().clone();
    let mut resource = compute("vm-1", "web");
    let mut link = Link::new(infra("storagelink"));
    link.entity.attributes.set(ATTR_ID, "sl-1").unwrap();
    link.set_target("/storage/1").unwrap();
    resource.add_link(link).unwrap();
    collection.add_resource(resource);

    let found = collection.get_by_location("/compute/").unwrap();
    assert_eq!(found.as_category().unwrap().identifier(), &infra("compute"));

    let found = collection.get_by_location("/compute/vm-1").unwrap();
    assert_eq!(found.entity().unwrap().id(), "vm-1");

    let found = collection.get_by_location("/storagelink/sl-1").unwrap();
    assert!(matches!(found, Lookup::Link(_)));
    assert!(collection.get_by_location("/nowhere").is_none());
}
