//! Tests for the category registry and entity validation.

use crate::helpers::{EXAMPLE, example, infra, tagged_model};
use occi::base::constants::{ATTR_ID, ENTITY_KIND, LINK_KIND, RESOURCE_KIND};
use occi::{Model, OcciError, Resource, TypeIdentifier};
use rstest::rstest;

fn id(identifier: &str) -> TypeIdentifier {
    TypeIdentifier::parse(identifier).unwrap()
}

#[test]
fn test_infrastructure_contents() {
    let model = Model::infrastructure().unwrap();
    assert_eq!(model.kinds().count(), 8);
    assert_eq!(model.mixins().count(), 4);
    assert_eq!(model.actions().count(), 11);

    let compute = model.kind(&infra("compute")).unwrap();
    assert_eq!(compute.location, "/compute/");
    assert_eq!(compute.parent, Some(id(RESOURCE_KIND)));
    assert!(compute.actions.iter().any(|a| a.term() == "restart"));
}

#[rstest]
#[case("compute", RESOURCE_KIND, true)]
#[case("compute", ENTITY_KIND, true)]
#[case("networkinterface", LINK_KIND, true)]
#[case("storagelink", RESOURCE_KIND, false)]
#[case("storage", LINK_KIND, false)]
fn test_kind_relations(#[case] term: &str, #[case] other: &str, #[case] related: bool) {
    let model = Model::infrastructure().unwrap();
    assert_eq!(model.is_related(&infra(term), &id(other)), related);
}

#[test]
fn test_ancestors_nearest_first() {
    let model = Model::infrastructure().unwrap();
    let terms: Vec<&str> = model
        .ancestors(&infra("network"))
        .unwrap()
        .iter()
        .map(|kind| kind.identifier().term())
        .collect();
    assert_eq!(terms, vec!["network", "resource", "entity"]);
}

#[test]
fn test_registered_mixin_applies_to_compute() {
    let model = tagged_model();
    let tagged = model.mixin(&example("tagged")).unwrap();
    assert!(tagged.applies.contains(&infra("compute")));
    assert!(tagged.depends.is_empty());
    assert_eq!(tagged.location, "/tagged/");
    assert!(model.is_related(&example("tagged"), &infra("compute")));
}

#[test]
fn test_definitions_inherit() {
    let model = tagged_model();
    let definitions = model
        .definitions_for(&infra("compute"), [example("tagged")].iter())
        .unwrap();
    for name in [ATTR_ID, "occi.core.summary", "occi.compute.cores", "org.example.tag"] {
        assert!(definitions.definition(name).is_some(), "{name} should be defined");
    }
    // definitions only, no values
    assert_eq!(definitions.iter().count(), 0);
}

#[test]
fn test_check_entity() {
    let mut model = tagged_model();
    let mut resource = Resource::new(infra("compute"));
    model.attach(&mut resource.entity).unwrap();
    assert!(model.check_entity(&resource.entity).is_ok());

    resource
        .entity
        .add_mixin(model.mixin(&example("tagged")).unwrap());
    assert!(matches!(
        model.check_entity(&resource.entity),
        Err(OcciError::AttributeValidation(_))
    ));
    resource
        .entity
        .attributes
        .set("org.example.owner", "alice")
        .unwrap();
    assert!(model.check_entity(&resource.entity).is_ok());

    assert!(resource
        .entity
        .attributes
        .set("occi.compute.architecture", "arm")
        .is_err());
}

#[test]
fn test_check_unknown_categories() {
    let model = Model::infrastructure().unwrap();
    let resource = Resource::new(TypeIdentifier::new(EXAMPLE, "thing").unwrap());
    assert!(matches!(
        model.check_entity(&resource.entity),
        Err(OcciError::CategoryNotDefined(_))
    ));
}

#[test]
fn test_attach_records_back_references() {
    let mut model = tagged_model();
    let mut resource = Resource::new(infra("compute"));
    resource
        .entity
        .mixins
        .insert(example("tagged"));
    resource.entity.bind_model(&mut model).unwrap();

    let id = resource.id().to_string();
    assert!(model.kind(&infra("compute")).unwrap().has_entity(&id));
    assert!(model.mixin(&example("tagged")).unwrap().has_entity(&id));
    assert!(resource.entity.attributes.definition("org.example.tag").is_some());

    model.detach(&resource.entity);
    assert!(!model.kind(&infra("compute")).unwrap().has_entity(&id));
}
