//! Tests for the text rendering: category grammar, entity round trips and
//! the header form.

use crate::helpers::{
    COMPUTE_BODY, INFRA, INFRA_NAMESPACE, TAGGED_MIXIN, action, example, infra, tagged_model,
};
use occi::{
    Collection, Format, Instance, InstanceBuilder, Model, ModelInstanceBuilder, Resource, Text,
    TextHeaders, TypeIdentifier,
};
use rstest::rstest;

fn tagged_resource(model: &Model) -> Resource {
    let Instance::Resource(mut resource) = ModelInstanceBuilder
        .build(&infra("compute"), Default::default(), model)
        .unwrap()
    else {
        panic!("compute builds a resource");
    };
    resource
        .entity
        .add_mixin(model.mixin(&example("tagged")).unwrap());
    let attributes = &mut resource.entity.attributes;
    attributes.set("occi.core.id", "vm-1").unwrap();
    attributes.set("occi.core.title", "web \"front\" server").unwrap();
    attributes.set("org.example.tag", "blue").unwrap();
    attributes.set("org.example.owner", "alice").unwrap();
    resource
}

#[test]
fn test_resource_round_trip() {
    let model = tagged_model();
    let resource = tagged_resource(&model);
    let body = Text
        .render(&Collection::new().with_resource(resource.clone()))
        .unwrap();
    assert!(body.contains("X-OCCI-Attribute: org.example.tag=\"blue\"\n"));

    let parsed = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap();
    let again = &parsed.resources["vm-1"];
    assert_eq!(again.kind(), resource.kind());
    assert_eq!(again.entity.mixins, resource.entity.mixins);
    assert_eq!(again.entity.title(), Some("web \"front\" server"));
    assert_eq!(
        again.entity.attributes.to_flat_json(),
        resource.entity.attributes.to_flat_json()
    );
    assert!(model.check(&parsed).is_ok());
}

#[test]
fn test_multi_line_title_round_trip() {
    let model = tagged_model();
    let mut resource = tagged_resource(&model);
    resource.entity.set_title("line one\nline two\r\n\tend").unwrap();
    let body = Text
        .render(&Collection::new().with_resource(resource.clone()))
        .unwrap();
    assert!(
        body.lines()
            .all(|line| line.starts_with("Category:") || line.starts_with("X-OCCI-Attribute:")),
        "{body}"
    );

    let parsed = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap();
    assert_eq!(parsed.resources["vm-1"].entity.title(), Some("line one\nline two\r\n\tend"));
}

#[test]
fn test_category_title_with_newline() {
    let model = Model::infrastructure().unwrap();
    let mut extension = Text.parse_categories(TAGGED_MIXIN, &model).unwrap();
    let tagged = extension.mixins.get_mut(&example("tagged")).unwrap();
    tagged.category.title = Some("Tagged\nresources".to_string());

    let body = Text.render(&extension).unwrap();
    assert_eq!(body.lines().count(), 1, "{body}");
    let again = Text.parse_categories(&body, &model).unwrap();
    assert_eq!(
        again.mixins[&example("tagged")].category.title.as_deref(),
        Some("Tagged\nresources")
    );
}

#[test]
fn test_standalone_link_keeps_rel() {
    let model = Model::infrastructure().unwrap();
    let Instance::Link(mut link) = ModelInstanceBuilder
        .build(&infra("storagelink"), Default::default(), &model)
        .unwrap()
    else {
        panic!("storagelink builds a link");
    };
    link.set_source("/compute/vm-1").unwrap();
    link.set_target("/storage/disk-1").unwrap();
    let link = link.with_rel(infra("storage"));

    let body = Text.render(&Collection::new().with_link(link)).unwrap();
    assert!(body.contains(&format!("X-OCCI-Attribute: occi.core.target.kind=\"{INFRA}storage\"\n")));

    let parsed = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap();
    let again = parsed.links.values().next().unwrap();
    assert_eq!(again.rel, Some(infra("storage")));
    assert_eq!(again.target(), Some("/storage/disk-1"));
}

#[test]
fn test_category_listing_round_trip() {
    let model = Model::infrastructure().unwrap();
    let body = Text.render(model.collection()).unwrap();
    assert_eq!(body.lines().count(), 8 + 4 + 11);

    let parsed = Text.parse_categories(&body, &model).unwrap();
    let compute = &parsed.kinds[&infra("compute")];
    assert_eq!(compute.location, "/compute/");
    assert_eq!(compute.actions.len(), 4);
    assert!(compute.category.attributes.definition("occi.compute.cores").is_some());

    let network_scheme = format!("{INFRA_NAMESPACE}network#");
    let ipnetwork = &parsed.mixins[&TypeIdentifier::new(&network_scheme, "ipnetwork").unwrap()];
    assert!(ipnetwork.applies.contains(&infra("network")));
}

#[rstest]
#[case::missing_class("Category: compute; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"")]
#[case::missing_scheme("Category: compute; class=\"kind\"")]
#[case::unknown_class("Category: compute; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"; class=\"thing\"")]
#[case::bad_scheme("Category: compute; scheme=\"no-hash\"; class=\"kind\"")]
#[case::missing_term("Category: ; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"; class=\"kind\"")]
fn test_category_grammar_rejects(#[case] line: &str) {
    let model = Model::infrastructure().unwrap();
    let err = Text.parse_categories(line, &model).unwrap_err();
    assert!(err.is_parsing(), "{err}");
}

#[test]
fn test_undeclared_attribute_rejected() {
    let model = Model::infrastructure().unwrap();
    let body = format!("{COMPUTE_BODY}X-OCCI-Attribute: org.example.tag=\"blue\"\n");
    let err = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap_err();
    assert!(err.is_parsing());
    assert!(err.to_string().contains("line 6"), "{err}");
}

#[test]
fn test_only_one_resource() {
    let model = Model::infrastructure().unwrap();
    let mut collection = Text
        .parse_entities(COMPUTE_BODY, &model, &ModelInstanceBuilder)
        .unwrap();
    collection.add_resource(Resource::new(infra("storage")));

    let err = Text.render(&collection).unwrap_err();
    assert!(err.to_string().contains("Only one resource allowed"), "{err}");
    assert!(TextHeaders.render(&collection).is_err());
}

#[test]
fn test_links_and_actions() {
    let model = Model::infrastructure().unwrap();
    let start = action("compute", "start");
    let body = format!(
        "{COMPUTE_BODY}\
         Link: </storage/disk-1>; rel=\"{INFRA}storage\"; self=\"/storagelink/sl-1\"; category=\"{INFRA}storagelink\"; occi.storagelink.deviceid=\"sda\"\n\
         Link: </compute/vm-1?action=start>; rel=\"{start}\"\n"
    );
    let parsed = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap();
    let resource = &parsed.resources["vm-1"];
    assert_eq!(resource.links.len(), 1);
    let link = &resource.links[0];
    assert_eq!(link.kind(), &infra("storagelink"));
    assert_eq!(link.source(), Some("/compute/vm-1"));
    assert_eq!(link.target(), Some("/storage/disk-1"));
    assert_eq!(link.entity.attributes.get_str("occi.storagelink.deviceid"), Some("sda"));
    assert!(resource.entity.actions.iter().any(|a| a.term() == "start"));

    let rendered = Text.render(&parsed).unwrap();
    assert!(rendered.contains("Link: </storage/disk-1>;rel="));
    assert!(rendered.contains("Link: </compute/vm-1?action=start>;rel="));
}

#[test]
fn test_action_trigger() {
    let model = Model::infrastructure().unwrap();
    let body = format!(
        "Category: stop; scheme=\"{INFRA_NAMESPACE}compute/action#\"; class=\"action\"\n\
         X-OCCI-Attribute: method=\"graceful\"\n"
    );
    let trigger = Text.parse_action(&body, &model).unwrap();
    assert_eq!(trigger.action().term(), "stop");
    assert_eq!(trigger.attributes.get_str("method"), Some("graceful"));

    let parsed = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap();
    assert!(parsed.action.is_some());
    assert!(model.check(&parsed).is_ok());
}

#[test]
fn test_headers_round_trip_categories() {
    let model = Model::infrastructure().unwrap();
    let extension = TextHeaders
        .parse_categories(&TAGGED_MIXIN.replace("\n", ""), &model)
        .unwrap();
    assert_eq!(extension.mixins.len(), 1);

    let block = TextHeaders.render(&extension).unwrap();
    assert!(block.starts_with("Category: tagged;"));
    let again = TextHeaders.parse_categories(&block, &model).unwrap();
    assert_eq!(again.mixins, extension.mixins);
}
