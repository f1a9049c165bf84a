//! Tests for the JSON rendering.

use crate::helpers::{INFRA, action, example, infra, tagged_model};
use occi::{Format, Json, Model, ModelInstanceBuilder, Text};
use serde_json::{Value, json};

fn collection_document() -> String {
    json!({
        "resources": [{
            "kind": format!("{INFRA}compute"),
            "mixins": ["http://example.org/occi#tagged"],
            "id": "vm-1",
            "title": "web",
            "attributes": {
                "occi": { "compute": { "cores": 4, "memory": 2.5 } },
                "org.example.owner": "alice"
            },
            "actions": [action("compute", "start")],
            "links": ["sl-1"]
        }],
        "links": [{
            "kind": format!("{INFRA}storagelink"),
            "id": "sl-1",
            "source": "/compute/vm-1",
            "target": { "location": "/storage/disk-1", "kind": format!("{INFRA}storage") },
            "attributes": { "occi.storagelink.deviceid": "sda" }
        }, {
            "kind": format!("{INFRA}networkinterface"),
            "id": "ni-1",
            "source": "/compute/vm-1",
            "target": "/network/net-1",
            "attributes": { "occi.networkinterface.mac": "00:11:22:33:44:55" }
        }]
    })
    .to_string()
}

#[test]
fn test_collection_document() {
    let model = tagged_model();
    let parsed = Json
        .parse_entities(&collection_document(), &model, &ModelInstanceBuilder)
        .unwrap();

    let resource = &parsed.resources["vm-1"];
    assert!(resource.entity.mixins.contains(&example("tagged")));
    assert_eq!(resource.entity.attributes.get("occi.compute.cores").and_then(|v| v.as_i64()), Some(4));
    assert_eq!(resource.entity.attributes.get_str("org.example.owner"), Some("alice"));
    assert_eq!(resource.links.len(), 1);
    assert_eq!(resource.links[0].id(), "sl-1");

    // referenced links move into their resource, the rest stay on top
    assert_eq!(parsed.links.len(), 1);
    assert!(parsed.links.contains_key("ni-1"));
    assert_eq!(parsed.all_links().count(), 2);
    assert!(model.check(&parsed).is_ok());
}

#[test]
fn test_collection_round_trip() {
    let model = tagged_model();
    let parsed = Json
        .parse_entities(&collection_document(), &model, &ModelInstanceBuilder)
        .unwrap();
    let rendered = Json.render(&parsed).unwrap();
    let value: Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(value["resources"][0]["links"][0]["target"]["location"], "/storage/disk-1");
    assert_eq!(value["links"][0]["source"]["location"], "/compute/vm-1");

    let again = Json
        .parse_entities(&rendered, &model, &ModelInstanceBuilder)
        .unwrap();
    assert_eq!(again.resources.len(), 1);
    assert_eq!(again.links.len(), 1);
    assert_eq!(
        again.resources["vm-1"].entity.attributes.to_flat_json(),
        parsed.resources["vm-1"].entity.attributes.to_flat_json()
    );
}

#[test]
fn test_unresolved_link_reference() {
    let model = tagged_model();
    let input = collection_document().replace("\"links\":[\"sl-1\"]", "\"links\":[\"sl-9\"]");
    let err = Json
        .parse_entities(&input, &model, &ModelInstanceBuilder)
        .unwrap_err();
    assert!(err.is_parsing());
    assert!(err.to_string().contains("sl-9"), "{err}");
}

#[test]
fn test_user_categories() {
    let model = Model::infrastructure().unwrap();
    let input = json!({
        "kinds": [{
            "term": "vm",
            "scheme": "http://example.org/occi#",
            "title": "Virtual machine",
            "parent": format!("{INFRA}compute"),
            "location": "/vm/",
            "attributes": {
                "org": { "example": { "flavor": { "type": "string", "required": true, "pattern": "small|large" } } },
                "org.example.gpus": { "type": "number", "default": 0 }
            }
        }],
        "mixins": [{
            "term": "gold",
            "scheme": "http://example.org/occi#",
            "applies": ["http://example.org/occi#vm"],
            "depends": [format!("{INFRA}os_tpl")]
        }]
    })
    .to_string();

    let parsed = Json.parse_categories(&input, &model).unwrap();
    let vm = &parsed.kinds[&example("vm")];
    assert_eq!(vm.parent, Some(infra("compute")));
    let flavor = vm.category.attributes.definition("org.example.flavor").unwrap();
    assert!(flavor.required);
    assert_eq!(flavor.pattern().map(|p| p.as_str()), Some("small|large"));
    assert!(vm.category.attributes.definition("org.example.gpus").is_some());
    assert!(parsed.mixins[&example("gold")].depends.contains(&infra("os_tpl")));

    // the same categories survive the text rendering
    let text = Text.render(&parsed).unwrap();
    let from_text = Text.parse_categories(&text, &model).unwrap();
    assert_eq!(from_text.kinds[&example("vm")].parent, Some(infra("compute")));
}

#[test]
fn test_default_must_match_type() {
    let model = Model::core().unwrap();
    let input = r#"{"mixins": [{"term": "m", "scheme": "http://example.org/occi#",
        "attributes": {"org.example.n": {"type": "number", "default": "zero"}}}]}"#;
    assert!(Json.parse_categories(input, &model).unwrap_err().is_parsing());
}
