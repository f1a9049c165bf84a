//! Tests for the XML rendering.

use crate::helpers::{COMPUTE_BODY, action, infra};
use occi::{Format, Json, Model, ModelInstanceBuilder, Text, Xml};

#[test]
fn test_text_to_xml_to_json() {
    let model = Model::infrastructure().unwrap();
    let parsed = Text
        .parse_entities(COMPUTE_BODY, &model, &ModelInstanceBuilder)
        .unwrap();

    let xml = Xml.render(&parsed).unwrap();
    assert!(xml.contains("<occi.compute.cores type=\"number\">2</occi.compute.cores>"));

    let from_xml = Xml
        .parse_entities(&xml, &model, &ModelInstanceBuilder)
        .unwrap();
    assert_eq!(
        Json.render(&from_xml).unwrap(),
        Json.render(&parsed).unwrap()
    );
}

#[test]
fn test_action_trigger() {
    let model = Model::infrastructure().unwrap();
    let input = format!(
        "<occi>\
         <action>{}</action>\
         <attributes><size type=\"number\">10.5</size></attributes>\
         </occi>",
        action("storage", "resize")
    );
    let trigger = Xml.parse_action(&input, &model).unwrap();
    assert_eq!(trigger.action().term(), "resize");
    assert_eq!(trigger.attributes.get("size").and_then(|v| v.as_f64()), Some(10.5));

    let unknown = input.replace("#resize", "#shrink");
    assert!(Xml.parse_action(&unknown, &model).is_err());
}

#[test]
fn test_categories_keep_locations() {
    let model = Model::infrastructure().unwrap();
    let xml = Xml.render(model.collection()).unwrap();
    let parsed = Xml.parse_categories(&xml, &model).unwrap();
    for term in ["compute", "network", "storage"] {
        assert_eq!(parsed.kinds[&infra(term)].location, format!("/{term}/"));
    }
}
