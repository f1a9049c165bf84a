//! Tests for text literal coercion.

use crate::helpers::{COMPUTE_BODY, infra};
use occi::attributes::AttributeValue;
use occi::{Format, Model, ModelInstanceBuilder, Text};
use rstest::rstest;

#[rstest]
#[case("2", Some(AttributeValue::Integer(2)))]
#[case("-7", Some(AttributeValue::Integer(-7)))]
#[case("1.5", Some(AttributeValue::Float(1.5)))]
#[case("1e3", Some(AttributeValue::Float(1000.0)))]
#[case("true", Some(AttributeValue::Boolean(true)))]
#[case("false", Some(AttributeValue::Boolean(false)))]
#[case("yes", None)]
#[case("1.2.3", None)]
fn test_bare_literals(#[case] word: &str, #[case] expected: Option<AttributeValue>) {
    assert_eq!(AttributeValue::from_bare_literal(word), expected);
}

#[rstest]
#[case(AttributeValue::Integer(4), "4")]
#[case(AttributeValue::Float(2.0), "2.0")]
#[case(AttributeValue::Float(0.25), "0.25")]
#[case(AttributeValue::Boolean(true), "true")]
#[case(AttributeValue::from("say \"hi\""), "\"say \\\"hi\\\"\"")]
fn test_text_literals(#[case] value: AttributeValue, #[case] expected: &str) {
    assert_eq!(value.to_text_literal(), expected);
}

#[test]
fn test_entity_literals_are_typed() {
    let model = Model::infrastructure().unwrap();
    let parsed = Text
        .parse_entities(COMPUTE_BODY, &model, &ModelInstanceBuilder)
        .unwrap();
    let resource = &parsed.resources["vm-1"];
    assert_eq!(resource.kind(), &infra("compute"));

    let attributes = &resource.entity.attributes;
    assert_eq!(attributes.get("occi.compute.cores"), Some(&AttributeValue::Integer(2)));
    assert_eq!(attributes.get("occi.compute.memory"), Some(&AttributeValue::Float(1.5)));
    assert_eq!(attributes.get_str("occi.core.title"), Some("web server"));
}

#[test]
fn test_quoted_number_stays_string() {
    let model = Model::infrastructure().unwrap();
    let body = COMPUTE_BODY.replace("occi.compute.cores=2", "occi.compute.cores=\"2\"");
    let err = Text
        .parse_entities(&body, &model, &ModelInstanceBuilder)
        .unwrap_err();
    assert!(matches!(err, occi::OcciError::AttributeType(_)));
}
