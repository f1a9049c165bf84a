//! Tests for the attribute store: dotted access, definitions and policies.

use occi::attributes::{AttributeDefinition, AttributeType, AttributeValue, Attributes};
use occi::{OcciError, ValidationPolicy};
use rstest::rstest;

#[test]
fn test_dotted_set_and_get() {
    let mut attributes = Attributes::new();
    attributes.set("a.b.c", 5).unwrap();

    assert_eq!(attributes.get("a.b.c"), Some(&AttributeValue::Integer(5)));
    assert_eq!(
        attributes.names().get("a.b.c"),
        Some(&Some(AttributeValue::Integer(5)))
    );

    let sub = attributes.namespace("a.b").unwrap();
    assert_eq!(sub.get("c"), Some(&AttributeValue::Integer(5)));
}

#[test]
fn test_missing_namespace() {
    let mut attributes = Attributes::new();
    attributes.set("a.b.c", 5).unwrap();

    assert_eq!(attributes.fetch("a.b.x").unwrap(), None);
    assert!(matches!(
        attributes.fetch("x.y.z"),
        Err(OcciError::AttributeMissing(_))
    ));
    assert!(matches!(
        attributes.namespace("nope"),
        Err(OcciError::AttributeMissing(_))
    ));
}

#[test]
fn test_convert_keeps_definitions_and_defaults() {
    let mut attributes = Attributes::new();
    attributes
        .define(
            "occi.compute.state",
            AttributeDefinition::new(AttributeType::String).with_default("inactive"),
        )
        .unwrap();
    attributes.set("occi.compute.state", "active").unwrap();

    let converted = attributes.convert();
    assert_eq!(converted.get("occi.compute.state"), None);
    assert!(converted.names().contains_key("occi.compute.state"));
    let definition = converted.definition("occi.compute.state").unwrap();
    assert_eq!(definition.default, Some(AttributeValue::from("inactive")));

    // the source store is untouched
    assert_eq!(attributes.get_str("occi.compute.state"), Some("active"));

    let mut defaulted = converted.clone();
    defaulted.apply_defaults();
    assert_eq!(defaulted.get_str("occi.compute.state"), Some("inactive"));
}

fn architecture(policy: ValidationPolicy) -> Attributes {
    let mut attributes = Attributes::with_policy(policy);
    attributes
        .define(
            "occi.compute.architecture",
            AttributeDefinition::new(AttributeType::String)
                .with_pattern("x86|x64")
                .unwrap(),
        )
        .unwrap();
    attributes
}

#[rstest]
#[case(ValidationPolicy::STRICT, false)]
#[case(ValidationPolicy::COMPATIBLE, true)]
#[case(ValidationPolicy::UNCHECKED, true)]
fn test_pattern_policy(#[case] policy: ValidationPolicy, #[case] accepted: bool) {
    let mut attributes = architecture(policy);
    assert!(attributes.set("occi.compute.architecture", "x64").is_ok());

    let result = attributes.set("occi.compute.architecture", "sparc");
    assert_eq!(result.is_ok(), accepted);
    if accepted {
        assert_eq!(attributes.get_str("occi.compute.architecture"), Some("sparc"));
    } else {
        assert!(matches!(result, Err(OcciError::AttributeType(_))));
        assert_eq!(attributes.get_str("occi.compute.architecture"), Some("x64"));
    }
}

#[test]
fn test_pattern_is_anchored() {
    let mut attributes = architecture(ValidationPolicy::STRICT);
    assert!(attributes.set("occi.compute.architecture", "x86_64").is_err());
}

#[test]
fn test_type_mismatch() {
    let mut attributes = Attributes::new();
    attributes
        .define("occi.compute.cores", AttributeDefinition::new(AttributeType::Integer))
        .unwrap();
    let err = attributes.set("occi.compute.cores", "two").unwrap_err();
    assert!(matches!(err, OcciError::AttributeType(_)));
}

#[test]
fn test_check_required() {
    let mut attributes = Attributes::new();
    attributes
        .define(
            "occi.core.id",
            AttributeDefinition::new(AttributeType::String).with_required(true),
        )
        .unwrap();
    assert!(matches!(
        attributes.check(),
        Err(OcciError::AttributeValidation(_))
    ));
    attributes.set("occi.core.id", "1").unwrap();
    assert!(attributes.check().is_ok());
}

#[test]
fn test_merge_keeps_existing() {
    let mut left = Attributes::new();
    left.set("occi.core.title", "left").unwrap();
    let mut right = Attributes::new();
    right.set("occi.core.title", "right").unwrap();
    right.set("occi.core.summary", "added").unwrap();

    left.merge(&right);
    assert_eq!(left.get_str("occi.core.title"), Some("left"));
    assert_eq!(left.get_str("occi.core.summary"), Some("added"));
}

#[rstest]
#[case("")]
#[case("a/b")]
#[case("a..b")]
#[case("a.b.")]
#[case("Has Space")]
fn test_invalid_names(#[case] name: &str) {
    let mut attributes = Attributes::new();
    assert!(attributes.set(name, 1).is_err());
}

#[test]
fn test_non_finite_numbers_rejected() {
    let mut attributes = Attributes::new();
    attributes
        .define("occi.compute.memory", AttributeDefinition::new(AttributeType::Float))
        .unwrap();
    attributes.set("occi.compute.memory", 1.5).unwrap();

    for value in [f64::NAN, f64::INFINITY] {
        let err = attributes.set("occi.compute.memory", value).unwrap_err();
        assert!(matches!(err, OcciError::AttributeType(_)), "{err}");
    }
    assert_eq!(attributes.get("occi.compute.memory"), Some(&AttributeValue::Float(1.5)));
    assert_eq!(attributes.to_text(), "X-OCCI-Attribute: occi.compute.memory=1.5\n");
}
