//! Tests for uri-list listings and media type dispatch.

use crate::helpers::{COMPUTE_BODY, tagged_model};
use occi::{Collection, Format, ModelInstanceBuilder, Text, UriList, detect_format};
use rstest::rstest;

#[test]
fn test_parse_skips_comments() {
    let input = "# listing\n/compute/vm-1\n\n  /storage/disk-1  \n#/network/net-1\n";
    let locations = UriList.parse_locations(input).unwrap();
    assert_eq!(locations, vec!["/compute/vm-1", "/storage/disk-1"]);
}

#[test]
fn test_render_entity_locations() {
    let model = tagged_model();
    let parsed = Text
        .parse_entities(COMPUTE_BODY, &model, &ModelInstanceBuilder)
        .unwrap();
    assert_eq!(UriList.render(&parsed).unwrap(), "/compute/vm-1\n");

    let listing = UriList.render(&Collection::new()).unwrap();
    assert!(listing.is_empty());
}

#[rstest]
#[case("text/plain", "text")]
#[case("text/occi", "text/occi")]
#[case("application/occi+json", "json")]
#[case("text/uri-list; charset=utf-8", "uri-list")]
fn test_dispatch_by_media_type(#[case] media_type: &str, #[case] name: &str) {
    let format = detect_format(media_type).unwrap();
    assert_eq!(format.name(), name);
}

#[test]
fn test_dispatch_locations() {
    let format = detect_format("text/uri-list").unwrap();
    let locations = vec!["/compute/vm-1".to_string(), "/compute/vm-2".to_string()];
    let rendered = format.render_locations(&locations).unwrap();
    assert_eq!(format.parse_locations(&rendered).unwrap(), locations);

    let json = detect_format("application/json").unwrap();
    assert!(json.parse_locations(&rendered).is_err());
}
