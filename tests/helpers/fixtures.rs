//! Common documents and models for tests.

use occi::{Format, Model, Text, TypeIdentifier};

pub const INFRA: &str = "http://schemas.ogf.org/occi/infrastructure#";
pub const EXAMPLE: &str = "http://example.org/occi#";

/// Prefix of the per-kind action and mixin schemes.
pub const INFRA_NAMESPACE: &str = "http://schemas.ogf.org/occi/infrastructure/";

/// A user mixin applying to compute, with two string attributes.
pub const TAGGED_MIXIN: &str = "Category: tagged; scheme=\"http://example.org/occi#\"; class=\"mixin\"; \
title=\"Tagged\"; rel=\"http://schemas.ogf.org/occi/infrastructure#compute\"; location=\"/tagged/\"; \
attributes=\"org.example.tag org.example.owner{required}\"\n";

pub const COMPUTE_BODY: &str = "Category: compute; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"; class=\"kind\"\n\
X-OCCI-Attribute: occi.core.id=\"vm-1\"\n\
X-OCCI-Attribute: occi.core.title=\"web server\"\n\
X-OCCI-Attribute: occi.compute.cores=2\n\
X-OCCI-Attribute: occi.compute.memory=1.5\n";

pub fn infra(term: &str) -> TypeIdentifier {
    TypeIdentifier::new(INFRA, term).unwrap()
}

/// An action of an infrastructure kind, e.g. `action("compute", "start")`.
pub fn action(kind: &str, term: &str) -> String {
    format!("{INFRA_NAMESPACE}{kind}/action#{term}")
}

pub fn example(term: &str) -> TypeIdentifier {
    TypeIdentifier::new(EXAMPLE, term).unwrap()
}

/// The infrastructure model with [`TAGGED_MIXIN`] registered.
pub fn tagged_model() -> Model {
    let mut model = Model::infrastructure().unwrap();
    let extension = Text.parse_categories(TAGGED_MIXIN, &model).unwrap();
    model.register(&extension);
    model
}
