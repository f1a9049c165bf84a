//! The OCCI JSON rendering.
//!
//! Category listings are `{"kinds": [...], "mixins": [...], "actions": [...]}`.
//! Entity documents are either a single resource, link or action hash, or a
//! `{"resources": [...], "links": [...], "action": {...}}` collection. Inside
//! a resource, `links` may hold full link hashes or string references to
//! links listed at the top level.

pub mod reader;
pub mod writer;

use super::Format;
use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, InstanceBuilder};
use crate::error::Result;

/// `application/json` documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl Format for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn media_types(&self) -> &'static [&'static str] {
        &["application/json", "application/occi+json"]
    }

    fn parse_categories(&self, input: &str, model: &Model) -> Result<Collection> {
        reader::parse_categories(input, model)
    }

    fn parse_entities(
        &self,
        input: &str,
        model: &Model,
        builder: &dyn InstanceBuilder,
    ) -> Result<Collection> {
        reader::parse_entities(input, model, builder)
    }

    fn parse_action(&self, input: &str, model: &Model) -> Result<ActionInstance> {
        reader::parse_action(input, model)
    }

    fn render(&self, collection: &Collection) -> Result<String> {
        writer::render(collection)
    }
}
