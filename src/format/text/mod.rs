//! The OCCI text rendering (`text/plain` bodies and `text/occi` headers).
//!
//! ## Line syntax
//!
//! ```text
//! Category: compute; scheme="http://schemas.ogf.org/occi/infrastructure#"; class="kind"
//! X-OCCI-Attribute: occi.core.title="my vm"
//! X-OCCI-Attribute: occi.compute.cores=2
//! Link: </network/1>; rel="...#network"; self="/networkinterface/1"; category="...#networkinterface"
//! Link: </compute/1?action=start>; rel="...compute/action#start"
//! X-OCCI-Location: /compute/1
//! ```
//!
//! The header form carries the same values, several per header joined
//! with commas.

pub mod grammar;
pub mod lexer;
mod parser;
mod render;

pub use parser::{
    dereference_identifiers, headers, headers_to_body, is_blank, parse_action, parse_categories,
    parse_entities, parse_entity, parse_locations,
};
pub use render::{
    category_value, render, render_headers, render_location_headers, render_locations,
};

use super::{Format, FormatCapability};
use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, InstanceBuilder};
use crate::error::Result;

/// `text/plain` bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Format for Text {
    fn name(&self) -> &'static str {
        "text"
    }

    fn media_types(&self) -> &'static [&'static str] {
        &["text/plain", "text/occi+plain"]
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    fn parse_categories(&self, input: &str, model: &Model) -> Result<Collection> {
        parse_categories(input, model)
    }

    fn parse_entities(
        &self,
        input: &str,
        model: &Model,
        builder: &dyn InstanceBuilder,
    ) -> Result<Collection> {
        parse_entities(input, model, builder)
    }

    fn parse_action(&self, input: &str, model: &Model) -> Result<ActionInstance> {
        parse_action(input, model)
    }

    fn parse_locations(&self, input: &str) -> Result<Vec<String>> {
        parse_locations(input)
    }

    fn render(&self, collection: &Collection) -> Result<String> {
        render(collection)
    }

    fn render_locations(&self, locations: &[String]) -> Result<String> {
        Ok(render_locations(locations))
    }
}

/// `text/occi` headers, exchanged as a `Name: value` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextHeaders;

impl TextHeaders {
    fn to_body(input: &str) -> String {
        headers_to_body(
            input
                .lines()
                .filter_map(|line| line.split_once(':'))
                .map(|(name, value)| (name.trim(), value)),
        )
    }

    fn to_block(headers: indexmap::IndexMap<String, String>) -> String {
        headers
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}\n"))
            .collect()
    }
}

impl Format for TextHeaders {
    fn name(&self) -> &'static str {
        "text/occi"
    }

    fn media_types(&self) -> &'static [&'static str] {
        &["text/occi"]
    }

    fn parse_categories(&self, input: &str, model: &Model) -> Result<Collection> {
        parse_categories(&Self::to_body(input), model)
    }

    fn parse_entities(
        &self,
        input: &str,
        model: &Model,
        builder: &dyn InstanceBuilder,
    ) -> Result<Collection> {
        parse_entities(&Self::to_body(input), model, builder)
    }

    fn parse_action(&self, input: &str, model: &Model) -> Result<ActionInstance> {
        parse_action(&Self::to_body(input), model)
    }

    fn parse_locations(&self, input: &str) -> Result<Vec<String>> {
        parse_locations(&Self::to_body(input))
    }

    fn render(&self, collection: &Collection) -> Result<String> {
        Ok(Self::to_block(render_headers(collection)?))
    }

    fn render_locations(&self, locations: &[String]) -> Result<String> {
        Ok(Self::to_block(render_location_headers(locations)))
    }
}
