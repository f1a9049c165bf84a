//! `text/uri-list` location listings.

use tracing::{debug, trace};

use super::{Format, FormatCapability};
use crate::collection::{Collection, Model};
use crate::entity::InstanceBuilder;
use crate::error::{OcciError, Result};

/// Newline-separated locations. Carries no categories or entities.
#[derive(Debug, Clone, Copy, Default)]
pub struct UriList;

impl Format for UriList {
    fn name(&self) -> &'static str {
        "uri-list"
    }

    fn media_types(&self) -> &'static [&'static str] {
        &["text/uri-list"]
    }

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::LOCATIONS
    }

    fn parse_categories(&self, _input: &str, _model: &Model) -> Result<Collection> {
        Err(OcciError::parsing("text/uri-list does not carry categories"))
    }

    fn parse_entities(
        &self,
        _input: &str,
        _model: &Model,
        _builder: &dyn InstanceBuilder,
    ) -> Result<Collection> {
        Err(OcciError::parsing("text/uri-list does not carry entities"))
    }

    fn parse_locations(&self, input: &str) -> Result<Vec<String>> {
        let locations: Vec<String> = input
            .lines()
            .map(str::trim)
            .filter(|line| {
                let skip = line.is_empty() || line.starts_with('#');
                if skip && !line.is_empty() {
                    trace!(line, "skipping uri-list comment");
                }
                !skip
            })
            .map(str::to_string)
            .collect();
        debug!(locations = locations.len(), "parsed uri-list");
        Ok(locations)
    }

    /// One line per entity location, resources first.
    fn render(&self, collection: &Collection) -> Result<String> {
        let locations: Vec<String> = collection
            .resources
            .values()
            .map(|resource| &resource.entity)
            .chain(collection.links.values().map(|link| &link.entity))
            .map(|entity| collection.entity_location(entity))
            .collect();
        self.render_locations(&locations)
    }

    fn render_locations(&self, locations: &[String]) -> Result<String> {
        Ok(locations.iter().map(|l| format!("{l}\n")).collect())
    }
}
