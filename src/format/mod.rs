//! Wire formats for OCCI collections.
//!
//! Every format reads into and writes from a [`Collection`]. Category
//! parsing resolves relations against a [`Model`]; entity parsing also needs
//! an [`InstanceBuilder`] to decide between resources and links.
//!
//! ```text
//! ┌────────────┐ ┌─────────────┐ ┌──────────┐ ┌─────────┐ ┌───────────┐
//! │ text/plain │ │ text/occi   │ │   JSON   │ │   XML   │ │ uri-list  │
//! └─────┬──────┘ └──────┬──────┘ └────┬─────┘ └────┬────┘ └─────┬─────┘
//!       ▼               ▼             ▼            ▼            ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          Format trait                            │
//! │  - parse_categories(&str, &Model) -> Result<Collection>          │
//! │  - parse_entities(&str, &Model, &dyn InstanceBuilder)            │
//! │  - render(&Collection) -> Result<String>                         │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use occi::collection::Model;
//! use occi::format::detect_format;
//!
//! let model = Model::infrastructure()?;
//! let format = detect_format("text/plain; charset=utf-8").unwrap();
//! let categories = format.parse_categories(
//!     "Category: compute; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"; class=\"kind\"",
//!     &model,
//! )?;
//! assert_eq!(categories.kinds.len(), 1);
//! # Ok::<(), occi::error::OcciError>(())
//! ```

pub mod json;
pub mod text;
mod uri_list;
mod xml;

pub use json::Json;
pub use text::{Text, TextHeaders};
pub use uri_list::UriList;
pub use xml::Xml;

use crate::collection::{Collection, Model};
use crate::entity::{ActionInstance, InstanceBuilder};
use crate::error::{OcciError, Result};

/// Capabilities supported by a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatCapability {
    /// Can parse category listings.
    pub categories: bool,
    /// Can parse entities and action triggers.
    pub entities: bool,
    /// Can render collections.
    pub render: bool,
}

impl FormatCapability {
    /// Parse and render everything.
    pub const FULL: Self = Self {
        categories: true,
        entities: true,
        render: true,
    };

    /// Locations only.
    pub const LOCATIONS: Self = Self {
        categories: false,
        entities: false,
        render: true,
    };
}

/// An OCCI wire format.
pub trait Format: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// Media types handled by this format, preferred first.
    fn media_types(&self) -> &'static [&'static str];

    fn capabilities(&self) -> FormatCapability {
        FormatCapability::FULL
    }

    /// Parse kinds, mixins and actions, dereferencing their relations
    /// against `model`.
    fn parse_categories(&self, input: &str, model: &Model) -> Result<Collection>;

    /// Parse resources, links or an action trigger.
    fn parse_entities(
        &self,
        input: &str,
        model: &Model,
        builder: &dyn InstanceBuilder,
    ) -> Result<Collection>;

    /// Parse a single action trigger.
    fn parse_action(&self, input: &str, model: &Model) -> Result<ActionInstance> {
        let _ = (input, model);
        Err(OcciError::parsing(format!(
            "{} does not carry action triggers",
            self.name()
        )))
    }

    /// Parse a list of locations.
    fn parse_locations(&self, input: &str) -> Result<Vec<String>> {
        let _ = input;
        Err(OcciError::parsing(format!(
            "{} does not carry location lists",
            self.name()
        )))
    }

    /// Render a collection.
    fn render(&self, collection: &Collection) -> Result<String>;

    /// Render a list of locations.
    fn render_locations(&self, locations: &[String]) -> Result<String> {
        let _ = locations;
        Err(OcciError::rendering(format!(
            "{} does not carry location lists",
            self.name()
        )))
    }
}

/// Media types with a registered format.
pub fn supported_media_types() -> Vec<&'static str> {
    all_formats()
        .iter()
        .flat_map(|format| format.media_types().iter().copied())
        .collect()
}

fn all_formats() -> Vec<Box<dyn Format>> {
    vec![
        Box::new(Text),
        Box::new(TextHeaders),
        Box::new(Json),
        Box::new(Xml),
        Box::new(UriList),
    ]
}

/// Pick a format by media type. Parameters after `;` are ignored and the
/// comparison is case-insensitive.
pub fn detect_format(media_type: &str) -> Option<Box<dyn Format>> {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    all_formats()
        .into_iter()
        .find(|format| format.media_types().contains(&essence.as_str()))
}
