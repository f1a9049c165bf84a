//! # occi-core
//!
//! Core data model of the Open Cloud Computing Interface: categories,
//! entities, typed attribute stores and the OCCI wire formats.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! format      → text, text/occi headers, JSON, XML, uri-list
//!   ↓
//! collection  → Collection container, Model registry (core + infrastructure)
//!   ↓
//! entity      → Entity, Resource, Link, ActionInstance, InstanceBuilder
//!   ↓
//! category    → Category, Kind, Mixin, Action
//!   ↓
//! attributes  → Attributes store, AttributeDefinition, AttributeValue
//!   ↓
//! base        → TypeIdentifier, naming grammar, ValidationPolicy
//! ```
//!
//! ## Example
//!
//! ```
//! use occi::{Json, Format, Model, ModelInstanceBuilder, Text};
//!
//! let model = Model::infrastructure()?;
//! let body = "Category: compute; scheme=\"http://schemas.ogf.org/occi/infrastructure#\"; class=\"kind\"\n\
//!             X-OCCI-Attribute: occi.core.id=\"vm-1\"\n\
//!             X-OCCI-Attribute: occi.compute.cores=2\n";
//! let collection = Text.parse_entities(body, &model, &ModelInstanceBuilder)?;
//! model.check(&collection)?;
//!
//! let json = Json.render(&collection)?;
//! assert!(json.contains("\"occi.compute.cores\": 2"));
//! # Ok::<(), occi::OcciError>(())
//! ```

// ============================================================================
// MODULES (dependency order: base → attributes → category → entity → collection → format)
// ============================================================================

/// Foundation types: TypeIdentifier, naming grammar, ValidationPolicy
pub mod base;

/// Error type shared by every module
pub mod error;

/// Typed attribute stores and definitions
pub mod attributes;

/// Kinds, mixins and actions
pub mod category;

/// Resources, links and action triggers
pub mod entity;

/// Collections and the category registry
pub mod collection;

/// Wire formats
pub mod format;

// Re-export commonly needed items
pub use attributes::{AttributeDefinition, AttributeType, AttributeValue, Attributes};
pub use base::{TypeIdentifier, ValidationPolicy};
pub use category::{Action, Category, CategoryClass, Kind, Mixin};
pub use collection::{Collection, Model};
pub use entity::{
    ActionInstance, Entity, Instance, InstanceBuilder, Link, ModelInstanceBuilder, Resource,
};
pub use error::{OcciError, Result};
pub use format::{Format, Json, Text, TextHeaders, UriList, Xml, detect_format};
