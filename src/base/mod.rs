//! Foundation types for the OCCI core.
//!
//! - [`TypeIdentifier`] - `scheme#term` category identifiers
//! - [`naming`] - term, scheme and attribute-name grammar checks
//! - [`ValidationPolicy`] - how strictly attribute assignments are checked
//! - [`constants`] - well-known schemes and identifiers
//!
//! This module has NO dependencies on other occi modules except `error`.

pub mod constants;
mod identifier;
pub mod naming;
mod policy;

pub use identifier::TypeIdentifier;
pub use policy::ValidationPolicy;
