//! Attribute store tests
//!
//! - Dotted names and namespaces
//! - Definitions, conversion and defaults
//! - Pattern enforcement under the validation policies
//! - Literal coercion through the text rendering

pub mod tests_literals;
pub mod tests_store;
