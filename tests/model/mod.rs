//! Model and collection tests
//!
//! - Core and infrastructure registries
//! - Category relations and attribute inheritance
//! - Collection merge, intersect and lookups
//! - Entity validation

pub mod tests_collection;
pub mod tests_registry;
