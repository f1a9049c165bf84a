//! Wire format tests
//!
//! - Text bodies and text/occi headers
//! - JSON documents
//! - XML documents
//! - uri-list listings and media type dispatch

pub mod tests_json;
pub mod tests_text;
pub mod tests_uri_list;
#[cfg(feature = "xml")]
pub mod tests_xml;
