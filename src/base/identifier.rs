//! Category identifiers.

use std::sync::Arc;

use super::naming;
use crate::error::{OcciError, Result};

/// A category identifier: `scheme` followed by `term`.
///
/// The scheme always ends in `#`, so the identifier splits at its last `#`.
///
/// ```
/// use occi::base::TypeIdentifier;
///
/// let id = TypeIdentifier::new("http://schemas.ogf.org/occi/core#", "resource").unwrap();
/// assert_eq!(id.as_str(), "http://schemas.ogf.org/occi/core#resource");
/// assert_eq!(id.term(), "resource");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeIdentifier(Arc<str>);

impl TypeIdentifier {
    /// Build an identifier from its parts, checking both against the naming grammar.
    pub fn new(scheme: &str, term: &str) -> Result<Self> {
        naming::check_scheme(scheme)?;
        naming::check_term(term)?;
        Ok(Self(format!("{scheme}{term}").into()))
    }

    /// Parse a `scheme#term` string.
    pub fn parse(identifier: &str) -> Result<Self> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(OcciError::mandatory("category identifier"));
        }
        let split = identifier.rfind('#').ok_or_else(|| {
            OcciError::invalid_category(format!("identifier {identifier:?} has no '#'"))
        })?;
        let (scheme, term) = identifier.split_at(split + 1);
        Self::new(scheme, term)
    }

    /// The scheme part, including the trailing `#`.
    pub fn scheme(&self) -> &str {
        let split = self.0.rfind('#').map(|i| i + 1).unwrap_or(0);
        &self.0[..split]
    }

    /// The term part.
    pub fn term(&self) -> &str {
        let split = self.0.rfind('#').map(|i| i + 1).unwrap_or(0);
        &self.0[split..]
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TypeIdentifier {
    type Err = OcciError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for TypeIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TypeIdentifier {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TypeIdentifier {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
