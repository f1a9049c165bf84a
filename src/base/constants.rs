//! Well-known OCCI schemes, identifiers and attribute names.

/// Scheme of the OCCI core kinds.
pub const CORE_SCHEME: &str = "http://schemas.ogf.org/occi/core#";

/// Scheme of the OCCI infrastructure kinds.
pub const INFRASTRUCTURE_SCHEME: &str = "http://schemas.ogf.org/occi/infrastructure#";

/// Prefix of the infrastructure sub-schemes, e.g. `.../infrastructure/compute/action#`.
pub const INFRASTRUCTURE_NAMESPACE: &str = "http://schemas.ogf.org/occi/infrastructure/";

/// Identifier of the `entity` kind.
pub const ENTITY_KIND: &str = "http://schemas.ogf.org/occi/core#entity";

/// Identifier of the `resource` kind.
pub const RESOURCE_KIND: &str = "http://schemas.ogf.org/occi/core#resource";

/// Identifier of the `link` kind.
pub const LINK_KIND: &str = "http://schemas.ogf.org/occi/core#link";

/// Attribute holding the entity id.
pub const ATTR_ID: &str = "occi.core.id";

/// Attribute holding the entity title.
pub const ATTR_TITLE: &str = "occi.core.title";

/// Attribute holding the resource summary.
pub const ATTR_SUMMARY: &str = "occi.core.summary";

/// Attribute holding the link source location.
pub const ATTR_SOURCE: &str = "occi.core.source";

/// Attribute holding the link target location.
pub const ATTR_TARGET: &str = "occi.core.target";

/// Text-rendering attribute carrying a standalone link's `rel`.
pub const ATTR_TARGET_KIND: &str = "occi.core.target.kind";

/// Default pattern of a declared attribute.
pub const DEFAULT_PATTERN: &str = ".*";
