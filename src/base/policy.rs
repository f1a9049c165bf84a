//! Validation policy for attribute assignments.

use serde::Deserialize;

/// Controls how strictly values are checked when assigned into
/// [`Attributes`](crate::attributes::Attributes).
///
/// `compatibility` turns pattern mismatches into logged warnings so that
/// lenient clients can still talk to the model. It weakens type safety and
/// is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Accept values that fail their declared pattern (with a warning).
    pub compatibility: bool,
    /// Check declared patterns at all.
    pub verify_attribute_pattern: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

impl ValidationPolicy {
    /// Patterns are checked and mismatches are errors.
    pub const STRICT: Self = Self {
        compatibility: false,
        verify_attribute_pattern: true,
    };

    /// Patterns are checked but mismatches only warn.
    pub const COMPATIBLE: Self = Self {
        compatibility: true,
        verify_attribute_pattern: true,
    };

    /// Patterns are never checked.
    pub const UNCHECKED: Self = Self {
        compatibility: false,
        verify_attribute_pattern: false,
    };

    /// Set compatibility mode.
    pub fn with_compatibility(mut self, compatibility: bool) -> Self {
        self.compatibility = compatibility;
        self
    }

    /// Set pattern verification.
    pub fn with_pattern_verification(mut self, verify: bool) -> Self {
        self.verify_attribute_pattern = verify;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(ValidationPolicy::default(), ValidationPolicy::STRICT);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let policy: ValidationPolicy = serde_json::from_str(r#"{"compatibility": true}"#).unwrap();
        assert!(policy.compatibility);
        assert!(policy.verify_attribute_pattern);
    }
}
