//! OCCI naming grammar.
//!
//! ```text
//! term      = ( ALPHA / DIGIT ) *( ALPHA / DIGIT / "-" / "_" )
//! scheme    = URI ending in "#"
//! attr-name = attr-part *( "." attr-part )
//! attr-part = ( ALPHA / DIGIT ) *( ALPHA / DIGIT / "-" / "_" )
//! ```

use crate::error::{OcciError, Result};

fn is_word_start(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_word_start(first) => chars.all(is_word_char),
        _ => false,
    }
}

/// Returns true if `term` is a valid category term.
pub fn is_valid_term(term: &str) -> bool {
    is_word(term)
}

/// Returns true if `scheme` is a valid category scheme.
pub fn is_valid_scheme(scheme: &str) -> bool {
    scheme.len() > 1
        && scheme.ends_with('#')
        && scheme[..scheme.len() - 1].find('#').is_none()
        && !scheme.chars().any(|c| c.is_whitespace() || c == '"')
}

/// Returns true if `name` is a valid dotted attribute name.
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_word)
}

/// Check a term, failing with `CategoryValidation`.
pub fn check_term(term: &str) -> Result<()> {
    if term.trim().is_empty() {
        return Err(OcciError::mandatory("term"));
    }
    if !is_valid_term(term) {
        return Err(OcciError::invalid_category(format!("term {term:?}")));
    }
    Ok(())
}

/// Check a scheme, failing with `CategoryValidation`.
pub fn check_scheme(scheme: &str) -> Result<()> {
    if scheme.trim().is_empty() {
        return Err(OcciError::mandatory("scheme"));
    }
    if !is_valid_scheme(scheme) {
        return Err(OcciError::invalid_category(format!("scheme {scheme:?}")));
    }
    Ok(())
}

/// Check a dotted attribute name, failing with `AttributeValidation`.
pub fn check_attribute_name(name: &str) -> Result<()> {
    if is_valid_attribute_name(name) {
        Ok(())
    } else {
        Err(OcciError::attribute_validation(format!(
            "invalid attribute name {name:?}"
        )))
    }
}
