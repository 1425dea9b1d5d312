//! Namespace resolution for name-based (v3/v5) UUIDs.
//!
//! A namespace token is either one of the four well-known names from RFC 4122 appendix C
//! (`DNS`, `URL`, `OID`, `X500`, matched case-insensitively) or any UUID text that
//! [`Uuid::parse_str`] accepts: hyphenated, simple, braced or `urn:uuid:` prefixed.

use crate::{Uuid, UuidError, UuidResult};

static WELL_KNOWN: [(&str, Uuid); 4] = [
    ("DNS", Uuid::NAMESPACE_DNS),
    ("URL", Uuid::NAMESPACE_URL),
    ("OID", Uuid::NAMESPACE_OID),
    ("X500", Uuid::NAMESPACE_X500),
];

/// Returns the well-known `(name, namespace)` table.
pub fn well_known() -> &'static [(&'static str, Uuid)] {
    &WELL_KNOWN
}

/// Returns the well-known name of `namespace`, if it has one.
pub fn name_of(namespace: &Uuid) -> Option<&'static str> {
    WELL_KNOWN
        .iter()
        .find(|(_, ns)| ns == namespace)
        .map(|(name, _)| *name)
}

/// Resolves a namespace token to its UUID.
///
/// # Errors
///
/// Returns [`UuidError::InvalidNamespace`] if `token` is absent, blank, or neither a well-known
/// name nor parseable UUID text.
pub fn resolve(token: Option<&str>) -> UuidResult<Uuid> {
    let token = match token {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            return Err(UuidError::InvalidNamespace(
                "namespace is required for this operation".into(),
            ))
        }
    };

    if let Some((name, ns)) = WELL_KNOWN
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
    {
        tracing::debug!(namespace = %ns, "resolved well-known namespace {}", name);
        return Ok(*ns);
    }

    Uuid::parse_str(token).map_err(|_| {
        UuidError::InvalidNamespace(format!(
            "invalid namespace UUID or unknown builtin name: '{}'",
            token
        ))
    })
}
