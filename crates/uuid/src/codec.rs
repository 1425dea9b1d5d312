//! Conversion between UUID values and their canonical text form.

use crate::constants::{CANONICAL_LEN, HYPHEN_POSITIONS};
use crate::{Uuid, UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// A UUID known to have come from (or to render as) canonical hyphenated text.
///
/// Parsing is strict about *shape*: exactly `8-4-4-4-12` hex groups separated by hyphens. It is
/// lenient about *case*: upper, lower and mixed case hex are all accepted. Formatting always
/// produces lowercase; folding to uppercase is left to [`crate::output`].
///
/// # Construction
/// - [`CanonicalUuid::parse`] validates externally supplied text.
/// - `From<Uuid>` wraps a value produced by the generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalUuid(Uuid);

impl CanonicalUuid {
    /// Parses canonical hyphenated UUID text.
    ///
    /// Braces, `urn:uuid:` prefixes and the 32-digit simple form are rejected here; those are
    /// only accepted for namespaces, see [`crate::namespace::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::MalformedUuid`] on wrong length, wrong grouping or non-hex digits.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::MalformedUuid(input.to_string()));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|_| UuidError::MalformedUuid(input.to_string()))
    }

    /// Returns true if `input` has the canonical `8-4-4-4-12` hyphenated shape.
    ///
    /// This is a purely syntactic check that validates:
    /// - Exactly 36 bytes long
    /// - Hyphens at offsets 8, 13, 18 and 23
    /// - Hex digits (either case) everywhere else
    pub fn is_canonical(input: &str) -> bool {
        input.len() == CANONICAL_LEN
            && input.bytes().enumerate().all(|(i, b)| {
                if HYPHEN_POSITIONS.contains(&i) {
                    b == b'-'
                } else {
                    b.is_ascii_hexdigit()
                }
            })
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Version field: the high nibble of byte 6.
    ///
    /// Always computable, including for versions this tool does not generate.
    pub fn version(&self) -> u8 {
        self.0.as_bytes()[6] >> 4
    }

    /// Variant field, decoded from the high bits of byte 8.
    pub fn variant(&self) -> uuid::Variant {
        self.0.get_variant()
    }

    /// Returns true if the variant bits are `10`, the RFC 4122 layout.
    pub fn is_rfc_variant(&self) -> bool {
        self.0.as_bytes()[8] & 0xc0 == 0x80
    }
}

impl From<Uuid> for CanonicalUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CanonicalUuid {
    /// Formats as lowercase hyphenated hex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CanonicalUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalUuid::parse(s)
    }
}
