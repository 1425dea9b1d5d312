//! Classification of candidate UUID strings.

use crate::codec::CanonicalUuid;
use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// A version a caller expects a validated UUID to carry. Only 1, 3, 4 and 5 are accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpectedVersion(u8);

impl ExpectedVersion {
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidArgument`] for any value other than 1, 3, 4 or 5.
    pub fn new(version: u8) -> UuidResult<Self> {
        match version {
            1 | 3 | 4 | 5 => Ok(Self(version)),
            other => Err(UuidError::InvalidArgument(format!(
                "expected version must be one of 1, 3, 4, 5, got {}",
                other
            ))),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for ExpectedVersion {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = s.trim().parse::<u8>().map_err(|_| {
            UuidError::InvalidArgument(format!("expected version must be a number, got '{}'", s))
        })?;
        Self::new(version)
    }
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The outcome of validating one candidate.
///
/// `valid` is purely syntactic. `matches` is only present when an expected version was given,
/// and a valid UUID of the wrong version stays `valid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Validation {
    pub valid: bool,
    pub version: Option<u8>,
    pub expected: Option<u8>,
    pub matches: Option<bool>,
}

impl Validation {
    /// True when the candidate is valid and, if a version was expected, carries it.
    pub fn is_success(&self) -> bool {
        self.valid && self.matches != Some(false)
    }

    /// Human-readable summary of the outcome.
    pub fn message(&self) -> String {
        match (self.valid, self.version, self.expected) {
            (false, _, _) | (true, None, _) => "INVALID UUID".to_string(),
            (true, Some(v), None) => format!("VALID UUID (version {})", v),
            (true, Some(v), Some(e)) if v == e => format!("VALID UUID and version matches {}", e),
            (true, Some(v), Some(e)) => {
                format!("VALID UUID but version {} does not match {}", v, e)
            }
        }
    }
}

/// Validates `candidate` as canonical UUID text, optionally checking its version.
pub fn validate(candidate: &str, expected: Option<ExpectedVersion>) -> Validation {
    let expected = expected.map(ExpectedVersion::get);

    match CanonicalUuid::parse(candidate) {
        Ok(parsed) => {
            let version = parsed.version();
            Validation {
                valid: true,
                version: Some(version),
                expected,
                matches: expected.map(|e| e == version),
            }
        }
        Err(e) => {
            tracing::debug!("validation failed: {}", e);
            Validation {
                valid: false,
                version: None,
                expected,
                matches: None,
            }
        }
    }
}
