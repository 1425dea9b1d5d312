//! Single-value UUID generation for the four supported schemes.

use crate::clock::{Clock, SystemClock, V1Clock};
use crate::{Uuid, UuidError, UuidResult};
use std::{fmt, str::FromStr};
use uuid::Timestamp;

/// A UUID generation scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Time-based
    V1,
    /// Name-based, MD5
    V3,
    /// Random
    V4,
    /// Name-based, SHA-1
    V5,
}

impl Scheme {
    /// Returns true for the schemes that hash a namespace and a name.
    pub fn is_name_based(self) -> bool {
        matches!(self, Self::V3 | Self::V5)
    }

    /// The version number this scheme stamps into its output.
    pub fn version(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V3 => 3,
            Self::V4 => 4,
            Self::V5 => 5,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version())
    }
}

impl FromStr for Scheme {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Ok(Self::V1),
            "v3" => Ok(Self::V3),
            "v4" => Ok(Self::V4),
            "v5" => Ok(Self::V5),
            _ => Err(UuidError::UnsupportedScheme(s.to_string())),
        }
    }
}

/// How a single value is derived. Name-based variants always carry their inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Derivation {
    TimeBased,
    Random,
    Md5 { namespace: Uuid, name: String },
    Sha1 { namespace: Uuid, name: String },
}

impl Derivation {
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::TimeBased => Scheme::V1,
            Self::Md5 { .. } => Scheme::V3,
            Self::Random => Scheme::V4,
            Self::Sha1 { .. } => Scheme::V5,
        }
    }
}

/// A validated request for `count` values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    derivation: Derivation,
    count: usize,
}

impl GenerationRequest {
    /// Validates the inputs for `scheme` and builds a request.
    ///
    /// `count` is signed so that zero and negative values from the command line are rejected
    /// here rather than silently wrapping.
    ///
    /// # Errors
    ///
    /// - [`UuidError::InvalidArgument`] if `count` is less than 1
    /// - [`UuidError::MissingArgument`] if a name-based scheme has no (or an empty) name
    /// - [`UuidError::InvalidNamespace`] if a name-based scheme has no namespace
    pub fn new(
        scheme: Scheme,
        count: i64,
        namespace: Option<Uuid>,
        name: Option<String>,
    ) -> UuidResult<Self> {
        let count = usize::try_from(count)
            .ok()
            .filter(|&c| c >= 1)
            .ok_or_else(|| UuidError::InvalidArgument("count must be >= 1".into()))?;

        let derivation = match scheme {
            Scheme::V1 => Derivation::TimeBased,
            Scheme::V4 => Derivation::Random,
            Scheme::V3 | Scheme::V5 => {
                let name = name.filter(|n| !n.is_empty()).ok_or_else(|| {
                    UuidError::MissingArgument(format!("name is required for {}", scheme))
                })?;
                let namespace = namespace.ok_or_else(|| {
                    UuidError::InvalidNamespace(format!("namespace is required for {}", scheme))
                })?;

                if scheme == Scheme::V3 {
                    Derivation::Md5 { namespace, name }
                } else {
                    Derivation::Sha1 { namespace, name }
                }
            }
        };

        Ok(Self { derivation, count })
    }

    pub fn derivation(&self) -> &Derivation {
        &self.derivation
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn scheme(&self) -> Scheme {
        self.derivation.scheme()
    }
}

/// Produces one UUID per call.
///
/// The generator owns the v1 clock state, so successive v1 values from the same generator are
/// guaranteed distinct. Other schemes are stateless.
#[derive(Debug)]
pub struct UuidGenerator<C = SystemClock> {
    clock: C,
    v1: Option<V1Clock>,
}

impl Default for UuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl UuidGenerator {
    /// Creates a generator backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> UuidGenerator<C> {
    /// Creates a generator backed by `clock`. v1 state is set up lazily on first use.
    pub fn with_clock(clock: C) -> Self {
        Self { clock, v1: None }
    }

    /// Creates a generator with explicit v1 state.
    pub fn with_v1_clock(clock: C, v1: V1Clock) -> Self {
        Self {
            clock,
            v1: Some(v1),
        }
    }

    /// Generates exactly one value.
    pub fn generate(&mut self, derivation: &Derivation) -> Uuid {
        match derivation {
            Derivation::TimeBased => self.time_based(),
            Derivation::Random => Uuid::new_v4(),
            Derivation::Md5 { namespace, name } => Uuid::new_v3(namespace, name.as_bytes()),
            Derivation::Sha1 { namespace, name } => Uuid::new_v5(namespace, name.as_bytes()),
        }
    }

    fn time_based(&mut self) -> Uuid {
        let now = self.clock.now();
        let v1 = self.v1.get_or_insert_with(V1Clock::new);

        let ticks = v1.next_ticks(now);
        let timestamp = Timestamp::from_gregorian(ticks, v1.clock_seq());

        Uuid::new_v1(timestamp, &v1.node())
    }
}
