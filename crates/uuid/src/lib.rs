//! UUID generation, validation and formatting.
//!
//! This crate holds all of the semantics behind the `uuid-toolkit` command line tool. The binary
//! in `crates/cli` is a thin layer that parses arguments and maps results to exit codes.
//!
//! ## Supported schemes
//! - **v1**: time-based (timestamp, clock sequence and node identifier)
//! - **v3**: name-based, MD5 digest of namespace and name
//! - **v4**: random
//! - **v5**: name-based, SHA-1 digest of namespace and name
//!
//! Any syntactically valid UUID can be *validated*, whatever its version.
//!
//! ## Canonical UUID form
//! - Length: 36
//! - Grouping: `8-4-4-4-12`, hyphen separated
//! - Characters: `0-9` and `a-f` on output, either case on input
//! - Example: `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
//!
//! ## Pipeline
//! A [`GenerationRequest`] is validated up front, so input errors never produce partial output.
//! [`Batch`] then pulls values from a [`UuidGenerator`] one at a time, and [`write_uuids`] or
//! [`emit`] renders them as plain lines or as a JSON array.
//!
//! ```
//! use uuid_toolkit::{namespace, GenerationRequest, Scheme, UuidGenerator, Batch};
//!
//! # fn main() -> Result<(), uuid_toolkit::UuidError> {
//! let dns = namespace::resolve(Some("dns"))?;
//! let request = GenerationRequest::new(Scheme::V5, 1, Some(dns), Some("example.com".into()))?;
//! let mut generator = UuidGenerator::new();
//! let values: Vec<String> = Batch::new(&mut generator, &request).collect::<Result<_, _>>()?;
//!
//! assert_eq!(values, ["cfbff0d1-9375-5685-968c-48ce8b15ae17"]);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod clock;
pub mod codec;
pub mod config;
pub mod constants;
pub mod generator;
pub mod namespace;
pub mod output;
pub mod validation;

// Re-export public types
pub use batch::Batch;
pub use codec::CanonicalUuid;
pub use config::ToolkitConfig;
pub use generator::{Derivation, GenerationRequest, Scheme, UuidGenerator};
pub use output::{emit, write_uuids, CaseFold, Destination, OutputFormat};
pub use validation::{validate, ExpectedVersion, Validation};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid user-supplied argument (count, format, expected version)
    #[error("{0}")]
    InvalidArgument(String),

    /// Namespace missing or neither a well-known name nor a UUID
    #[error("{0}")]
    InvalidNamespace(String),

    /// Required input for a name-based scheme was not supplied
    #[error("{0}")]
    MissingArgument(String),

    /// Scheme token is not one of v1, v3, v4 or v5
    #[error("Unsupported version: {0}")]
    UnsupportedScheme(String),

    /// Text is not a canonical hyphenated UUID
    #[error("malformed UUID: '{0}'")]
    MalformedUuid(String),

    /// Generation was stopped by the user
    #[error("interrupted")]
    Interrupted,

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering failed
    #[error("failed to serialize JSON output: {0}")]
    Serialization(serde_json::Error),
}

impl UuidError {
    /// Returns true for errors caused by user input rather than by the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_)
                | Self::InvalidNamespace(_)
                | Self::MissingArgument(_)
                | Self::UnsupportedScheme(_)
                | Self::MalformedUuid(_)
        )
    }
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
