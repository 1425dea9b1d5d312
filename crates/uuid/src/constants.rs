//! Constants used throughout the toolkit.
//!
//! Environment variable names and defaults live here so the CLI and the core agree on them.

/// Namespace token used for v3/v5 when none is given.
pub const DEFAULT_NAMESPACE: &str = "DNS";

/// Environment variable holding the default output format (`plain` or `json`).
pub const FORMAT_ENV_VAR: &str = "UUID_TOOLKIT_FORMAT";

/// Environment variable holding the default namespace token for v3/v5.
pub const NAMESPACE_ENV_VAR: &str = "UUID_TOOLKIT_NAMESPACE";

/// Length of the canonical hyphenated text form.
pub const CANONICAL_LEN: usize = 36;

/// Byte offsets of the hyphens in the canonical text form.
pub const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// Number of 100ns ticks between 1582-10-15 (Gregorian reform) and the Unix epoch.
pub const GREGORIAN_OFFSET_TICKS: u64 = 0x01B2_1DD2_1381_4000;
