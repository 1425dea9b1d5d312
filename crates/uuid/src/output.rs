//! Rendering generated values as plain lines or a JSON array.

use crate::{UuidError, UuidResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::{fmt, str::FromStr};

/// Output layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One value per line.
    #[default]
    Plain,
    /// A pretty-printed JSON array of strings.
    Json,
}

impl FromStr for OutputFormat {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            _ => Err(UuidError::InvalidArgument(format!("Unsupported format: {}", s))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Case folding applied to every rendered value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaseFold {
    #[default]
    Preserve,
    Upper,
    Lower,
}

impl CaseFold {
    /// Builds the folding from the `--upper` / `--lower` flags. Upper wins if both are set.
    pub fn from_flags(upper: bool, lower: bool) -> Self {
        if upper {
            Self::Upper
        } else if lower {
            Self::Lower
        } else {
            Self::Preserve
        }
    }

    pub fn apply(self, value: String) -> String {
        match self {
            Self::Preserve => value,
            Self::Upper => value.to_uppercase(),
            Self::Lower => value.to_lowercase(),
        }
    }
}

/// Where rendered output goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    /// Created or truncated; removed again if writing fails.
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Renders `items` to `writer` and flushes it.
///
/// Lines always end in `\n`, whatever the platform. The first item error stops rendering and is
/// returned; in JSON mode nothing is written in that case.
pub fn write_uuids<I, W>(
    items: I,
    format: OutputFormat,
    case: CaseFold,
    writer: &mut W,
) -> UuidResult<()>
where
    I: IntoIterator<Item = UuidResult<String>>,
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Plain => {
            for item in items {
                let line = case.apply(item?);
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
        }
        OutputFormat::Json => {
            let values = items
                .into_iter()
                .map(|item| item.map(|v| case.apply(v)))
                .collect::<UuidResult<Vec<_>>>()?;
            serde_json::to_writer_pretty(&mut *writer, &values)
                .map_err(UuidError::Serialization)?;
            writer.write_all(b"\n")?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Renders `items` to `destination`.
///
/// A file destination is opened here and closed on every path. If rendering fails the partial
/// file is deleted, so a truncated file is never left behind looking like a success.
pub fn emit<I>(
    destination: &Destination,
    items: I,
    format: OutputFormat,
    case: CaseFold,
) -> UuidResult<()>
where
    I: IntoIterator<Item = UuidResult<String>>,
{
    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            write_uuids(items, format, case, &mut lock)
        }
        Destination::File(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            let result = write_uuids(items, format, case, &mut writer);
            drop(writer);

            // Only remove what this call created.
            if result.is_err() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!("failed to remove partial output {}: {}", path.display(), e);
                }
            }
            if result.is_ok() {
                tracing::debug!("wrote {} output to {}", format, path.display());
            }
            result
        }
    }
}
