//! Record export formats.

use crate::values::Record;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// How a batch of records is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Ndjson,
    /// A single pretty-printed JSON array
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ndjson => write!(f, "ndjson"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            "json" => Ok(Self::Json),
            other => Err(format!("Unknown output format '{other}' (expected ndjson or json)")),
        }
    }
}

/// Write records in the given format. NDJSON output ends with a newline
/// after the last record; an empty batch writes nothing.
pub fn write_records<W: Write>(
    writer: &mut W,
    records: &[Record],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Ndjson => {
            for record in records {
                serde_json::to_writer(&mut *writer, record)?;
                writeln!(writer)?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, records)?;
            writeln!(writer)?;
        }
    }
    writer.flush()
}
