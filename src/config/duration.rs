//! Duration parsing utilities.

use anyhow::Context;
use std::time::Duration;

/// Parse a duration string like "1h", "2m", "15s", "15" into seconds.
/// Supports:
/// - Plain numbers (interpreted as seconds): "15"
/// - Seconds suffix: "15s"
/// - Minutes suffix: "2m"
/// - Hours suffix: "1h"
///
/// Suffixes are case-insensitive and may be separated by whitespace.
pub fn parse_duration_to_secs(s: &str) -> anyhow::Result<u64> {
    let s = s.trim().to_ascii_lowercase();
    if s.is_empty() {
        anyhow::bail!("Empty duration string");
    }

    let (number, unit, multiplier) = match s.char_indices().last() {
        Some((i, 'h')) => (&s[..i], "hours", 3600),
        Some((i, 'm')) => (&s[..i], "minutes", 60),
        Some((i, 's')) => (&s[..i], "seconds", 1),
        _ => (s.as_str(), "seconds", 1),
    };

    let value: u64 = number.trim().parse().with_context(|| {
        format!("Invalid {unit} value '{number}' in '{s}' (use formats like 15s or 2m)")
    })?;
    value
        .checked_mul(multiplier)
        .with_context(|| format!("Duration '{s}' is too large"))
}

/// clap value parser for interval flags.
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    parse_duration_to_secs(s)
        .map(Duration::from_secs)
        .map_err(|e| format!("{e:#}"))
}
