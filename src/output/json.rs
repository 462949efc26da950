// JSON report writer.
//
// Renders a MatchReport as an object keyed by document id, each value an
// object with `url` followed by one field per matched term. Indentation is
// four spaces per level and key order is exactly the report's first-seen
// order.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;

use crate::matching::MatchReport;

/// Render the report as indented JSON text.
pub fn render(report: &MatchReport) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    report
        .serialize(&mut ser)
        .context("Failed to serialize match report")?;
    Ok(String::from_utf8(buf)?)
}

/// Render the report and write it to `path`, replacing any existing file.
pub fn write_report(path: &Path, report: &MatchReport) -> Result<()> {
    let rendered = render(report)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    std::fs::write(path, rendered)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}
