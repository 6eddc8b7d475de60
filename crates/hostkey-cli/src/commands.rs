// ABOUTME: Whole-file conversions behind the hostkey subcommands.
// ABOUTME: Applies strict or skip-and-continue handling and reports the outcome.

use crate::config::LegacyFormat;
use crate::records::{parse_legacy_input, render_legacy};
use anyhow::{bail, Context, Result};
use hostkey_core::{
    convert_known_hosts_lines, convert_legacy_records, known_hosts_to_legacy,
    legacy_to_known_hosts, LegacyRecord,
};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Read the whole input, from a file or stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Write the whole output, to a file or stdout.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|_| stdout.flush())
                .context("Failed to write stdout")
        }
    }
}

fn finish(attempted: usize, converted: usize, what: &str) -> Result<()> {
    let skipped = attempted - converted;
    info!(converted, skipped, "{what} conversion finished");
    if attempted > 0 && converted == 0 {
        bail!("none of the {attempted} {what} records could be converted");
    }
    Ok(())
}

fn join_lines<I: IntoIterator<Item = String>>(lines: I) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

/// Convert a legacy record file into known_hosts text.
pub fn legacy_file_to_known_hosts(input: &str, strict: bool) -> Result<String> {
    let parsed = parse_legacy_input(input);

    if strict {
        let mut lines = Vec::with_capacity(parsed.len());
        for (line_no, record) in parsed {
            let record = record.with_context(|| format!("line {line_no}"))?;
            let line = legacy_to_known_hosts(&record.key, &record.value)
                .with_context(|| format!("line {line_no}: cannot convert {}", record.key))?;
            lines.push(line);
        }
        return Ok(join_lines(lines));
    }

    let mut malformed = 0;
    let mut records = Vec::with_capacity(parsed.len());
    for (line_no, record) in parsed {
        match record {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(line = line_no, error = %e, "skipping malformed line");
                malformed += 1;
            }
        }
    }

    let report = convert_legacy_records(records);
    finish(report.attempted() + malformed, report.converted.len(), "legacy")?;
    Ok(join_lines(report.converted))
}

/// Convert known_hosts text into a legacy record file.
pub fn known_hosts_file_to_legacy(
    input: &str,
    strict: bool,
    format: LegacyFormat,
    section: &str,
) -> Result<String> {
    let records: Vec<LegacyRecord> = if strict {
        let mut records = Vec::new();
        for (index, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let record = known_hosts_to_legacy(trimmed)
                .with_context(|| format!("line {}: cannot convert", index + 1))?;
            records.push(record);
        }
        records
    } else {
        let report = convert_known_hosts_lines(input.lines());
        finish(report.attempted(), report.converted.len(), "known_hosts")?;
        report.converted
    };

    Ok(render_legacy(&records, format, section))
}
