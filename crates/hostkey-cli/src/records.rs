// ABOUTME: Reading and writing legacy record files.
// ABOUTME: Accepts key=value lines and registry exports, writes plain or reg output.

use crate::config::LegacyFormat;
use anyhow::{bail, Result};
use hostkey_core::LegacyRecord;

/// First line of a registry editor export.
pub const REG_BANNER: &str = "Windows Registry Editor Version 5.00";

/// Parse one line of a legacy record file.
///
/// Returns `None` for lines that carry no record: blanks, `;` and `#`
/// comments, `[section]` headers and registry editor banners.
pub fn parse_legacy_line(line: &str) -> Option<Result<LegacyRecord>> {
    let line = line.trim_start_matches('\u{feff}').trim();
    if line.is_empty()
        || line.starts_with(';')
        || line.starts_with('#')
        || line.starts_with('[')
        || line.starts_with("Windows Registry Editor")
        || line == "REGEDIT4"
    {
        return None;
    }

    if line.starts_with('"') {
        return Some(parse_quoted_pair(line));
    }

    Some(match line.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok(LegacyRecord::new(key.trim(), value.trim()))
        }
        _ => Err(anyhow::anyhow!("expected key=value, got {line:?}")),
    })
}

/// Parse every record in a legacy file, keeping 1-based line numbers.
pub fn parse_legacy_input(input: &str) -> Vec<(usize, Result<LegacyRecord>)> {
    input
        .lines()
        .enumerate()
        .filter_map(|(index, line)| parse_legacy_line(line).map(|parsed| (index + 1, parsed)))
        .collect()
}

/// `"key"="value"` as written by the registry editor.
fn parse_quoted_pair(line: &str) -> Result<LegacyRecord> {
    let (key, rest) = take_quoted(line)?;
    let Some(rest) = rest.trim_start().strip_prefix('=') else {
        bail!("expected '=' after quoted key in {line:?}");
    };
    let (value, rest) = take_quoted(rest.trim_start())?;
    if !rest.trim().is_empty() {
        bail!("trailing text after quoted value in {line:?}");
    }
    Ok(LegacyRecord::new(key, value))
}

/// Read a `"..."` string off the front of `s`, undoing `\\` and `\"` escapes.
fn take_quoted(s: &str) -> Result<(String, &str)> {
    let Some(body) = s.strip_prefix('"') else {
        bail!("expected a quoted string in {s:?}");
    };
    let mut out = String::new();
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((out, &body[i + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            other => out.push(other),
        }
    }
    bail!("unterminated quoted string in {s:?}")
}

fn escape_reg(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render legacy records in the requested format.
pub fn render_legacy(records: &[LegacyRecord], format: LegacyFormat, section: &str) -> String {
    let mut out = String::new();
    match format {
        LegacyFormat::Plain => {
            for record in records {
                out.push_str(&record.to_string());
                out.push('\n');
            }
        }
        LegacyFormat::Reg => {
            out.push_str(REG_BANNER);
            out.push_str("\n\n");
            out.push_str(&format!("[{section}]\n"));
            for record in records {
                out.push_str(&format!(
                    "\"{}\"=\"{}\"\n",
                    escape_reg(&record.key),
                    escape_reg(&record.value)
                ));
            }
        }
    }
    out
}
