// ABOUTME: Batch conversion that skips bad records instead of stopping.
// ABOUTME: Collects converted output alongside per-record failures with their input position.

use crate::convert::{known_hosts_to_legacy, legacy_to_known_hosts};
use crate::error::ConvertError;
use crate::record::LegacyRecord;
use tracing::warn;

/// A record that failed to convert.
#[derive(Debug)]
pub struct BatchFailure {
    /// 1-based position in the input.
    pub position: usize,
    pub input: String,
    pub error: ConvertError,
}

/// Outcome of a batch conversion.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub converted: Vec<T>,
    pub failures: Vec<BatchFailure>,
}

impl<T> BatchReport<T> {
    fn new() -> Self {
        Self {
            converted: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn fail(&mut self, position: usize, input: String, error: ConvertError) {
        warn!(position, input = %input, error = %error, "skipping record");
        self.failures.push(BatchFailure {
            position,
            input,
            error,
        });
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total records looked at, converted or not.
    pub fn attempted(&self) -> usize {
        self.converted.len() + self.failures.len()
    }
}

/// Convert legacy records to known_hosts lines, skipping failures.
pub fn convert_legacy_records<I>(records: I) -> BatchReport<String>
where
    I: IntoIterator<Item = LegacyRecord>,
{
    let mut report = BatchReport::new();
    for (index, record) in records.into_iter().enumerate() {
        match legacy_to_known_hosts(&record.key, &record.value) {
            Ok(line) => report.converted.push(line),
            Err(e) => report.fail(index + 1, record.key, e),
        }
    }
    report
}

/// Convert known_hosts lines to legacy records, skipping failures.
///
/// Blank and comment lines are passed over without being reported.
pub fn convert_known_hosts_lines<'a, I>(lines: I) -> BatchReport<LegacyRecord>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut report = BatchReport::new();
    for (index, line) in lines.into_iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match known_hosts_to_legacy(trimmed) {
            Ok(record) => report.converted.push(record),
            Err(e) => report.fail(index + 1, trimmed.to_string(), e),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_LINE: &str = "10.10.0.1 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGbYpA+mytM+DBTasSFv44NuXAWxNbCOSZe3UJ0WO9ZF";
    const ED25519_VALUE: &str = "0x32d013e2996f93c5f5cec2ab3aac303434f31775aababf3ea342e1227ab4ac36,0x45d63b169d50b797498eb035b1055c6e83e36f21b1da140c3ed3caa60fa4d866";

    #[test]
    fn test_legacy_batch_skips_bad_records() {
        let records = vec![
            LegacyRecord::new("ssh-ed25519@22:10.10.0.1", ED25519_VALUE),
            LegacyRecord::new("no-at-sign", "0x1"),
            LegacyRecord::new("rsa2@22:host", "0x10001"),
            LegacyRecord::new("ssh-ed25519@22:10.10.0.1", ED25519_VALUE),
        ];

        let report = convert_legacy_records(records);
        assert_eq!(report.converted, vec![ED25519_LINE, ED25519_LINE]);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].position, 2);
        assert!(matches!(report.failures[0].error, ConvertError::Parse { .. }));
        assert_eq!(report.failures[1].position, 3);
        assert_eq!(report.failures[1].input, "rsa2@22:host");
        assert!(matches!(report.failures[1].error, ConvertError::Arity { .. }));
        assert_eq!(report.attempted(), 4);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_known_hosts_batch_ignores_blank_and_comment_lines() {
        let input = format!("# header\n\n{ED25519_LINE}\ngarbage line\n   \n{ED25519_LINE}\n");
        let report = convert_known_hosts_lines(input.lines());

        assert_eq!(report.converted.len(), 2);
        assert_eq!(report.converted[0].key, "ssh-ed25519@22:10.10.0.1");
        assert_eq!(report.converted[0].value, ED25519_VALUE);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 4);
        assert_eq!(report.failures[0].input, "garbage line");
    }

    #[test]
    fn test_empty_batch_is_clean() {
        let report = convert_known_hosts_lines(std::iter::empty());
        assert!(report.is_clean());
        assert_eq!(report.attempted(), 0);
    }
}
