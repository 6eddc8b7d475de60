// ABOUTME: Textual record formats on either side of the conversion.
// ABOUTME: Parses and renders known_hosts lines and holds legacy key/value pairs.

use crate::error::{ConvertError, Result};
use crate::key_name::{KeyName, DEFAULT_PORT};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt;

/// A legacy registry-style record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyRecord {
    /// Identifier, `<tag>@<port>:<host>`.
    pub key: String,
    /// Comma-separated `0x` hex fields.
    pub value: String,
}

impl LegacyRecord {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for LegacyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One known_hosts entry: host, algorithm, and the raw public key blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownHostsLine {
    /// Algorithm, host and port of the entry. The algorithm is the line's
    /// second field as written.
    pub name: KeyName,
    pub key_blob: Vec<u8>,
    pub comment: Option<String>,
}

impl KnownHostsLine {
    pub fn new(name: KeyName, key_blob: Vec<u8>) -> Self {
        Self {
            name,
            key_blob,
            comment: None,
        }
    }

    /// Parse `<hosts> <algorithm> <base64> [comment]`.
    ///
    /// Only the first host of a comma-separated list is used. `[host]:port`
    /// and `host:port` are split into host and port.
    ///
    /// # Errors
    /// Returns `ConvertError::Parse` for blank, comment, and marker lines,
    /// hashed host names, missing fields, and undecodable base64.
    pub fn parse(line: &str) -> Result<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Err(ConvertError::parse(line, "blank or comment line"));
        }
        if trimmed.starts_with('@') {
            return Err(ConvertError::parse(line, "marker lines carry no host key"));
        }

        let mut fields = trimmed.split_whitespace();
        let (Some(hosts), Some(algorithm), Some(encoded)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(ConvertError::parse(
                line,
                "expected <hosts> <algorithm> <key>",
            ));
        };
        let comment = fields.collect::<Vec<_>>().join(" ");

        let first_host = hosts.split(',').next().unwrap_or(hosts);
        if first_host.starts_with('|') {
            return Err(ConvertError::parse(line, "hashed host names cannot be recovered"));
        }
        let (host, port) = split_host_port(first_host)
            .ok_or_else(|| ConvertError::parse(line, "invalid host or port"))?;

        let key_blob = STANDARD
            .decode(encoded)
            .map_err(|e| ConvertError::parse(line, format!("invalid base64 key: {e}")))?;

        Ok(Self {
            name: KeyName {
                algorithm: algorithm.to_string(),
                host: host.to_string(),
                port,
            },
            key_blob,
            comment: (!comment.is_empty()).then_some(comment),
        })
    }

    /// Decode the blob with `ssh-key`, checking it matches the algorithm field.
    pub fn public_key(&self) -> Result<ssh_key::PublicKey> {
        let public_key =
            ssh_key::PublicKey::from_bytes(&self.key_blob).map_err(ConvertError::KeyData)?;
        let blob_algorithm = public_key.algorithm();
        if blob_algorithm.as_str() != self.name.algorithm {
            return Err(ConvertError::parse(
                self.name.algorithm.as_str(),
                format!("key blob is {}", blob_algorithm.as_str()),
            ));
        }
        Ok(public_key)
    }
}

impl fmt::Display for KnownHostsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.name.known_hosts_host(),
            self.name.algorithm,
            STANDARD.encode(&self.key_blob)
        )?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}

/// Split a known_hosts host pattern into host and port.
///
/// `[name]:port` drops the brackets unless `name` is an IPv6 literal.
/// A bracketed literal with no port, or any host with more than one colon,
/// is kept whole on port 22.
fn split_host_port(entry: &str) -> Option<(&str, u16)> {
    if entry.is_empty() {
        return None;
    }

    if let Some(inner_end) = entry.strip_prefix('[').and_then(|rest| rest.find(']')) {
        let close = inner_end + 1;
        let after = &entry[close + 1..];
        if after.is_empty() {
            return Some((entry, DEFAULT_PORT));
        }
        let port = after.strip_prefix(':')?.parse::<u16>().ok()?;
        let inner = &entry[1..close];
        let host = if inner.contains(':') {
            &entry[..=close]
        } else {
            inner
        };
        return Some((host, port));
    }

    match entry.split_once(':') {
        Some((host, port)) if !port.contains(':') => {
            if host.is_empty() {
                return None;
            }
            Some((host, port.parse::<u16>().ok()?))
        }
        _ => Some((entry, DEFAULT_PORT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ED25519_LINE: &str = "10.10.0.1 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGbYpA+mytM+DBTasSFv44NuXAWxNbCOSZe3UJ0WO9ZF";

    #[test]
    fn test_parse_canonical_line() {
        let line = KnownHostsLine::parse(ED25519_LINE).unwrap();
        assert_eq!(line.name.host, "10.10.0.1");
        assert_eq!(line.name.port, 22);
        assert_eq!(line.name.algorithm, "ssh-ed25519");
        assert_eq!(line.key_blob.len(), 4 + 11 + 4 + 32);
        assert_eq!(line.comment, None);
        assert_eq!(line.to_string(), ED25519_LINE);
    }

    #[test]
    fn test_parse_keeps_comment() {
        let line = KnownHostsLine::parse(&format!("  {ED25519_LINE} root@box  extra \n")).unwrap();
        assert_eq!(line.comment.as_deref(), Some("root@box extra"));
        assert_eq!(line.to_string(), format!("{ED25519_LINE} root@box extra"));
    }

    #[test]
    fn test_first_host_of_list_is_used() {
        let line = ED25519_LINE.replacen("10.10.0.1", "example.com,10.10.0.1", 1);
        let parsed = KnownHostsLine::parse(&line).unwrap();
        assert_eq!(parsed.name.host, "example.com");
    }

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("10.10.0.1"), Some(("10.10.0.1", 22)));
        assert_eq!(split_host_port("10.10.0.1:2222"), Some(("10.10.0.1", 2222)));
        assert_eq!(split_host_port("[example.com]:2222"), Some(("example.com", 2222)));
        assert_eq!(split_host_port("[::1]:2222"), Some(("[::1]", 2222)));
        assert_eq!(
            split_host_port("[21DA:D3:0:2F3B::DEAD:BEEF]"),
            Some(("[21DA:D3:0:2F3B::DEAD:BEEF]", 22))
        );
        assert_eq!(split_host_port("fe80::1"), Some(("fe80::1", 22)));
        assert_eq!(split_host_port("host:notaport"), None);
        assert_eq!(split_host_port("[::1]x"), None);
        assert_eq!(split_host_port(":22"), None);
    }

    #[test]
    fn test_non_default_port_rendering() {
        let mut line = KnownHostsLine::parse(ED25519_LINE).unwrap();
        line.name.port = 2222;
        assert!(line.to_string().starts_with("10.10.0.1:2222 ssh-ed25519 "));
    }

    #[test]
    fn test_rejects_non_entries() {
        for bad in [
            "",
            "   ",
            "# comment",
            "@cert-authority *.example.com ssh-ed25519 AAAA",
            "10.10.0.1 ssh-ed25519",
            "|1|c2FsdA==|aGFzaA== ssh-ed25519 AAAA",
            "10.10.0.1 ssh-ed25519 !!!notbase64",
        ] {
            assert!(
                matches!(KnownHostsLine::parse(bad), Err(ConvertError::Parse { .. })),
                "{bad:?} should fail"
            );
        }
    }

    #[test]
    fn test_public_key_checks_algorithm_field() {
        let line = ED25519_LINE.replacen("ssh-ed25519", "ssh-rsa", 1);
        let parsed = KnownHostsLine::parse(&line).unwrap();
        let err = parsed.public_key().unwrap_err();
        assert!(matches!(err, ConvertError::Parse { ref reason, .. } if reason.contains("ssh-ed25519")));
    }

    #[test]
    fn test_public_key_rejects_truncated_blob() {
        let mut parsed = KnownHostsLine::parse(ED25519_LINE).unwrap();
        parsed.key_blob.truncate(20);
        assert!(matches!(parsed.public_key(), Err(ConvertError::KeyData(_))));
    }

    #[test]
    fn test_legacy_record_display() {
        let record = LegacyRecord::new("rsa2@22:host", "0x23,0x1");
        assert_eq!(record.to_string(), "rsa2@22:host=0x23,0x1");
    }
}
