// ABOUTME: Parser for legacy host key identifiers of the form `<tag>@[port:]host`.
// ABOUTME: Yields the SSH algorithm name, host, and port, and renders them back out.

use crate::algorithm::Algorithm;
use crate::error::{ConvertError, Result};
use std::fmt;

/// Port assumed when an identifier or known_hosts entry does not name one.
pub const DEFAULT_PORT: u16 = 22;

/// A parsed legacy identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyName {
    /// Canonical SSH algorithm name (`dss` and `rsa2` are translated).
    pub algorithm: String,
    /// Host name, address, or bracketed IPv6 literal, kept verbatim.
    pub host: String,
    pub port: u16,
}

impl KeyName {
    pub fn new(algorithm: Algorithm, host: impl Into<String>, port: u16) -> Self {
        Self {
            algorithm: algorithm.ssh_name().to_string(),
            host: host.into(),
            port,
        }
    }

    /// Parse `<tag>@[port:]host`.
    ///
    /// A run of digits terminated by `:` at the start of the host part is a
    /// port prefix. Anything else, including a bracketed IPv6 literal, is the
    /// host as written and the port defaults to 22.
    ///
    /// # Errors
    /// Returns `ConvertError::Parse` when the `@` is missing, the tag or host
    /// is empty, or the port prefix does not fit in 16 bits.
    pub fn parse(identifier: &str) -> Result<Self> {
        let (tag, rest) = identifier
            .split_once('@')
            .ok_or_else(|| ConvertError::parse(identifier, "missing '@'"))?;

        if tag.is_empty() {
            return Err(ConvertError::parse(identifier, "empty algorithm tag"));
        }

        let (host, port) = match split_port_prefix(rest) {
            Some((digits, host)) => {
                let port = digits
                    .parse::<u16>()
                    .map_err(|_| ConvertError::parse(identifier, "port out of range"))?;
                (host, port)
            }
            None => (rest, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(ConvertError::parse(identifier, "empty host"));
        }

        Ok(Self {
            algorithm: Algorithm::canonical_name(tag).to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// Host as written in a known_hosts line: `host`, or `host:port` off port 22.
    pub fn known_hosts_host(&self) -> String {
        if self.port == DEFAULT_PORT {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Tag written in front of the `@`.
    pub fn legacy_tag(&self) -> &str {
        match Algorithm::from_ssh_name(&self.algorithm) {
            Ok(algorithm) => algorithm.legacy_tag(),
            Err(_) => &self.algorithm,
        }
    }

    /// Render `<tag>@<port>:<host>`. The port is always written, 22 included.
    pub fn legacy_identifier(&self) -> String {
        format!("{}@{}:{}", self.legacy_tag(), self.port, self.host)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.legacy_identifier())
    }
}

/// Split a leading `digits:` port prefix off the host part.
fn split_port_prefix(rest: &str) -> Option<(&str, &str)> {
    let end = rest.find(|c: char| !c.is_ascii_digit())?;
    if end == 0 || !rest[end..].starts_with(':') {
        return None;
    }
    Some((&rest[..end], &rest[end + 1..]))
}
