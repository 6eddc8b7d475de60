// ABOUTME: The two conversion entry points between legacy records and known_hosts lines.
// ABOUTME: Composes the identifier parser, wire codecs, and record formats per call.

use crate::algorithm::Algorithm;
use crate::error::Result;
use crate::host_key::HostKey;
use crate::key_name::KeyName;
use crate::record::{KnownHostsLine, LegacyRecord};
use tracing::debug;

/// A host key together with the host it belongs to.
///
/// Built fresh for every conversion and never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostKeyRecord {
    pub host: String,
    pub port: u16,
    pub key: HostKey,
}

impl HostKeyRecord {
    /// Build a record from a legacy identifier and value.
    pub fn from_legacy(key: &str, value: &str) -> Result<Self> {
        let name = KeyName::parse(key)?;
        let algorithm = Algorithm::from_ssh_name(&name.algorithm)?;
        Ok(Self {
            key: HostKey::from_legacy(algorithm, value)?,
            host: name.host,
            port: name.port,
        })
    }

    /// Build a record from a known_hosts line.
    pub fn from_known_hosts(line: &str) -> Result<Self> {
        let parsed = KnownHostsLine::parse(line)?;
        Algorithm::from_ssh_name(&parsed.name.algorithm)?;
        let public_key = parsed.public_key()?;
        Ok(Self {
            key: HostKey::from_public_key(&public_key)?,
            host: parsed.name.host,
            port: parsed.name.port,
        })
    }

    fn key_name(&self) -> KeyName {
        KeyName::new(self.key.algorithm(), self.host.clone(), self.port)
    }

    pub fn to_known_hosts(&self) -> Result<String> {
        let line = KnownHostsLine::new(self.key_name(), self.key.to_wire()?);
        Ok(line.to_string())
    }

    pub fn to_legacy(&self) -> LegacyRecord {
        LegacyRecord::new(self.key_name().legacy_identifier(), self.key.legacy_value())
    }
}

/// Convert a legacy key/value pair into a known_hosts line.
///
/// # Errors
/// Returns the `ConvertError` of the first stage that rejects the input.
pub fn legacy_to_known_hosts(key: &str, value: &str) -> Result<String> {
    let record = HostKeyRecord::from_legacy(key, value)?;
    let line = record.to_known_hosts()?;
    debug!(key, algorithm = %record.key.algorithm(), "converted legacy record");
    Ok(line)
}

/// Convert a known_hosts line into a legacy key/value pair.
///
/// # Errors
/// Returns the `ConvertError` of the first stage that rejects the input,
/// including `Parse` for lines that are not host key entries.
pub fn known_hosts_to_legacy(line: &str) -> Result<LegacyRecord> {
    let record = HostKeyRecord::from_known_hosts(line)?;
    let legacy = record.to_legacy();
    debug!(key = %legacy.key, "converted known_hosts line");
    Ok(legacy)
}
