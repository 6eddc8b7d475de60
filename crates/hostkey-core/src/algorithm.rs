// ABOUTME: Catalogue of supported host key algorithms and ECDSA curves.
// ABOUTME: Maps between legacy registry tags, SSH algorithm names, and curve parameters.

use crate::error::{ConvertError, Result};
use std::fmt;

/// Host key algorithms understood by the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Dsa,
    Rsa,
    EcdsaP256,
    EcdsaP384,
    EcdsaP521,
    Ed25519,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Dsa,
        Algorithm::Rsa,
        Algorithm::EcdsaP256,
        Algorithm::EcdsaP384,
        Algorithm::EcdsaP521,
        Algorithm::Ed25519,
    ];

    /// Algorithm name as written in known_hosts lines and wire blobs.
    pub fn ssh_name(self) -> &'static str {
        match self {
            Algorithm::Dsa => "ssh-dss",
            Algorithm::Rsa => "ssh-rsa",
            Algorithm::EcdsaP256 => "ecdsa-sha2-nistp256",
            Algorithm::EcdsaP384 => "ecdsa-sha2-nistp384",
            Algorithm::EcdsaP521 => "ecdsa-sha2-nistp521",
            Algorithm::Ed25519 => "ssh-ed25519",
        }
    }

    /// Tag used in front of the `@` of a legacy identifier.
    pub fn legacy_tag(self) -> &'static str {
        match self {
            Algorithm::Dsa => "dss",
            Algorithm::Rsa => "rsa2",
            other => other.ssh_name(),
        }
    }

    pub fn from_ssh_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.ssh_name() == name)
            .ok_or_else(|| ConvertError::UnsupportedAlgorithm(name.to_string()))
    }

    pub fn from_legacy_tag(tag: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.legacy_tag() == tag)
            .ok_or_else(|| ConvertError::UnsupportedAlgorithm(tag.to_string()))
    }

    /// Translate a legacy tag into its SSH algorithm name.
    ///
    /// Only `dss` and `rsa2` differ from their SSH names; every other tag is
    /// returned unchanged, whether or not it is supported.
    pub fn canonical_name(tag: &str) -> &str {
        match tag {
            "dss" => Algorithm::Dsa.ssh_name(),
            "rsa2" => Algorithm::Rsa.ssh_name(),
            other => other,
        }
    }

    /// The curve used by an ECDSA algorithm.
    pub fn curve(self) -> Option<EcdsaCurve> {
        match self {
            Algorithm::EcdsaP256 => Some(EcdsaCurve::NistP256),
            Algorithm::EcdsaP384 => Some(EcdsaCurve::NistP384),
            Algorithm::EcdsaP521 => Some(EcdsaCurve::NistP521),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ssh_name())
    }
}

/// NIST curves usable with ECDSA host keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    NistP256,
    NistP384,
    NistP521,
}

impl EcdsaCurve {
    pub fn name(self) -> &'static str {
        match self {
            EcdsaCurve::NistP256 => "nistp256",
            EcdsaCurve::NistP384 => "nistp384",
            EcdsaCurve::NistP521 => "nistp521",
        }
    }

    /// Byte width of one affine coordinate.
    pub fn field_width(self) -> usize {
        match self {
            EcdsaCurve::NistP256 => 32,
            EcdsaCurve::NistP384 => 48,
            EcdsaCurve::NistP521 => 66,
        }
    }

    pub fn algorithm(self) -> Algorithm {
        match self {
            EcdsaCurve::NistP256 => Algorithm::EcdsaP256,
            EcdsaCurve::NistP384 => Algorithm::EcdsaP384,
            EcdsaCurve::NistP521 => Algorithm::EcdsaP521,
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "nistp256" => Ok(EcdsaCurve::NistP256),
            "nistp384" => Ok(EcdsaCurve::NistP384),
            "nistp521" => Ok(EcdsaCurve::NistP521),
            other => Err(ConvertError::UnsupportedCurve(other.to_string())),
        }
    }
}

impl From<ssh_key::EcdsaCurve> for EcdsaCurve {
    fn from(curve: ssh_key::EcdsaCurve) -> Self {
        match curve {
            ssh_key::EcdsaCurve::NistP256 => EcdsaCurve::NistP256,
            ssh_key::EcdsaCurve::NistP384 => EcdsaCurve::NistP384,
            ssh_key::EcdsaCurve::NistP521 => EcdsaCurve::NistP521,
        }
    }
}
