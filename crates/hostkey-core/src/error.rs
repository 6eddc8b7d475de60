// ABOUTME: Error types for host key conversion using thiserror.
// ABOUTME: Provides typed errors for parsing, field decoding, and Ed25519 point recovery.

use thiserror::Error;

/// Errors that can occur while converting a host key record.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The legacy identifier or known_hosts line is malformed.
    #[error("malformed input {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// The legacy value carries the wrong number of fields for its algorithm.
    #[error("{algorithm} expects {expected} fields, got {actual}")]
    Arity {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A field is not a `0x`-prefixed hexadecimal integer.
    #[error("invalid hex integer {field:?}")]
    IntegerDecode {
        field: String,
        #[source]
        source: Option<num_bigint::ParseBigIntError>,
    },

    /// The algorithm tag is outside the supported key families.
    #[error("unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// The ECDSA curve name is not one of nistp256, nistp384 or nistp521.
    #[error("unsupported ECDSA curve: {0}")]
    UnsupportedCurve(String),

    /// The ECDSA value names a curve other than the one its algorithm uses.
    #[error("curve {found} does not match algorithm {algorithm}")]
    CurveMismatch {
        algorithm: &'static str,
        found: String,
    },

    /// A field does not fit the fixed width its encoding allows.
    #[error("{field} does not fit in {bits} bits")]
    FieldRange { field: &'static str, bits: usize },

    /// The Ed25519 y coordinate has no matching x on the curve.
    #[error("Ed25519 point with y = {y_hex} is not on the curve")]
    PointRecovery { y_hex: String },

    /// The SSH public key blob could not be decoded.
    #[error("failed to decode SSH public key: {0}")]
    KeyData(#[source] ssh_key::Error),
}

impl ConvertError {
    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvertError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias using ConvertError.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display() {
        let err = ConvertError::parse("rsa2", "missing '@'");
        let display = format!("{}", err);
        assert!(display.contains("malformed input"));
        assert!(display.contains("\"rsa2\""));
        assert!(display.contains("missing '@'"));
    }

    #[test]
    fn test_arity_error_display() {
        let err = ConvertError::Arity {
            algorithm: "ssh-dss",
            expected: 4,
            actual: 3,
        };
        assert_eq!(format!("{}", err), "ssh-dss expects 4 fields, got 3");
    }

    #[test]
    fn test_integer_decode_error_source() {
        let source = "zz".parse::<num_bigint::BigUint>().unwrap_err();
        let err = ConvertError::IntegerDecode {
            field: "0xzz".to_string(),
            source: Some(source),
        };
        assert!(format!("{}", err).contains("0xzz"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_integer_decode_error_without_source() {
        let err = ConvertError::IntegerDecode {
            field: "10001".to_string(),
            source: None,
        };
        assert!(err.source().is_none());
    }

    #[test]
    fn test_unsupported_errors_display() {
        let err = ConvertError::UnsupportedAlgorithm("ssh-ed448".to_string());
        assert!(format!("{}", err).contains("ssh-ed448"));

        let err = ConvertError::UnsupportedCurve("secp256k1".to_string());
        assert!(format!("{}", err).contains("secp256k1"));
    }

    #[test]
    fn test_point_recovery_error_display() {
        let err = ConvertError::PointRecovery {
            y_hex: "0x2".to_string(),
        };
        let display = format!("{}", err);
        assert!(display.contains("0x2"));
        assert!(display.contains("not on the curve"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_key_data_error_source() {
        let err = ConvertError::KeyData(ssh_key::Error::AlgorithmUnknown);
        assert!(format!("{}", err).contains("failed to decode SSH public key"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_debug() {
        let err = ConvertError::FieldRange {
            field: "Ed25519 y",
            bits: 255,
        };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("FieldRange"));
        assert!(debug_str.contains("Ed25519 y"));
    }
}
