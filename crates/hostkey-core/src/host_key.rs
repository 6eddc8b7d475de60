// ABOUTME: Host key variants, one per supported family, with their wire encoders and decoders.
// ABOUTME: Converts legacy hex fields to SSH public key blobs and decoded SSH keys back to fields.

use crate::algorithm::{Algorithm, EcdsaCurve};
use crate::ed25519;
use crate::error::{ConvertError, Result};
use crate::mpint::{
    biguint_from_mpint, fixed_width_be, format_hex_field, parse_hex_field, SshEncode,
};
use num_bigint::BigUint;
use ssh_key::public::{DsaPublicKey, EcdsaPublicKey, Ed25519PublicKey, KeyData, RsaPublicKey};

/// Uncompressed SEC1 point tag.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Behaviour shared by every key family.
pub trait WireKey {
    /// Build the key from its legacy value, already split on commas.
    fn from_legacy_fields(algorithm: Algorithm, fields: &[&str]) -> Result<Self>
    where
        Self: Sized;

    fn algorithm(&self) -> Algorithm;

    /// Legacy fields in their fixed order, ready to be comma-joined.
    fn legacy_fields(&self) -> Vec<String>;

    /// Append everything that follows the algorithm name in the wire blob.
    fn encode_body(&self, buf: &mut Vec<u8>) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsaKey {
    pub p: BigUint,
    pub q: BigUint,
    pub g: BigUint,
    pub y: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    pub e: BigUint,
    pub n: BigUint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcdsaKey {
    pub curve: EcdsaCurve,
    pub x: BigUint,
    pub y: BigUint,
}

/// Ed25519 key held as affine coordinates; only y and the parity of x reach the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519Key {
    pub x: BigUint,
    pub y: BigUint,
}

fn expect_arity(algorithm: Algorithm, fields: &[&str], expected: usize) -> Result<()> {
    if fields.len() != expected {
        return Err(ConvertError::Arity {
            algorithm: algorithm.ssh_name(),
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}

impl WireKey for DsaKey {
    fn from_legacy_fields(algorithm: Algorithm, fields: &[&str]) -> Result<Self> {
        expect_arity(algorithm, fields, 4)?;
        Ok(Self {
            p: parse_hex_field(fields[0])?,
            q: parse_hex_field(fields[1])?,
            g: parse_hex_field(fields[2])?,
            y: parse_hex_field(fields[3])?,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Dsa
    }

    fn legacy_fields(&self) -> Vec<String> {
        [&self.p, &self.q, &self.g, &self.y]
            .into_iter()
            .map(format_hex_field)
            .collect()
    }

    fn encode_body(&self, buf: &mut Vec<u8>) -> Result<()> {
        for n in [&self.p, &self.q, &self.g, &self.y] {
            buf.extend_ssh_mpint(n);
        }
        Ok(())
    }
}

impl TryFrom<&DsaPublicKey> for DsaKey {
    type Error = ConvertError;

    fn try_from(key: &DsaPublicKey) -> Result<Self> {
        Ok(Self {
            p: biguint_from_mpint("DSA p", key.p.as_bytes())?,
            q: biguint_from_mpint("DSA q", key.q.as_bytes())?,
            g: biguint_from_mpint("DSA g", key.g.as_bytes())?,
            y: biguint_from_mpint("DSA y", key.y.as_bytes())?,
        })
    }
}

impl WireKey for RsaKey {
    fn from_legacy_fields(algorithm: Algorithm, fields: &[&str]) -> Result<Self> {
        expect_arity(algorithm, fields, 2)?;
        Ok(Self {
            e: parse_hex_field(fields[0])?,
            n: parse_hex_field(fields[1])?,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Rsa
    }

    fn legacy_fields(&self) -> Vec<String> {
        vec![format_hex_field(&self.e), format_hex_field(&self.n)]
    }

    fn encode_body(&self, buf: &mut Vec<u8>) -> Result<()> {
        buf.extend_ssh_mpint(&self.e);
        buf.extend_ssh_mpint(&self.n);
        Ok(())
    }
}

impl TryFrom<&RsaPublicKey> for RsaKey {
    type Error = ConvertError;

    fn try_from(key: &RsaPublicKey) -> Result<Self> {
        Ok(Self {
            e: biguint_from_mpint("RSA e", key.e.as_bytes())?,
            n: biguint_from_mpint("RSA n", key.n.as_bytes())?,
        })
    }
}

impl WireKey for EcdsaKey {
    fn from_legacy_fields(algorithm: Algorithm, fields: &[&str]) -> Result<Self> {
        expect_arity(algorithm, fields, 3)?;
        let name = fields[0].trim();
        let curve = EcdsaCurve::from_name(name)?;
        if algorithm.curve() != Some(curve) {
            return Err(ConvertError::CurveMismatch {
                algorithm: algorithm.ssh_name(),
                found: name.to_string(),
            });
        }
        Ok(Self {
            curve,
            x: parse_hex_field(fields[1])?,
            y: parse_hex_field(fields[2])?,
        })
    }

    fn algorithm(&self) -> Algorithm {
        self.curve.algorithm()
    }

    fn legacy_fields(&self) -> Vec<String> {
        vec![
            self.curve.name().to_string(),
            format_hex_field(&self.x),
            format_hex_field(&self.y),
        ]
    }

    fn encode_body(&self, buf: &mut Vec<u8>) -> Result<()> {
        let width = self.curve.field_width();
        let mut point = Vec::with_capacity(1 + 2 * width);
        point.push(SEC1_UNCOMPRESSED);
        point.extend_from_slice(&fixed_width_be("ECDSA x", &self.x, width)?);
        point.extend_from_slice(&fixed_width_be("ECDSA y", &self.y, width)?);

        buf.extend_ssh_string(self.curve.name().as_bytes());
        buf.extend_ssh_string(&point);
        Ok(())
    }
}

impl TryFrom<&EcdsaPublicKey> for EcdsaKey {
    type Error = ConvertError;

    fn try_from(key: &EcdsaPublicKey) -> Result<Self> {
        let curve = EcdsaCurve::from(key.curve());
        let width = curve.field_width();
        let point = key.as_sec1_bytes();

        if point.len() != 1 + 2 * width || point[0] != SEC1_UNCOMPRESSED {
            return Err(ConvertError::parse(
                curve.name(),
                "ECDSA point is not in uncompressed form",
            ));
        }

        Ok(Self {
            curve,
            x: BigUint::from_bytes_be(&point[1..=width]),
            y: BigUint::from_bytes_be(&point[1 + width..]),
        })
    }
}

impl WireKey for Ed25519Key {
    fn from_legacy_fields(algorithm: Algorithm, fields: &[&str]) -> Result<Self> {
        expect_arity(algorithm, fields, 2)?;
        Ok(Self {
            x: parse_hex_field(fields[0])?,
            y: parse_hex_field(fields[1])?,
        })
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Ed25519
    }

    fn legacy_fields(&self) -> Vec<String> {
        vec![format_hex_field(&self.x), format_hex_field(&self.y)]
    }

    fn encode_body(&self, buf: &mut Vec<u8>) -> Result<()> {
        let compressed = ed25519::compress(&self.x, &self.y)?;
        buf.extend_ssh_string(&compressed);
        Ok(())
    }
}

impl TryFrom<&Ed25519PublicKey> for Ed25519Key {
    type Error = ConvertError;

    fn try_from(key: &Ed25519PublicKey) -> Result<Self> {
        let (x, y) = ed25519::decompress(&key.0)?;
        Ok(Self { x, y })
    }
}

/// A host key of any supported family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKey {
    Dsa(DsaKey),
    Rsa(RsaKey),
    Ecdsa(EcdsaKey),
    Ed25519(Ed25519Key),
}

impl HostKey {
    /// Parse a comma-separated legacy value for the given algorithm.
    pub fn from_legacy(algorithm: Algorithm, value: &str) -> Result<Self> {
        let fields: Vec<&str> = value.split(',').collect();
        Ok(match algorithm {
            Algorithm::Dsa => HostKey::Dsa(DsaKey::from_legacy_fields(algorithm, &fields)?),
            Algorithm::Rsa => HostKey::Rsa(RsaKey::from_legacy_fields(algorithm, &fields)?),
            Algorithm::EcdsaP256 | Algorithm::EcdsaP384 | Algorithm::EcdsaP521 => {
                HostKey::Ecdsa(EcdsaKey::from_legacy_fields(algorithm, &fields)?)
            }
            Algorithm::Ed25519 => {
                HostKey::Ed25519(Ed25519Key::from_legacy_fields(algorithm, &fields)?)
            }
        })
    }

    /// Extract the legacy fields from a key decoded by `ssh-key`.
    pub fn from_public_key(key: &ssh_key::PublicKey) -> Result<Self> {
        Self::from_key_data(key.key_data())
    }

    pub fn from_key_data(key_data: &KeyData) -> Result<Self> {
        match key_data {
            KeyData::Dsa(key) => Ok(HostKey::Dsa(key.try_into()?)),
            KeyData::Rsa(key) => Ok(HostKey::Rsa(key.try_into()?)),
            KeyData::Ecdsa(key) => Ok(HostKey::Ecdsa(key.try_into()?)),
            KeyData::Ed25519(key) => Ok(HostKey::Ed25519(key.try_into()?)),
            other => Err(ConvertError::UnsupportedAlgorithm(
                other.algorithm().as_str().to_string(),
            )),
        }
    }

    fn inner(&self) -> &dyn WireKey {
        match self {
            HostKey::Dsa(key) => key,
            HostKey::Rsa(key) => key,
            HostKey::Ecdsa(key) => key,
            HostKey::Ed25519(key) => key,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.inner().algorithm()
    }

    pub fn legacy_fields(&self) -> Vec<String> {
        self.inner().legacy_fields()
    }

    /// Comma-joined legacy value.
    pub fn legacy_value(&self) -> String {
        self.legacy_fields().join(",")
    }

    /// Complete SSH public key blob: algorithm name string followed by the key body.
    pub fn to_wire(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        buf.extend_ssh_string(self.algorithm().ssh_name().as_bytes());
        self.inner().encode_body(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_public_key(key: &HostKey) -> ssh_key::PublicKey {
        let blob = key.to_wire().expect("key should encode");
        ssh_key::PublicKey::from_bytes(&blob).expect("blob should parse as SSH public key")
    }

    #[test]
    fn test_rsa_encoding_layout() {
        let key = HostKey::from_legacy(Algorithm::Rsa, "0x10001,0x80ff").unwrap();
        let blob = key.to_wire().unwrap();
        let expected: Vec<u8> = [
            &[0, 0, 0, 7][..],
            b"ssh-rsa",
            &[0, 0, 0, 3, 0x01, 0x00, 0x01],
            &[0, 0, 0, 3, 0x00, 0x80, 0xff],
        ]
        .concat();
        assert_eq!(blob, expected);
    }

    #[test]
    fn test_ed25519_round_trip_through_ssh_key() {
        let key = HostKey::from_legacy(
            Algorithm::Ed25519,
            "0x216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a,\
             0x6666666666666666666666666666666666666666666666666666666666666658",
        )
        .unwrap();
        let decoded = HostKey::from_public_key(&wire_public_key(&key)).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_dsa_requires_four_fields() {
        let err = HostKey::from_legacy(Algorithm::Dsa, "0x1,0x2,0x3").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Arity {
                algorithm: "ssh-dss",
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_rsa_requires_two_fields() {
        let err = HostKey::from_legacy(Algorithm::Rsa, "0x10001").unwrap_err();
        assert!(matches!(err, ConvertError::Arity { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn test_bad_hex_field() {
        let err = HostKey::from_legacy(Algorithm::Rsa, "0x10001,0xnope").unwrap_err();
        assert!(matches!(err, ConvertError::IntegerDecode { ref field, .. } if field == "0xnope"));
    }

    #[test]
    fn test_ecdsa_pads_coordinates_to_field_width() {
        let key = HostKey::from_legacy(Algorithm::EcdsaP256, "nistp256,0x1,0x2").unwrap();
        let blob = key.to_wire().unwrap();

        // name string, curve string, then a 65-byte point string
        let point_offset = 4 + 19 + 4 + 8;
        assert_eq!(&blob[point_offset..point_offset + 4], &[0, 0, 0, 65]);
        let point = &blob[point_offset + 4..];
        assert_eq!(point.len(), 65);
        assert_eq!(point[0], 0x04);
        assert_eq!(point[32], 0x01);
        assert_eq!(point[64], 0x02);
        assert!(point[1..32].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_ecdsa_unknown_curve() {
        let err = HostKey::from_legacy(Algorithm::EcdsaP256, "secp256k1,0x1,0x2").unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedCurve(ref c) if c == "secp256k1"));
    }

    #[test]
    fn test_ecdsa_curve_mismatch() {
        let err = HostKey::from_legacy(Algorithm::EcdsaP384, "nistp256,0x1,0x2").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::CurveMismatch {
                algorithm: "ecdsa-sha2-nistp384",
                ..
            }
        ));
    }

    #[test]
    fn test_ecdsa_coordinate_too_wide() {
        let wide = format!("nistp256,0x1{},0x2", "00".repeat(32));
        let key = HostKey::from_legacy(Algorithm::EcdsaP256, &wide).unwrap();
        let err = key.to_wire().unwrap_err();
        assert!(matches!(
            err,
            ConvertError::FieldRange {
                field: "ECDSA x",
                bits: 256
            }
        ));
    }

    #[test]
    fn test_ed25519_body_is_32_byte_string() {
        let key = HostKey::from_legacy(Algorithm::Ed25519, "0x3,0x1").unwrap();
        let blob = key.to_wire().unwrap();
        let body = &blob[4 + 11..];
        assert_eq!(&body[..4], &[0, 0, 0, 32]);
        assert_eq!(body[4], 0x01);
        // odd x folds into the top bit of the last byte
        assert_eq!(body[4 + 31], 0x80);
    }

    #[test]
    fn test_ed25519_requires_two_fields() {
        let err = HostKey::from_legacy(Algorithm::Ed25519, "0x1").unwrap_err();
        assert!(matches!(err, ConvertError::Arity { expected: 2, .. }));
    }

    #[test]
    fn test_algorithm_dispatch() {
        let key = HostKey::from_legacy(Algorithm::EcdsaP521, "nistp521,0x1,0x2").unwrap();
        assert_eq!(key.algorithm(), Algorithm::EcdsaP521);
        assert_eq!(key.legacy_fields(), vec!["nistp521", "0x1", "0x2"]);
    }
}
