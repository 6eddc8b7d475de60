// ABOUTME: Ed25519 point compression and x-coordinate recovery over GF(2^255 - 19).
// ABOUTME: Rebuilds the full (x, y) point the legacy format stores from a 32-byte public key.

//! Ed25519 public keys travel as a compressed point: the 255-bit y coordinate
//! in little-endian order with the parity of x folded into bit 255. The legacy
//! format stores both affine coordinates, so decoding has to solve the twisted
//! Edwards equation `-x^2 + y^2 = 1 + d*x^2*y^2` for x.

use crate::error::{ConvertError, Result};
use crate::mpint::format_hex_field;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

/// Length of an encoded Ed25519 public key.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Curve parameter d = -121665/121666 mod p, big-endian.
const EDWARDS_D_BE: [u8; 32] = [
    0x52, 0x03, 0x6c, 0xee, 0x2b, 0x6f, 0xfe, 0x73, 0x8c, 0xc7, 0x40, 0x79, 0x77, 0x79, 0xe8, 0x98,
    0x00, 0x70, 0x0a, 0x4d, 0x41, 0x41, 0xd8, 0xab, 0x75, 0xeb, 0x4d, 0xca, 0x13, 0x59, 0x78, 0xa3,
];

/// Field prime p = 2^255 - 19.
pub static FIELD_PRIME: Lazy<BigUint> = Lazy::new(|| (BigUint::one() << 255u32) - 19u32);

/// Edwards curve parameter d.
pub static EDWARDS_D: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_be(&EDWARDS_D_BE));

/// sqrt(-1) mod p, i.e. 2^((p-1)/4).
static SQRT_MINUS_ONE: Lazy<BigUint> = Lazy::new(|| {
    let p = &*FIELD_PRIME;
    BigUint::from(2u32).modpow(&((p - 1u32) >> 2u32), p)
});

/// (p+3)/8, the exponent yielding a candidate square root since p = 5 mod 8.
static SQRT_EXPONENT: Lazy<BigUint> = Lazy::new(|| (&*FIELD_PRIME + 3u32) >> 3u32);

fn square(a: &BigUint) -> BigUint {
    (a * a) % &*FIELD_PRIME
}

fn invert(a: &BigUint) -> BigUint {
    let p = &*FIELD_PRIME;
    a.modpow(&(p - 2u32), p)
}

/// Recover x from y and the sign bit (the parity of x).
///
/// Fails when y is not a field element, when `(y^2 - 1) / (d*y^2 + 1)` has no
/// square root, or when the sign bit asks for an odd x of zero.
pub fn recover_x(y: &BigUint, sign: bool) -> Result<BigUint> {
    let p = &*FIELD_PRIME;
    if y >= p {
        return Err(not_on_curve(y));
    }

    let yy = square(y);
    let numerator = (&yy + p - 1u32) % p;
    let denominator = (&*EDWARDS_D * &yy + 1u32) % p;
    let xx = (numerator * invert(&denominator)) % p;

    let candidate = xx.modpow(&SQRT_EXPONENT, p);
    let x = if square(&candidate) == xx {
        candidate
    } else {
        let corrected = (candidate * &*SQRT_MINUS_ONE) % p;
        if square(&corrected) != xx {
            return Err(not_on_curve(y));
        }
        corrected
    };

    if x.is_zero() && sign {
        return Err(not_on_curve(y));
    }
    if x.is_odd() != sign {
        Ok(p - x)
    } else {
        Ok(x)
    }
}

/// Split a compressed public key into its affine (x, y) coordinates.
pub fn decompress(bytes: &[u8; PUBLIC_KEY_LEN]) -> Result<(BigUint, BigUint)> {
    let mut y_bytes = *bytes;
    let sign = y_bytes[PUBLIC_KEY_LEN - 1] & 0x80 != 0;
    y_bytes[PUBLIC_KEY_LEN - 1] &= 0x7f;

    let y = BigUint::from_bytes_le(&y_bytes);
    let x = recover_x(&y, sign)?;
    Ok((x, y))
}

/// Fold the parity of x into bit 255 of y and emit the little-endian encoding.
pub fn compress(x: &BigUint, y: &BigUint) -> Result<[u8; PUBLIC_KEY_LEN]> {
    if y.bits() > 255 {
        return Err(ConvertError::FieldRange {
            field: "Ed25519 y",
            bits: 255,
        });
    }

    let mut out = [0u8; PUBLIC_KEY_LEN];
    if !y.is_zero() {
        let le = y.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
    }
    if x.is_odd() {
        out[PUBLIC_KEY_LEN - 1] |= 0x80;
    }
    Ok(out)
}

/// Check `-x^2 + y^2 = 1 + d*x^2*y^2 (mod p)`.
pub fn is_on_curve(x: &BigUint, y: &BigUint) -> bool {
    let p = &*FIELD_PRIME;
    let xx = square(x);
    let yy = square(y);
    let lhs = (&yy + p - &xx) % p;
    let rhs = (&*EDWARDS_D * ((&xx * &yy) % p) + 1u32) % p;
    lhs == rhs
}

fn not_on_curve(y: &BigUint) -> ConvertError {
    ConvertError::PointRecovery {
        y_hex: format_hex_field(y),
    }
}
