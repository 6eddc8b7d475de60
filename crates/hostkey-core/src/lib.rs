// ABOUTME: Converts SSH host keys between legacy registry records and known_hosts lines.
// ABOUTME: Re-exports the identifier parser, key codecs, record formats, and batch helpers.

//! # hostkey-core
//!
//! Converts SSH host keys between two textual forms of the same public key:
//!
//! - a legacy registry-style record, key `rsa2@22:10.10.0.1` and value
//!   `0x10001,0xa362c4ed...` (comma-separated hex integers), and
//! - an OpenSSH `known_hosts` line, `10.10.0.1 ssh-rsa AAAAB3NzaC1yc2E...`.
//!
//! DSA, RSA, ECDSA (P-256, P-384, P-521) and Ed25519 keys are supported.
//! Ed25519 is the interesting case: the wire form stores only y and the
//! parity of x, so the legacy x coordinate is recovered by a modular square
//! root over GF(2^255 - 19).
//!
//! Every conversion is pure and independent: no I/O, no shared state.
//!
//! ## Example
//!
//! ```
//! use hostkey_core::{known_hosts_to_legacy, legacy_to_known_hosts};
//!
//! let line = legacy_to_known_hosts(
//!     "ssh-ed25519@22:10.10.0.1",
//!     "0x32d013e2996f93c5f5cec2ab3aac303434f31775aababf3ea342e1227ab4ac36,\
//!      0x45d63b169d50b797498eb035b1055c6e83e36f21b1da140c3ed3caa60fa4d866",
//! )
//! .expect("record should convert");
//! assert_eq!(
//!     line,
//!     "10.10.0.1 ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIGbYpA+mytM+DBTasSFv44NuXAWxNbCOSZe3UJ0WO9ZF"
//! );
//!
//! let record = known_hosts_to_legacy(&line).expect("line should convert");
//! assert_eq!(record.key, "ssh-ed25519@22:10.10.0.1");
//! ```

mod algorithm;
mod batch;
mod convert;
pub mod ed25519;
mod error;
mod host_key;
mod key_name;
pub mod mpint;
mod record;

pub use algorithm::{Algorithm, EcdsaCurve};
pub use batch::{convert_known_hosts_lines, convert_legacy_records, BatchFailure, BatchReport};
pub use convert::{known_hosts_to_legacy, legacy_to_known_hosts, HostKeyRecord};
pub use error::{ConvertError, Result};
pub use host_key::{DsaKey, EcdsaKey, Ed25519Key, HostKey, RsaKey, WireKey};
pub use key_name::{KeyName, DEFAULT_PORT};
pub use record::{KnownHostsLine, LegacyRecord};
