// ABOUTME: CLI library components for the hostkey converter.
// ABOUTME: Config loading, legacy record files, and whole-file conversions.

//! # hostkey-cli
//!
//! Command-line front end for moving SSH host keys between a legacy
//! registry store and OpenSSH `known_hosts` files.
//!
//! ```text
//! hostkey
//! ├── to-known-hosts [--input F] [--output F]             # registry export -> known_hosts
//! ├── to-legacy [--input F] [--output F] [--format plain|reg]
//! ├── convert-key <KEY> <VALUE>                           # one record
//! └── convert-line <LINE>                                 # one known_hosts line
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Convert a registry export
//! hostkey to-known-hosts --input hostkeys.reg >> ~/.ssh/known_hosts
//!
//! # Produce an importable registry file
//! hostkey to-legacy --input ~/.ssh/known_hosts --format reg --output hostkeys.reg
//! ```

pub mod commands;
pub mod config;
pub mod records;

/// Version of the hostkey CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
