//! sealfile - password-based single-file encryption
//!
//! Encrypts a file at rest into a self-contained envelope:
//! `salt(32) || nonce(16) || ciphertext`. The key is derived from a password
//! and the stored salt (Argon2id by default, PBKDF2-HMAC-SHA256 for
//! compatibility), and the payload is sealed with AES-256-GCM under the
//! STREAM construction so files of any size are processed in bounded memory.
//!
//! # Architecture
//!
//! - `config`: format constants and key-derivation parameters
//! - `error`: custom error types
//! - `envelope`: on-disk header codec
//! - `crypto`: key derivation and the authenticated streaming cipher
//! - `files`: caller-facing encrypt/decrypt operations and naming policy
//!
//! # Example
//!
//! ```rust,ignore
//! use sealfile::{decrypt_file, encrypt_file, Passphrase};
//!
//! let passphrase = Passphrase::from("correct horse battery staple");
//! encrypt_file("notes.txt", &passphrase)?;          // notes.txt.enc
//! decrypt_file("notes.txt.enc", &passphrase)?;      // notes.txt
//! ```

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod files;

pub use config::{CipherConfig, KdfParams};
pub use crypto::{derive_key, DerivedKey, Passphrase};
pub use error::{SealError, SealResult};
pub use files::{decrypt_file, decrypt_file_with, encrypt_file, encrypt_file_with};
