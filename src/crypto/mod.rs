//! Cryptographic pipeline for sealfile
//!
//! Turns a password and salt into a key, and a key plus nonce into an
//! authenticated streaming transform over a byte stream.

pub mod key_derivation;
pub mod secure_memory;
pub mod stream;

pub use key_derivation::{derive_key, DerivedKey};
pub use secure_memory::Passphrase;
pub use stream::{decrypt_stream, encrypt_stream, CHUNK_LEN, TAG_LEN};
