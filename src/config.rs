//! Cipher pipeline configuration
//!
//! The envelope layout is fixed, so the byte sizes live here as format
//! constants. The key-derivation cost parameters are the one knob that can
//! vary without changing the on-disk format, and they travel through an
//! explicit, immutable config struct rather than hidden global state.

/// Size of the AES-256 key in bytes
pub const KEY_LEN: usize = 32;

/// Size of the key-derivation salt in bytes
pub const SALT_LEN: usize = 32;

/// Size of the envelope nonce in bytes
pub const NONCE_LEN: usize = 16;

/// Iteration count for the PBKDF2 compatibility path
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Configuration for one encrypt or decrypt operation
#[derive(Debug, Clone, Default)]
pub struct CipherConfig {
    /// Key-derivation function and its cost parameters
    pub kdf: KdfParams,
}

impl CipherConfig {
    /// Default configuration: memory-hard Argon2id derivation
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration using the CPU-only iterated-hash derivation
    pub fn pbkdf2_compat() -> Self {
        Self {
            kdf: KdfParams::Pbkdf2Sha256 {
                iterations: PBKDF2_ITERATIONS,
            },
        }
    }
}

/// Key-derivation function selection
///
/// Both variants are deterministic for a given (password, salt) pair, which
/// is what lets decryption reconstruct the key from the stored salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KdfParams {
    /// Argon2id, memory-hard (default)
    Argon2id {
        /// Memory cost in KiB
        memory_cost: u32,
        /// Number of passes
        time_cost: u32,
        /// Degree of parallelism
        parallelism: u32,
    },
    /// PBKDF2-HMAC-SHA256, CPU-only compatibility path
    Pbkdf2Sha256 {
        /// Iteration count
        iterations: u32,
    },
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::Argon2id {
            memory_cost: 65536, // 64 MiB
            time_cost: 3,
            parallelism: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_argon2id() {
        let config = CipherConfig::default();
        assert!(matches!(config.kdf, KdfParams::Argon2id { .. }));
    }

    #[test]
    fn test_pbkdf2_compat_iterations() {
        let config = CipherConfig::pbkdf2_compat();
        assert_eq!(
            config.kdf,
            KdfParams::Pbkdf2Sha256 {
                iterations: 100_000
            }
        );
    }

    #[test]
    fn test_header_sizes() {
        assert_eq!(SALT_LEN + NONCE_LEN, 48);
    }
}
