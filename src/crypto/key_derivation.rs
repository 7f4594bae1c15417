//! Key derivation
//!
//! Stretches a password into a 256-bit key using Argon2id by default, with a
//! PBKDF2-HMAC-SHA256 path kept for files produced with the CPU-only
//! derivation. Both are deterministic for a given (password, salt) pair.

use std::fmt;

use argon2::{Algorithm, Argon2, Params, Version};
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::{KdfParams, KEY_LEN, SALT_LEN};
use crate::error::{SealError, SealResult};

/// A derived encryption key, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Get the key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

// Never expose key material through Debug output
impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey").finish_non_exhaustive()
    }
}

/// Derive an encryption key from a passphrase and salt
pub fn derive_key(
    passphrase: &str,
    salt: &[u8; SALT_LEN],
    params: &KdfParams,
) -> SealResult<DerivedKey> {
    let mut key = [0u8; KEY_LEN];

    match *params {
        KdfParams::Argon2id {
            memory_cost,
            time_cost,
            parallelism,
        } => {
            let argon_params = Params::new(memory_cost, time_cost, parallelism, Some(KEY_LEN))
                .map_err(|e| SealError::Crypto(format!("Invalid Argon2 parameters: {}", e)))?;
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);
            argon2
                .hash_password_into(passphrase.as_bytes(), salt, &mut key)
                .map_err(|e| SealError::Crypto(format!("Key derivation failed: {}", e)))?;
        }
        KdfParams::Pbkdf2Sha256 { iterations } => {
            pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, iterations, &mut key);
        }
    }

    Ok(DerivedKey { key })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cheap parameters so the test suite stays fast
    fn fast_params() -> KdfParams {
        KdfParams::Pbkdf2Sha256 { iterations: 1_000 }
    }

    fn small_argon2() -> KdfParams {
        KdfParams::Argon2id {
            memory_cost: 8192, // 8 MiB
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let salt = [7u8; SALT_LEN];
        let key1 = derive_key("passphrase", &salt, &fast_params()).unwrap();
        let key2 = derive_key("passphrase", &salt, &fast_params()).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_argon2_derivation_is_deterministic() {
        let salt = [7u8; SALT_LEN];
        let key1 = derive_key("passphrase", &salt, &small_argon2()).unwrap();
        let key2 = derive_key("passphrase", &salt, &small_argon2()).unwrap();
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_passphrases_differ() {
        let salt = [7u8; SALT_LEN];
        let key1 = derive_key("passphrase one", &salt, &fast_params()).unwrap();
        let key2 = derive_key("passphrase two", &salt, &fast_params()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salts_differ() {
        let key1 = derive_key("passphrase", &[1u8; SALT_LEN], &fast_params()).unwrap();
        let key2 = derive_key("passphrase", &[2u8; SALT_LEN], &fast_params()).unwrap();
        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_kdf_variants_disagree() {
        let salt = [7u8; SALT_LEN];
        let argon = derive_key("passphrase", &salt, &small_argon2()).unwrap();
        let pbkdf2 = derive_key("passphrase", &salt, &fast_params()).unwrap();
        assert_ne!(argon.as_bytes(), pbkdf2.as_bytes());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let key = derive_key("passphrase", &[7u8; SALT_LEN], &fast_params()).unwrap();
        let debug = format!("{:?}", key);
        assert_eq!(debug, "DerivedKey { .. }");
    }
}
