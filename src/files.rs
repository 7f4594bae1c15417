//! Caller-facing file operations
//!
//! Ties the envelope codec and cipher pipeline together over real files, and
//! owns the naming policy: encrypting `name` produces `name.enc`, decrypting
//! requires the `.enc` suffix and strips it. A failed operation never leaves
//! a partially written output file behind.

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::CipherConfig;
use crate::crypto::{decrypt_stream, derive_key, encrypt_stream, Passphrase};
use crate::envelope::{Header, HEADER_LEN};
use crate::error::{SealError, SealResult};

/// Suffix appended to encrypted files
pub const ENVELOPE_EXT: &str = "enc";

/// Output path for encrypting `path`: the full name plus `.enc`
pub fn sealed_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ENVELOPE_EXT);
    PathBuf::from(name)
}

/// Output path for decrypting `path`, or None if the suffix is missing
pub fn unsealed_path(path: &Path) -> Option<PathBuf> {
    if path.extension().and_then(OsStr::to_str) == Some(ENVELOPE_EXT) {
        Some(path.with_extension(""))
    } else {
        None
    }
}

/// Encrypt a file with the default configuration
///
/// Produces `<path>.enc` next to the input and returns the total number of
/// bytes written, header included.
pub fn encrypt_file(path: impl AsRef<Path>, passphrase: &Passphrase) -> SealResult<u64> {
    encrypt_file_with(path, passphrase, &CipherConfig::default())
}

/// Encrypt a file with explicit key-derivation parameters
pub fn encrypt_file_with(
    path: impl AsRef<Path>,
    passphrase: &Passphrase,
    config: &CipherConfig,
) -> SealResult<u64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SealError::not_found(path));
    }
    let output = sealed_path(path);

    let header = Header::generate();
    let key = derive_key(passphrase.as_str(), &header.salt, &config.kdf)?;

    let input = File::open(path)?;
    let mut writer = BufWriter::new(File::create(&output)?);

    let result = header
        .write_to(&mut writer)
        .and_then(|()| encrypt_stream(BufReader::new(input), &mut writer, &key, &header.nonce))
        .and_then(|written| {
            writer.flush()?;
            Ok(HEADER_LEN as u64 + written)
        });

    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(&output);
    }
    result
}

/// Decrypt a `.enc` file with the default configuration
///
/// Recovers the original name by stripping the suffix and returns the number
/// of plaintext bytes written.
pub fn decrypt_file(path: impl AsRef<Path>, passphrase: &Passphrase) -> SealResult<u64> {
    decrypt_file_with(path, passphrase, &CipherConfig::default())
}

/// Decrypt a `.enc` file with explicit key-derivation parameters
///
/// The parameters must match the ones the file was encrypted with; the
/// envelope stores only the salt and nonce.
pub fn decrypt_file_with(
    path: impl AsRef<Path>,
    passphrase: &Passphrase,
    config: &CipherConfig,
) -> SealResult<u64> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SealError::not_found(path));
    }
    let output = unsealed_path(path).ok_or_else(|| SealError::bad_extension(path))?;

    let mut reader = BufReader::new(File::open(path)?);
    // Header problems are detected before any key derivation is attempted
    let header = Header::read_from(&mut reader)?;
    let key = derive_key(passphrase.as_str(), &header.salt, &config.kdf)?;

    let mut writer = BufWriter::new(File::create(&output)?);
    let result = decrypt_stream(reader, &mut writer, &key, &header.nonce).and_then(|written| {
        writer.flush()?;
        Ok(written)
    });

    // A failed decrypt must not leave a corrupt plaintext artifact on disk
    if result.is_err() {
        drop(writer);
        let _ = fs::remove_file(&output);
    }
    result
}
