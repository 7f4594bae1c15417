//! Authenticated streaming encryption/decryption
//!
//! AES-256-GCM under the STREAM construction: the input is processed in
//! fixed-size chunks, each sealed with its own authentication tag, so memory
//! use stays bounded regardless of file size. The envelope's 16-byte nonce is
//! the STREAM prefix; the construction appends a 32-bit big-endian segment
//! counter and a last-segment flag, giving a 21-byte per-segment GCM nonce
//! (non-96-bit nonces are processed through GHASH per the GCM spec). The
//! counter also authenticates segment order, and the flag frames the final
//! block, so reordering or truncating segments fails authentication.

use std::io::{ErrorKind, Read, Write};

use aes_gcm::aead::generic_array::typenum::U21;
use aes_gcm::aead::stream::{NewStream, StreamBE32, StreamPrimitive};
use aes_gcm::aead::KeyInit;
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;

use crate::config::NONCE_LEN;
use crate::error::{SealError, SealResult};

use super::DerivedKey;

/// Plaintext bytes sealed per segment (64 KiB)
pub const CHUNK_LEN: usize = 64 * 1024;

/// GCM authentication tag appended to each segment
pub const TAG_LEN: usize = 16;

type EnvelopeCipher = AesGcm<Aes256, U21>;
type EnvelopeStream = StreamBE32<EnvelopeCipher>;
type StreamNonce = aes_gcm::aead::stream::Nonce<EnvelopeCipher, EnvelopeStream>;

fn cipher(key: &DerivedKey) -> SealResult<EnvelopeCipher> {
    EnvelopeCipher::new_from_slice(key.as_bytes())
        .map_err(|e| SealError::Crypto(format!("Failed to create cipher: {}", e)))
}

/// Encrypt a byte stream, returning the number of ciphertext bytes written
///
/// Consumes the full plaintext stream in chunks. Each segment of ciphertext
/// is `CHUNK_LEN + TAG_LEN` bytes except the last, which may be shorter
/// (a 0-byte input still produces one tag-only segment).
pub fn encrypt_stream<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
) -> SealResult<u64> {
    let mut encryptor =
        EnvelopeStream::from_aead(cipher(key)?, StreamNonce::from_slice(nonce)).encryptor();

    let mut chunk = vec![0u8; CHUNK_LEN];
    let mut next = vec![0u8; CHUNK_LEN];
    let mut written = 0u64;

    // One chunk of lookahead tells us which segment is the last before we
    // seal it; the final segment must carry the STREAM last-block flag.
    let mut filled = read_full(&mut reader, &mut chunk)?;
    loop {
        let lookahead = read_full(&mut reader, &mut next)?;
        if lookahead == 0 {
            break;
        }
        let sealed = encryptor
            .encrypt_next(&chunk[..filled])
            .map_err(|_| SealError::Crypto("Encryption failed".to_string()))?;
        writer.write_all(&sealed)?;
        written += sealed.len() as u64;
        std::mem::swap(&mut chunk, &mut next);
        filled = lookahead;
    }

    let sealed = encryptor
        .encrypt_last(&chunk[..filled])
        .map_err(|_| SealError::Crypto("Encryption failed".to_string()))?;
    writer.write_all(&sealed)?;
    written += sealed.len() as u64;

    Ok(written)
}

/// Decrypt a byte stream, returning the number of plaintext bytes written
///
/// Any tag failure, truncated segment, or reordered segment yields the single
/// undifferentiated authentication error.
pub fn decrypt_stream<R: Read, W: Write>(
    mut reader: R,
    writer: &mut W,
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
) -> SealResult<u64> {
    let mut decryptor =
        EnvelopeStream::from_aead(cipher(key)?, StreamNonce::from_slice(nonce)).decryptor();

    const SEGMENT_LEN: usize = CHUNK_LEN + TAG_LEN;
    let mut segment = vec![0u8; SEGMENT_LEN];
    let mut next = vec![0u8; SEGMENT_LEN];
    let mut written = 0u64;

    let mut filled = read_full(&mut reader, &mut segment)?;
    loop {
        let lookahead = read_full(&mut reader, &mut next)?;
        if lookahead == 0 {
            break;
        }
        // Only the final segment may be short
        if filled < SEGMENT_LEN {
            return Err(SealError::Authentication);
        }
        let plain = decryptor
            .decrypt_next(&segment[..filled])
            .map_err(|_| SealError::Authentication)?;
        writer.write_all(&plain)?;
        written += plain.len() as u64;
        std::mem::swap(&mut segment, &mut next);
        filled = lookahead;
    }

    let plain = decryptor
        .decrypt_last(&segment[..filled])
        .map_err(|_| SealError::Authentication)?;
    writer.write_all(&plain)?;
    written += plain.len() as u64;

    Ok(written)
}

/// Fill `buf` as far as the reader allows, stopping only at EOF
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
