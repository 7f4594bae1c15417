//! Envelope header codec
//!
//! The persisted artifact is `salt(32) || nonce(16) || ciphertext`. The
//! header carries the public parameters needed to re-derive the key and
//! reconstruct the cipher; lengths are format constants, not length-prefixed.
//! There is no magic number or version byte.

use std::io::{ErrorKind, Read, Write};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::config::{NONCE_LEN, SALT_LEN};
use crate::error::{SealError, SealResult};

/// Total header length in bytes; any shorter file is not an envelope
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

/// The public parameters stored at the front of every envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Key-derivation salt, fresh per encryption
    pub salt: [u8; SALT_LEN],
    /// Cipher nonce, fresh per encryption
    pub nonce: [u8; NONCE_LEN],
}

impl Header {
    /// Generate a header with fresh randomness from the OS
    pub fn generate() -> Self {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut salt);
        OsRng.fill_bytes(&mut nonce);
        Self { salt, nonce }
    }

    /// Write the header: salt then nonce, in that fixed order
    pub fn write_to<W: Write>(&self, writer: &mut W) -> SealResult<()> {
        writer.write_all(&self.salt)?;
        writer.write_all(&self.nonce)?;
        Ok(())
    }

    /// Read a header, failing with a format error if the stream ends early
    ///
    /// Truncation here indicates a corrupt or foreign file, not a wrong
    /// password, so it must not be reported as an authentication failure.
    pub fn read_from<R: Read>(reader: &mut R) -> SealResult<Self> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        read_exact_or_format(reader, &mut salt)?;
        read_exact_or_format(reader, &mut nonce)?;
        Ok(Self { salt, nonce })
    }
}

fn read_exact_or_format<R: Read>(reader: &mut R, buf: &mut [u8]) -> SealResult<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            SealError::Format("file shorter than the envelope header".to_string())
        } else {
            SealError::Io(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_write_read_roundtrip() {
        let header = Header::generate();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);

        let parsed = Header::read_from(&mut Cursor::new(&buf)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_layout_is_salt_then_nonce() {
        let header = Header::generate();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        assert_eq!(&buf[..SALT_LEN], &header.salt);
        assert_eq!(&buf[SALT_LEN..], &header.nonce);
    }

    #[test]
    fn test_generate_is_random() {
        let a = Header::generate();
        let b = Header::generate();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.nonce, b.nonce);
    }

    #[test]
    fn test_truncated_header_is_format_error() {
        let short = vec![0u8; HEADER_LEN - 1];
        let err = Header::read_from(&mut Cursor::new(&short)).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_empty_input_is_format_error() {
        let err = Header::read_from(&mut Cursor::new(&[][..])).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_header_followed_by_payload_leaves_payload_unread() {
        let header = Header::generate();
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        buf.extend_from_slice(b"ciphertext");

        let mut cursor = Cursor::new(&buf);
        Header::read_from(&mut cursor).unwrap();
        let mut rest = Vec::new();
        cursor.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"ciphertext");
    }
}
