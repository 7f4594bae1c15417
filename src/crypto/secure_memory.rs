//! Secure handling of password material
//!
//! The passphrase lives in memory only as long as a single operation needs
//! it, and the buffer is zeroed when dropped.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password string that zeros its contents on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Passphrase {
    inner: String,
}

impl Passphrase {
    /// Wrap a password string
    pub fn new(s: impl Into<String>) -> Self {
        Self { inner: s.into() }
    }

    /// Get the password characters
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Check if the password is empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// Never print the contents in Debug output
impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase")
            .field("len", &self.inner.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passphrase_contents() {
        let p = Passphrase::new("hunter2");
        assert_eq!(p.as_str(), "hunter2");
        assert!(!p.is_empty());
    }

    #[test]
    fn test_empty_passphrase() {
        let p = Passphrase::from(String::new());
        assert!(p.is_empty());
    }

    #[test]
    fn test_debug_does_not_leak() {
        let p = Passphrase::from("hunter2");
        let debug = format!("{:?}", p);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("len"));
    }
}
