use std::fmt;
use zeroize::Zeroize;

/// A byte buffer that is wiped when dropped and never prints its contents.
///
/// Used for key material and other secrets that pass through the core
/// (spec.md §5: "key material buffers must be zeroized on destruction").
/// Plain `Vec<u8>` is fine for non-secret data (ciphertext, tags, params);
/// this wrapper marks the handful of places that carry raw key bytes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        SecretBytes(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        SecretBytes::new(bytes)
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes({} bytes, redacted)", self.0.len())
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_contents() {
        let secret = SecretBytes::new(vec![0xAA; 4]);
        assert_eq!(format!("{secret:?}"), "SecretBytes(4 bytes, redacted)");
    }

    #[test]
    fn into_inner_returns_the_bytes() {
        let secret = SecretBytes::new(vec![1, 2, 3]);
        assert_eq!(secret.into_inner(), vec![1, 2, 3]);
    }
}
