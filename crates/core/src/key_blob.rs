//! Opaque, Context-owned key material (spec.md §3: "KeyBlob").

use keymint_common::SecretBytes;

/// An opaque byte sequence produced by a `KeyFactory` and understood only
/// by the `Context` that produced it. The core never parses this itself —
/// it only carries it between `ParseKeyBlob`/`UpgradeKeyBlob` calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyBlob(Vec<u8>);

impl KeyBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        KeyBlob(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for KeyBlob {
    fn from(bytes: Vec<u8>) -> Self {
        KeyBlob::new(bytes)
    }
}

impl From<SecretBytes> for KeyBlob {
    fn from(secret: SecretBytes) -> Self {
        KeyBlob::new(secret.into_inner())
    }
}
