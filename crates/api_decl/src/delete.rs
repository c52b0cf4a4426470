//! `DeleteKey` / `DeleteAllKeys` (spec.md §4.7, §6).

use keymint_core::key_blob::KeyBlob;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeleteKeyRequest {
    pub key_blob: KeyBlob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteKeyResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteAllKeysResponse;
