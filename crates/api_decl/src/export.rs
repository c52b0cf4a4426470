//! `ExportKey` (spec.md §4.7, §6).

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;
use keymint_types::KeyFormat;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportKeyRequest {
    pub key_format: KeyFormat,
    pub key_blob: KeyBlob,
    pub additional_params: AuthorizationSet,
}

/// Ownership of `exported_keymaterial` transfers to the caller
/// (spec.md §4.7: "ownership of the returned bytes transfers to the
/// response").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportKeyResponse {
    pub exported_keymaterial: Vec<u8>,
}
