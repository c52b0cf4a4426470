//! `UpgradeKey` (spec.md §4.7, §6).

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpgradeKeyRequest {
    pub key_blob_to_upgrade: KeyBlob,
    pub upgrade_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpgradeKeyResponse {
    pub upgraded_key_blob: KeyBlob,
}
