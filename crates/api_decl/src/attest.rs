//! `AttestKey` (spec.md §4.7, §6).

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttestKeyRequest {
    pub key_blob: KeyBlob,
    pub attest_params: AuthorizationSet,
    pub issuer_subject: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttestKeyResponse {
    pub certificate_chain: Vec<Vec<u8>>,
}
