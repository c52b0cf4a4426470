//! `GenerateKey` / `ImportKey` / `ImportWrappedKey` (spec.md §4.7, §6).

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;
use keymint_types::KeyFormat;

use crate::key_characteristics::KeyCharacteristics;

/// An optional attestation key: the blob plus whatever extra params the
/// caller supplies for the attestation step
/// (spec.md §4.7 GenerateKey: "optionally load an attestation-signing key").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttestationKeyInfo {
    pub attest_key_blob: Option<KeyBlob>,
    pub attest_key_params: AuthorizationSet,
    pub issuer_subject: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateKeyRequest {
    pub key_description: AuthorizationSet,
    pub attestation_key: Option<AttestationKeyInfo>,
}

/// Shared shape of a successful key-creation response
/// (spec.md §4.2: "`GenerateKey(...) → (blob, hw_enforced, sw_enforced,
/// cert_chain)`", mirrored by `ImportKey`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateKeyResponse {
    pub key_blob: KeyBlob,
    pub characteristics: KeyCharacteristics,
    pub certificate_chain: Vec<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportKeyRequest {
    pub key_description: AuthorizationSet,
    pub key_format: KeyFormat,
    pub key_data: Vec<u8>,
    pub attestation_key: Option<AttestationKeyInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportKeyResponse {
    pub key_blob: KeyBlob,
    pub characteristics: KeyCharacteristics,
    pub certificate_chain: Vec<Vec<u8>>,
}

/// Authenticator-type bits the caller asserts for the unwrapped key's
/// `USER_SECURE_ID` rewrite (spec.md §4.7, §6:
/// `HardwareAuthenticatorType::{PASSWORD,FINGERPRINT}`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportWrappedKeyRequest {
    pub wrapped_key_data: KeyBlob,
    pub wrapping_key_blob: KeyBlob,
    pub masking_key: Vec<u8>,
    pub unwrapping_params: AuthorizationSet,
    pub password_sid: u64,
    pub biometric_sid: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportWrappedKeyResponse {
    pub key_blob: KeyBlob,
    pub characteristics: KeyCharacteristics,
    pub certificate_chain: Vec<Vec<u8>>,
}
