//! `GenerateKey` / `ImportKey` / `ImportWrappedKey` (spec.md §4.7).

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;
use keymint_types::tag::{
    TAG_CERTIFICATE_NOT_AFTER, TAG_CERTIFICATE_NOT_BEFORE, TAG_USER_SECURE_ID,
};
use keymint_types::{HardwareAuthenticatorType, KeyParameter, KmError, KmVersion, Result};
use tracing::warn;

use keymint_api_decl::{
    AttestationKeyInfo, GenerateKeyRequest, GenerateKeyResponse, ImportKeyRequest,
    ImportKeyResponse, ImportWrappedKeyRequest, ImportWrappedKeyResponse, KeyCharacteristics,
};

use super::Dispatcher;
use keymint_core::Context;

impl<C: Context> Dispatcher<C> {
    /// spec.md §4.7 GenerateKey: resolves the factory, rejects early-boot
    /// keys once boot has ended, optionally loads an attestation-signing
    /// key, then delegates.
    pub fn generate_key(&self, request: GenerateKeyRequest) -> Result<GenerateKeyResponse> {
        let algorithm = request
            .key_description
            .get_tag_value(keymint_types::tag::TAG_ALGORITHM)
            .and_then(|value| match value {
                keymint_types::ParamValue::Enum(raw) => algorithm_from_raw(*raw),
                _ => None,
            })
            .ok_or(KmError::UnsupportedAlgorithm)?;
        let factory = self.key_factory(algorithm)?;

        if request
            .key_description
            .contains_tag(keymint_types::tag::TAG_EARLY_BOOT_ONLY)
        {
            if let Some(policy) = self.context().enforcement_policy() {
                if !policy.in_early_boot() {
                    return Err(KmError::EarlyBootEnded);
                }
            }
        }

        let (attest_key, issuer_subject) = self.resolve_attestation_key(&request.attestation_key)?;

        let generated = factory.generate_key(
            &request.key_description,
            attest_key.as_ref(),
            issuer_subject.as_deref(),
        )?;
        Ok(GenerateKeyResponse {
            key_blob: generated.blob,
            characteristics: KeyCharacteristics {
                hw_enforced: generated.hw_enforced,
                sw_enforced: generated.sw_enforced,
            },
            certificate_chain: generated.cert_chain,
        })
    }

    pub fn import_key(&self, request: ImportKeyRequest) -> Result<ImportKeyResponse> {
        let algorithm = request
            .key_description
            .get_tag_value(keymint_types::tag::TAG_ALGORITHM)
            .and_then(|value| match value {
                keymint_types::ParamValue::Enum(raw) => algorithm_from_raw(*raw),
                _ => None,
            })
            .ok_or(KmError::UnsupportedAlgorithm)?;
        let factory = self.key_factory(algorithm)?;
        let (attest_key, issuer_subject) = self.resolve_attestation_key(&request.attestation_key)?;

        let generated = factory.import_key(
            &request.key_description,
            request.key_format,
            &request.key_data,
            attest_key.as_ref(),
            issuer_subject.as_deref(),
        )?;
        Ok(ImportKeyResponse {
            key_blob: generated.blob,
            characteristics: KeyCharacteristics {
                hw_enforced: generated.hw_enforced,
                sw_enforced: generated.sw_enforced,
            },
            certificate_chain: generated.cert_chain,
        })
    }

    /// spec.md §4.7 ImportWrappedKey: unwraps first; if the unwrapped
    /// description carries a `USER_SECURE_ID` mask, rewrites it into
    /// caller-supplied sid values and, on KeyMint 1+, also adds certificate
    /// validity tags (both gated on that same mask being present); then
    /// delegates to `ImportKey`.
    pub fn import_wrapped_key(
        &self,
        request: ImportWrappedKeyRequest,
    ) -> Result<ImportWrappedKeyResponse> {
        let wrapping_key = self.load_key(&request.wrapping_key_blob, &AuthorizationSet::new())?;
        let unwrapped = self.context().unwrap_key(
            &request.wrapped_key_data,
            &wrapping_key,
            &request.unwrapping_params,
            &request.masking_key,
        )?;

        let mut description = unwrapped.key_description;
        let had_secure_id =
            rewrite_secure_ids(&mut description, request.password_sid, request.biometric_sid);

        // Both the SID rewrite and the certificate-validity tags are gated
        // on the same "a USER_SECURE_ID was present" condition
        // (`original_source/android_keymaster.cpp`'s `if (sid_idx != -1)`
        // block covers both; spec.md §4.7 nests the km_version check inside
        // the same clause).
        if had_secure_id && self.context().km_version() >= KmVersion::KeyMint1 {
            description.push_back(KeyParameter::date(TAG_CERTIFICATE_NOT_BEFORE, 0));
            description.push_back(KeyParameter::date(
                TAG_CERTIFICATE_NOT_AFTER,
                keymint_types::UNDEFINED_EXPIRATION_DATE_TIME,
            ));
        }

        let algorithm = description
            .get_tag_value(keymint_types::tag::TAG_ALGORITHM)
            .and_then(|value| match value {
                keymint_types::ParamValue::Enum(raw) => algorithm_from_raw(*raw),
                _ => None,
            })
            .ok_or(KmError::UnsupportedAlgorithm)?;
        let factory = self.key_factory(algorithm)?;
        let generated = factory.import_key(
            &description,
            unwrapped.key_format,
            &unwrapped.secret_key,
            None,
            None,
        )?;
        Ok(ImportWrappedKeyResponse {
            key_blob: generated.blob,
            characteristics: KeyCharacteristics {
                hw_enforced: generated.hw_enforced,
                sw_enforced: generated.sw_enforced,
            },
            certificate_chain: generated.cert_chain,
        })
    }

    fn resolve_attestation_key(
        &self,
        info: &Option<AttestationKeyInfo>,
    ) -> Result<(Option<keymint_core::key::Key>, Option<Vec<u8>>)> {
        match info {
            None => Ok((None, None)),
            Some(info) => {
                let key = match &info.attest_key_blob {
                    Some(blob) => Some(self.load_key(blob, &info.attest_key_params)?),
                    None => None,
                };
                Ok((key, info.issuer_subject.clone()))
            }
        }
    }
}

fn algorithm_from_raw(value: i32) -> Option<keymint_types::Algorithm> {
    use keymint_types::Algorithm::*;
    match value {
        0 => Some(Rsa),
        1 => Some(Ec),
        2 => Some(Aes),
        3 => Some(TripleDes),
        4 => Some(Hmac),
        _ => None,
    }
}

/// spec.md §4.7, §6, §8 invariant 7: erase any existing `USER_SECURE_ID`
/// entries and re-add one per asserted authenticator type, in
/// password-then-fingerprint order, from the low byte of the unwrapped
/// description's authenticator-type mask. Returns whether a mask was found
/// at all — the caller uses this to gate the certificate-validity tags on
/// the same "a USER_SECURE_ID was present" condition
/// (`original_source/android_keymaster.cpp`'s `if (sid_idx != -1)`).
fn rewrite_secure_ids(description: &mut AuthorizationSet, password_sid: u64, biometric_sid: u64) -> bool {
    let Some(mask) = read_authenticator_mask(description) else {
        return false;
    };
    while let Some(index) = description.find(TAG_USER_SECURE_ID) {
        description.erase(index);
    }
    if mask & HardwareAuthenticatorType::PASSWORD != 0 {
        description.push_back(KeyParameter::ulong(TAG_USER_SECURE_ID, password_sid));
    }
    if mask & HardwareAuthenticatorType::FINGERPRINT != 0 {
        description.push_back(KeyParameter::ulong(TAG_USER_SECURE_ID, biometric_sid));
    }
    true
}

/// The unwrapped description carries the authenticator-type bitmask as the
/// (single, pre-rewrite) `USER_SECURE_ID` value's low byte
/// (spec.md §6: "read a *bitmask* of authenticator types").
fn read_authenticator_mask(description: &AuthorizationSet) -> Option<u8> {
    match description.get_tag_value(TAG_USER_SECURE_ID) {
        Some(keymint_types::ParamValue::ULong(value)) => Some(*value as u8),
        _ => {
            warn!("ImportWrappedKey description has no USER_SECURE_ID mask; skipping SID rewrite");
            None
        }
    }
}
