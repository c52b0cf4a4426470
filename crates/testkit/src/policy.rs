//! A toy [`EnforcementPolicy`]: early-boot/lock lifecycle tracked with
//! atomics, auth-token verification that accepts any non-empty token, and
//! an HMAC-sharing/timestamp-token path that returns fixed, deterministic
//! bytes. None of this is cryptographically meaningful — it exists so the
//! dispatcher's policy-gated branches (spec.md §4.9 Begin/Update/Finish
//! step 2, §4.7 EarlyBootEnded/DeviceLocked) have something to call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use keymint_core::key::KeyId;
use keymint_core::key_blob::KeyBlob;
use keymint_core::policy::{
    HmacSharingParameters, SharingCheck, TimestampToken, VerificationResult,
    VerifyAuthorizationRequest, VerifyAuthorizationResponse,
};
use keymint_core::{AuthorizationSet, EnforcementPolicy};
use keymint_types::{KmError, Purpose, Result};

/// Fixture policy. `in_early_boot` starts `true`; `EarlyBootEnded` flips it
/// permanently (spec.md glossary: "Early boot ... phase between power-on
/// and the `EarlyBootEnded` signal").
pub struct InMemoryPolicy {
    early_boot: AtomicBool,
    locked: AtomicBool,
    locked_password_only: AtomicBool,
    authorize_result: Mutex<Result<()>>,
}

impl Default for InMemoryPolicy {
    fn default() -> Self {
        InMemoryPolicy {
            early_boot: AtomicBool::new(true),
            locked: AtomicBool::new(false),
            locked_password_only: AtomicBool::new(false),
            authorize_result: Mutex::new(Ok(())),
        }
    }
}

impl InMemoryPolicy {
    pub fn new() -> Self {
        InMemoryPolicy::default()
    }

    /// Forces every subsequent `authorize_operation` call to return `result`
    /// — used by tests that exercise the error-evicts invariant
    /// (spec.md §8 invariant 2) without needing a real auth-token mismatch.
    pub fn set_authorize_result(&self, result: Result<()>) {
        *self.authorize_result.lock().unwrap() = result;
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }
}

impl EnforcementPolicy for InMemoryPolicy {
    fn authorize_operation(
        &self,
        _purpose: Purpose,
        _key_id: Option<&KeyId>,
        _key_authorizations: &AuthorizationSet,
        _op_params: &AuthorizationSet,
        _op_handle: u64,
        _is_begin: bool,
    ) -> Result<()> {
        self.authorize_result.lock().unwrap().clone()
    }

    fn create_key_id(&self, blob: &KeyBlob) -> Result<KeyId> {
        Ok(KeyId::new(blob.as_bytes().to_vec()))
    }

    fn get_hmac_sharing_parameters(&self) -> Result<HmacSharingParameters> {
        Ok(HmacSharingParameters {
            seed: vec![0u8; 32],
            nonce: [0u8; 32],
        })
    }

    fn compute_shared_hmac(&self, params: &[HmacSharingParameters]) -> Result<SharingCheck> {
        if params.is_empty() {
            return Err(KmError::InvalidArgument);
        }
        Ok(SharingCheck {
            sharing_check: vec![params.len() as u8; 32],
        })
    }

    fn verify_authorization(
        &self,
        request: VerifyAuthorizationRequest,
    ) -> Result<VerifyAuthorizationResponse> {
        let result = if request.auth_token.is_empty() {
            VerificationResult::Failed
        } else {
            VerificationResult::Ok
        };
        Ok(VerifyAuthorizationResponse { result })
    }

    fn generate_timestamp_token(&self, challenge: u64) -> Result<TimestampToken> {
        Ok(TimestampToken {
            challenge,
            timestamp: 0,
            mac: vec![0u8; 32],
        })
    }

    fn in_early_boot(&self) -> bool {
        self.early_boot.load(Ordering::SeqCst)
    }

    fn early_boot_ended(&self) {
        self.early_boot.store(false, Ordering::SeqCst);
    }

    fn device_locked(&self, password_only: bool) {
        self.locked.store(true, Ordering::SeqCst);
        self.locked_password_only.store(password_only, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn early_boot_ended_flips_permanently() {
        let policy = InMemoryPolicy::new();
        assert!(policy.in_early_boot());
        policy.early_boot_ended();
        assert!(!policy.in_early_boot());
    }

    #[test]
    fn empty_auth_token_fails_verification() {
        let policy = InMemoryPolicy::new();
        let response = policy
            .verify_authorization(VerifyAuthorizationRequest {
                challenge: 1,
                auth_token: Vec::new(),
            })
            .unwrap();
        assert_eq!(response.result, VerificationResult::Failed);
    }
}
