//! Auth-token enforcement, inter-TA HMAC establishment, and boot/lock
//! lifecycle (spec.md §4.6).

use keymint_types::{Purpose, Result};

use crate::authorization::AuthorizationSet;
use crate::key::KeyId;
use crate::key_blob::KeyBlob;

/// One party's contribution to the shared inter-service HMAC key
/// (spec.md §4.6: `GetHmacSharingParameters`). The seed/nonce encoding and
/// the HMAC derivation itself belong to the policy implementation — the
/// core only carries this value between peers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HmacSharingParameters {
    pub seed: Vec<u8>,
    pub nonce: [u8; 32],
}

/// Result of `ComputeSharedHmac`: a value every peer computes identically
/// iff they agree on the shared key, so mismatches are detectable without
/// revealing the key itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharingCheck {
    pub sharing_check: Vec<u8>,
}

/// A token binding a caller-chosen challenge to the policy's notion of
/// current time (spec.md §4.6: `GenerateTimestampToken`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampToken {
    pub challenge: u64,
    pub timestamp: u64,
    pub mac: Vec<u8>,
}

/// A caller-supplied auth token to verify (spec.md §4.6:
/// `VerifyAuthorization`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyAuthorizationRequest {
    pub challenge: u64,
    pub auth_token: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationResult {
    Ok,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyAuthorizationResponse {
    pub result: VerificationResult,
}

/// Per-operation authorization checks and service-wide auth/boot/lock
/// state. `None` at the `Context` seam (spec.md §4.5: "`enforcement_policy()`
/// ... either may be null, enabling unimplemented paths") degrades the
/// dispatcher gracefully rather than failing closed.
pub trait EnforcementPolicy: Send + Sync {
    /// Called with `is_begin = true, op_handle = 0` from `BeginOperation`,
    /// and with `is_begin = false` and the live handle from every
    /// `UpdateOperation`/`FinishOperation` (spec.md §4.6).
    fn authorize_operation(
        &self,
        purpose: Purpose,
        key_id: Option<&KeyId>,
        key_authorizations: &AuthorizationSet,
        op_params: &AuthorizationSet,
        op_handle: u64,
        is_begin: bool,
    ) -> Result<()>;

    /// Derives a stable, policy-scoped identifier for `blob`
    /// (spec.md §4.6: "`CreateKeyId(blob, &key_id)`").
    fn create_key_id(&self, blob: &KeyBlob) -> Result<KeyId>;

    fn get_hmac_sharing_parameters(&self) -> Result<HmacSharingParameters>;

    fn compute_shared_hmac(&self, params: &[HmacSharingParameters]) -> Result<SharingCheck>;

    fn verify_authorization(
        &self,
        request: VerifyAuthorizationRequest,
    ) -> Result<VerifyAuthorizationResponse>;

    fn generate_timestamp_token(&self, challenge: u64) -> Result<TimestampToken>;

    fn in_early_boot(&self) -> bool;

    /// Interior mutability is the implementor's concern: the dispatcher
    /// only ever holds `&dyn EnforcementPolicy` (spec.md §4.5 models the
    /// policy as a shared collaborator, not an owned, exclusively-borrowed
    /// one), so lifecycle transitions can't take `&mut self`.
    fn early_boot_ended(&self);

    fn device_locked(&self, password_only: bool);
}
