//! Contract with the trusted environment (spec.md §4.5).
//!
//! A `Context` is the root collaborator: it owns the set of installed
//! `KeyFactory`s, the (optional) `EnforcementPolicy` and `SecureKeyStorage`,
//! and the device's version/patchlevel state. The dispatcher is generic
//! over one concrete `Context` implementation rather than holding `dyn
//! Context`, so every call through it monomorphizes instead of paying a
//! second vtable indirection on top of the factory/policy trait objects it
//! already holds.

use std::sync::Arc;

use keymint_config::SystemVersion;
use keymint_types::{Algorithm, KeyFormat, KmVersion, Purpose, Result};

use crate::authorization::AuthorizationSet;
use crate::key::Key;
use crate::key_blob::KeyBlob;
use crate::key_factory::KeyFactory;
use crate::operation_factory::OperationFactory;
use crate::policy::EnforcementPolicy;
use crate::secure_storage::SecureKeyStorage;

/// The description, wire format, and raw key bytes recovered from an
/// `ImportWrappedKey` unwrap step (spec.md §4.5: "`UnwrapKey(wrapped,
/// wrapping_key, aad, masking_key) → (key_description, key_format,
/// secret_key)`").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnwrappedKeyDescription {
    pub key_description: AuthorizationSet,
    pub key_format: KeyFormat,
    pub secret_key: Vec<u8>,
}

/// The trusted environment a dispatcher runs against.
pub trait Context: Send + Sync {
    fn km_version(&self) -> KmVersion;

    fn system_version(&self) -> SystemVersion;

    /// Applies a new system version/patchlevel. Implementations may refuse
    /// a change once a version has already been configured
    /// (spec.md §4.7 Configure: "Once set, subsequent changes may be
    /// rejected per Context policy").
    fn set_system_version(&self, version: SystemVersion) -> Result<()>;

    fn supported_algorithms(&self) -> &[Algorithm];

    fn key_factory(&self, algorithm: Algorithm) -> Option<Arc<dyn KeyFactory>>;

    fn operation_factory(
        &self,
        algorithm: Algorithm,
        purpose: Purpose,
    ) -> Option<Arc<dyn OperationFactory>> {
        self.key_factory(algorithm)?.operation_factory(purpose)
    }

    fn parse_key_blob(&self, blob: &KeyBlob, additional_params: &AuthorizationSet) -> Result<Key>;

    fn upgrade_key_blob(&self, blob: &KeyBlob, upgrade_params: &AuthorizationSet) -> Result<KeyBlob>;

    fn delete_key(&self, blob: &KeyBlob) -> Result<()>;

    fn delete_all_keys(&self) -> Result<()>;

    fn add_rng_entropy(&self, bytes: &[u8]) -> Result<()>;

    fn generate_attestation(
        &self,
        key: &Key,
        params: &AuthorizationSet,
        signing_key: Option<&Key>,
        issuer_subject: Option<&[u8]>,
    ) -> Result<Vec<Vec<u8>>>;

    /// `aad` is the caller's additional (unencrypted) params the unwrap step
    /// authenticates against — `ImportWrappedKeyRequest::unwrapping_params`
    /// verbatim, never folded into the returned `key_description`
    /// (spec.md §4.5: "`UnwrapKey(wrapped, wrapping_key, aad, masking_key)`").
    fn unwrap_key(
        &self,
        wrapped: &KeyBlob,
        wrapping_key: &Key,
        aad: &AuthorizationSet,
        masking_key: &[u8],
    ) -> Result<UnwrappedKeyDescription>;

    /// `None` disables HMAC sharing, timestamp tokens, auth-token
    /// verification, and per-operation authorization checks
    /// (spec.md §4.5, §7: "A null policy degrades gracefully").
    fn enforcement_policy(&self) -> Option<&dyn EnforcementPolicy>;

    /// `None` disables the single-use `DeleteKey` step in `FinishOperation`
    /// (spec.md §4.9 Finish step 4).
    fn secure_key_storage(&self) -> Option<&dyn SecureKeyStorage>;
}
