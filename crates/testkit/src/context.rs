//! An in-process, in-memory [`Context`] for exercising the dispatcher
//! without a real trusted-execution environment: one [`ToyAesKeyFactory`],
//! an optional [`EnforcementPolicy`], and no secure blob encryption (see
//! [`crate::blob_codec`]). Modeled on the teacher's `InMemoryNode` as "the
//! concrete object the server crate's tests drive", not as a production
//! `Context` implementation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use keymint_core::context::UnwrappedKeyDescription;
use keymint_core::key::Key;
use keymint_core::key_blob::KeyBlob;
use keymint_core::{AuthorizationSet, Context, EnforcementPolicy, KeyFactory, SecureKeyStorage};
use keymint_config::SystemVersion;
use keymint_types::{Algorithm, KmError, KmVersion, Purpose, Result};
use tracing::debug;

use crate::key_factory::ToyAesKeyFactory;

/// Builder + fixture for the dispatcher test suite.
pub struct InMemoryContext {
    km_version: KmVersion,
    system_version: Mutex<SystemVersion>,
    system_version_locked: Mutex<bool>,
    algorithms: Vec<Algorithm>,
    factories: HashMap<Algorithm, Arc<dyn KeyFactory>>,
    policy: Option<Arc<dyn EnforcementPolicy>>,
    rng_entropy: Mutex<Vec<u8>>,
    deleted_blobs: Mutex<Vec<Vec<u8>>>,
    all_keys_deleted: Mutex<bool>,
}

impl InMemoryContext {
    /// A context with a single `ToyAesKeyFactory` and no installed policy
    /// (spec.md §4.5, §7: "A null policy degrades gracefully").
    pub fn new(system_version: SystemVersion) -> Self {
        let factory: Arc<dyn KeyFactory> = Arc::new(ToyAesKeyFactory::new(system_version.os_patchlevel));
        let mut factories: HashMap<Algorithm, Arc<dyn KeyFactory>> = HashMap::new();
        factories.insert(Algorithm::Aes, factory);
        InMemoryContext {
            km_version: KmVersion::KeyMint1,
            system_version: Mutex::new(system_version),
            system_version_locked: Mutex::new(false),
            algorithms: vec![Algorithm::Aes],
            factories,
            policy: None,
            rng_entropy: Mutex::new(Vec::new()),
            deleted_blobs: Mutex::new(Vec::new()),
            all_keys_deleted: Mutex::new(false),
        }
    }

    pub fn with_policy(mut self, policy: Arc<dyn EnforcementPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_km_version(mut self, km_version: KmVersion) -> Self {
        self.km_version = km_version;
        self
    }

    /// Bytes the dispatcher has forwarded via `AddRngEntropy`, for
    /// assertions in tests (spec.md §5: "RNG entropy additions are
    /// append-only and commute").
    pub fn rng_entropy_log(&self) -> Vec<u8> {
        self.rng_entropy.lock().unwrap().clone()
    }
}

impl Context for InMemoryContext {
    fn km_version(&self) -> KmVersion {
        self.km_version
    }

    fn system_version(&self) -> SystemVersion {
        *self.system_version.lock().unwrap()
    }

    fn set_system_version(&self, version: SystemVersion) -> Result<()> {
        let mut locked = self.system_version_locked.lock().unwrap();
        if *locked {
            debug!(?version, "rejecting system version change: already configured");
            return Err(KmError::InvalidArgument);
        }
        *self.system_version.lock().unwrap() = version;
        *locked = true;
        Ok(())
    }

    fn supported_algorithms(&self) -> &[Algorithm] {
        &self.algorithms
    }

    fn key_factory(&self, algorithm: Algorithm) -> Option<Arc<dyn KeyFactory>> {
        self.factories.get(&algorithm).cloned()
    }

    fn parse_key_blob(&self, blob: &KeyBlob, _additional_params: &AuthorizationSet) -> Result<Key> {
        if *self.all_keys_deleted.lock().unwrap()
            || self.deleted_blobs.lock().unwrap().iter().any(|b| b == blob.as_bytes())
        {
            return Err(KmError::InvalidKeyBlob);
        }
        let decoded = crate::blob_codec::decode(blob).ok_or(KmError::InvalidKeyBlob)?;
        let factory = self
            .key_factory(decoded.algorithm)
            .ok_or(KmError::UnsupportedAlgorithm)?;
        Ok(Key::new(
            decoded.material,
            decoded.hw_enforced,
            decoded.sw_enforced,
            factory,
        ))
    }

    fn upgrade_key_blob(&self, blob: &KeyBlob, _upgrade_params: &AuthorizationSet) -> Result<KeyBlob> {
        let mut decoded = crate::blob_codec::decode(blob).ok_or(KmError::InvalidKeyBlob)?;
        let new_patchlevel = self.system_version().os_patchlevel;
        if let Some(index) = decoded.hw_enforced.find(keymint_types::tag::TAG_OS_PATCHLEVEL) {
            decoded.hw_enforced.erase(index);
        }
        decoded.hw_enforced.push_back(keymint_types::KeyParameter::uint(
            keymint_types::tag::TAG_OS_PATCHLEVEL,
            new_patchlevel,
        ));
        Ok(crate::blob_codec::encode(
            decoded.algorithm,
            &decoded.material,
            &decoded.hw_enforced,
            &decoded.sw_enforced,
        ))
    }

    fn delete_key(&self, blob: &KeyBlob) -> Result<()> {
        self.deleted_blobs.lock().unwrap().push(blob.as_bytes().to_vec());
        Ok(())
    }

    fn delete_all_keys(&self) -> Result<()> {
        *self.all_keys_deleted.lock().unwrap() = true;
        Ok(())
    }

    fn add_rng_entropy(&self, bytes: &[u8]) -> Result<()> {
        self.rng_entropy.lock().unwrap().extend_from_slice(bytes);
        Ok(())
    }

    fn generate_attestation(
        &self,
        key: &Key,
        _params: &AuthorizationSet,
        _signing_key: Option<&Key>,
        _issuer_subject: Option<&[u8]>,
    ) -> Result<Vec<Vec<u8>>> {
        let mut leaf = vec![0xCE, 0xAA];
        leaf.extend_from_slice(key.material());
        Ok(vec![leaf])
    }

    fn unwrap_key(
        &self,
        wrapped: &KeyBlob,
        _wrapping_key: &Key,
        _aad: &AuthorizationSet,
        _masking_key: &[u8],
    ) -> Result<UnwrappedKeyDescription> {
        let decoded = crate::blob_codec::decode_wrapped(wrapped).ok_or(KmError::InvalidKeyBlob)?;
        Ok(UnwrappedKeyDescription {
            key_description: decoded.key_description,
            key_format: decoded.key_format,
            secret_key: decoded.secret_key,
        })
    }

    fn enforcement_policy(&self) -> Option<&dyn EnforcementPolicy> {
        self.policy.as_deref()
    }

    fn secure_key_storage(&self) -> Option<&dyn SecureKeyStorage> {
        Some(self)
    }
}

impl SecureKeyStorage for InMemoryContext {
    fn delete_key(&self, key_id: &keymint_core::key::KeyId) -> Result<()> {
        self.deleted_blobs.lock().unwrap().push(key_id.as_bytes().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_set_system_version_is_rejected() {
        let ctx = InMemoryContext::new(SystemVersion::new(1, 100));
        assert!(ctx.set_system_version(SystemVersion::new(1, 101)).is_ok());
        assert!(ctx.set_system_version(SystemVersion::new(1, 102)).is_err());
    }

    #[test]
    fn deleted_blob_cannot_be_reparsed() {
        let ctx = InMemoryContext::new(SystemVersion::new(1, 100));
        let factory = ctx.key_factory(Algorithm::Aes).unwrap();
        let description = AuthorizationSet::new();
        let generated = factory.generate_key(&description, None, None).unwrap();
        Context::delete_key(&ctx, &generated.blob).unwrap();
        assert_eq!(
            ctx.parse_key_blob(&generated.blob, &AuthorizationSet::new()),
            Err(KmError::InvalidKeyBlob)
        );
    }
}
