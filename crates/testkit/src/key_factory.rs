//! A toy [`KeyFactory`] for [`Algorithm::Aes`], backing the dispatcher test
//! suite. `generate_key` draws material from an RNG; `import_key` takes the
//! caller's raw bytes verbatim — both are plumbing exercises, not a
//! certified key-derivation function (spec.md §1: concrete cryptographic
//! primitives stay out of the core's scope).

use std::sync::Arc;

use keymint_core::key::Key;
use keymint_core::key_factory::GeneratedKey;
use keymint_core::{AuthorizationSet, KeyFactory, OperationFactory};
use keymint_types::tag::{TAG_ALGORITHM, TAG_OS_PATCHLEVEL};
use keymint_types::{Algorithm, KeyFormat, KeyParameter, Purpose, Result};
use rand::RngCore;

use crate::operation::ToyOperationFactory;

const DEFAULT_KEY_LEN: usize = 16;

pub struct ToyAesKeyFactory {
    os_patchlevel: u32,
}

impl ToyAesKeyFactory {
    pub fn new(os_patchlevel: u32) -> Self {
        ToyAesKeyFactory { os_patchlevel }
    }

    fn split_lists(&self, description: &AuthorizationSet) -> (AuthorizationSet, AuthorizationSet) {
        // Everything the caller asked for becomes hw_enforced in this
        // fixture (there is no real TEE to draw the hw/sw line); the
        // factory only adds the bookkeeping tags the core's own checks
        // (algorithm lookup, patchlevel comparison) depend on.
        let mut hw_enforced = description.clone();
        if !hw_enforced.contains_tag(TAG_ALGORITHM) {
            hw_enforced.push_back(KeyParameter::enum_value(TAG_ALGORITHM, 2));
        }
        if !hw_enforced.contains_tag(TAG_OS_PATCHLEVEL) {
            hw_enforced.push_back(KeyParameter::uint(TAG_OS_PATCHLEVEL, self.os_patchlevel));
        }
        (hw_enforced, AuthorizationSet::new())
    }
}

impl KeyFactory for ToyAesKeyFactory {
    fn generate_key(
        &self,
        description: &AuthorizationSet,
        _attest_key: Option<&Key>,
        _issuer_subject: Option<&[u8]>,
    ) -> Result<GeneratedKey> {
        let mut material = vec![0u8; DEFAULT_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut material);
        let (hw_enforced, sw_enforced) = self.split_lists(description);
        let blob = crate::blob_codec::encode(Algorithm::Aes, &material, &hw_enforced, &sw_enforced);
        Ok(GeneratedKey {
            blob,
            hw_enforced,
            sw_enforced,
            cert_chain: Vec::new(),
        })
    }

    fn import_key(
        &self,
        description: &AuthorizationSet,
        _key_format: KeyFormat,
        key_data: &[u8],
        _attest_key: Option<&Key>,
        _issuer_subject: Option<&[u8]>,
    ) -> Result<GeneratedKey> {
        let (hw_enforced, sw_enforced) = self.split_lists(description);
        let blob = crate::blob_codec::encode(Algorithm::Aes, key_data, &hw_enforced, &sw_enforced);
        Ok(GeneratedKey {
            blob,
            hw_enforced,
            sw_enforced,
            cert_chain: Vec::new(),
        })
    }

    fn supported_import_formats(&self) -> &[KeyFormat] {
        &[KeyFormat::Raw]
    }

    fn supported_export_formats(&self) -> &[KeyFormat] {
        &[KeyFormat::Raw]
    }

    fn operation_factory(&self, purpose: Purpose) -> Option<Arc<dyn OperationFactory>> {
        match purpose {
            Purpose::Encrypt | Purpose::Decrypt => {
                Some(Arc::new(ToyOperationFactory::new(purpose)))
            }
            _ => None,
        }
    }
}
