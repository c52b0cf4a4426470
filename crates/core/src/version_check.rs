//! The key-blob patchlevel monotonicity check (spec.md §4.8), applied
//! whenever a parsed `Key` is about to be used.

use keymint_config::{PatchlevelComparison, SystemVersion};
use keymint_types::tag::TAG_OS_PATCHLEVEL;
use keymint_types::{KmError, ParamValue, Result};

use crate::key::Key;

/// Reads `TAG_OS_PATCHLEVEL` from `key`'s hw_enforced list, falling back to
/// sw_enforced, and compares it against `system_version`
/// (spec.md §4.8: "Reads the first defined `OS_PATCHLEVEL` from
/// hw_enforced, else sw_enforced, else skips").
///
/// A key with no `OS_PATCHLEVEL` tag at all passes unconditionally — the
/// spec treats that as "skip", not as a failure.
pub fn check_key_version(key: &Key, system_version: SystemVersion) -> Result<()> {
    let patchlevel = [key.hw_enforced(), key.sw_enforced()]
        .into_iter()
        .find_map(|set| match set.get_tag_value(TAG_OS_PATCHLEVEL) {
            Some(ParamValue::UInt(value)) => Some(*value),
            _ => None,
        });

    let Some(patchlevel) = patchlevel else {
        return Ok(());
    };

    match system_version.compare_patchlevel(patchlevel) {
        PatchlevelComparison::Current => Ok(()),
        PatchlevelComparison::RequiresUpgrade => Err(KmError::KeyRequiresUpgrade),
        PatchlevelComparison::Invalid => Err(KmError::InvalidKeyBlob),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::AuthorizationSet;
    use crate::key::Key;
    use crate::key_factory::GeneratedKey;
    use crate::key_factory::KeyFactory;
    use crate::operation_factory::OperationFactory;
    use keymint_types::{KeyFormat, KeyParameter, Purpose};
    use std::sync::Arc;

    struct StubFactory;
    impl KeyFactory for StubFactory {
        fn generate_key(
            &self,
            _description: &AuthorizationSet,
            _attest_key: Option<&Key>,
            _issuer_subject: Option<&[u8]>,
        ) -> Result<GeneratedKey> {
            unimplemented!()
        }
        fn import_key(
            &self,
            _description: &AuthorizationSet,
            _key_format: KeyFormat,
            _key_data: &[u8],
            _attest_key: Option<&Key>,
            _issuer_subject: Option<&[u8]>,
        ) -> Result<GeneratedKey> {
            unimplemented!()
        }
        fn supported_import_formats(&self) -> &[KeyFormat] {
            &[]
        }
        fn supported_export_formats(&self) -> &[KeyFormat] {
            &[]
        }
        fn operation_factory(&self, _purpose: Purpose) -> Option<Arc<dyn OperationFactory>> {
            None
        }
    }

    fn key_with_patchlevel(patchlevel: u32) -> Key {
        let mut hw_enforced = AuthorizationSet::new();
        hw_enforced.push_back(KeyParameter::uint(TAG_OS_PATCHLEVEL, patchlevel));
        Key::new(
            Vec::new(),
            hw_enforced,
            AuthorizationSet::new(),
            Arc::new(StubFactory),
        )
    }

    #[test]
    fn equal_patchlevel_is_ok() {
        let key = key_with_patchlevel(100);
        assert!(check_key_version(&key, SystemVersion::new(1, 100)).is_ok());
    }

    #[test]
    fn older_patchlevel_requires_upgrade() {
        let key = key_with_patchlevel(99);
        assert_eq!(
            check_key_version(&key, SystemVersion::new(1, 100)),
            Err(KmError::KeyRequiresUpgrade)
        );
    }

    #[test]
    fn newer_patchlevel_is_invalid() {
        let key = key_with_patchlevel(101);
        assert_eq!(
            check_key_version(&key, SystemVersion::new(1, 100)),
            Err(KmError::InvalidKeyBlob)
        );
    }

    #[test]
    fn missing_patchlevel_tag_skips_the_check() {
        let key = Key::new(
            Vec::new(),
            AuthorizationSet::new(),
            AuthorizationSet::new(),
            Arc::new(StubFactory),
        );
        assert!(check_key_version(&key, SystemVersion::new(1, 100)).is_ok());
    }
}
