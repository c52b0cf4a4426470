//! The in-memory, parsed form of a key blob (spec.md §3: "Key (parsed)").

use std::sync::Arc;

use keymint_common::SecretBytes;
use keymint_types::tag::TAG_ALGORITHM;
use keymint_types::{Algorithm, ParamValue};

use crate::authorization::AuthorizationSet;
use crate::key_factory::KeyFactory;

/// A policy-scoped identifier derived from a key blob
/// (spec.md §4.6: `EnforcementPolicy::CreateKeyId`). Opaque to the core;
/// only `EnforcementPolicy`/`SecureKeyStorage` implementations interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyId(Vec<u8>);

impl KeyId {
    pub fn new(bytes: Vec<u8>) -> Self {
        KeyId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// A key reconstructed from a blob: material plus its two authorization
/// lists and a non-owning reference to the factory that parsed it.
///
/// The factory back-reference is `Arc` rather than a borrow: a `dyn
/// Context` trait object cannot hand out a lifetime-tied reference to one
/// of its own fields across the object-safe boundary the core relies on,
/// so ownership of the factory is shared instead of borrowed. The `Context`
/// remains the only place a factory is ever constructed or looked up by
/// algorithm; a `Key` never outlives the factory that could produce another
/// like it.
#[derive(Clone)]
pub struct Key {
    material: SecretBytes,
    hw_enforced: AuthorizationSet,
    sw_enforced: AuthorizationSet,
    factory: Arc<dyn KeyFactory>,
}

impl Key {
    pub fn new(
        material: impl Into<SecretBytes>,
        hw_enforced: AuthorizationSet,
        sw_enforced: AuthorizationSet,
        factory: Arc<dyn KeyFactory>,
    ) -> Self {
        Key {
            material: material.into(),
            hw_enforced,
            sw_enforced,
            factory,
        }
    }

    pub fn material(&self) -> &[u8] {
        self.material.as_slice()
    }

    pub fn hw_enforced(&self) -> &AuthorizationSet {
        &self.hw_enforced
    }

    pub fn sw_enforced(&self) -> &AuthorizationSet {
        &self.sw_enforced
    }

    pub fn factory(&self) -> &Arc<dyn KeyFactory> {
        &self.factory
    }

    /// `TAG_ALGORITHM`, checked hw_enforced first then sw_enforced
    /// (spec.md §4.9 Begin step 2: "Look up `TAG_ALGORITHM` on the key's
    /// authorizations").
    pub fn algorithm(&self) -> Option<Algorithm> {
        for set in [&self.hw_enforced, &self.sw_enforced] {
            if let Some(ParamValue::Enum(value)) = set.get_tag_value(TAG_ALGORITHM) {
                return algorithm_from_raw(*value);
            }
        }
        None
    }
}

/// Inverse of whatever encoding a `KeyFactory` used to store an `Algorithm`
/// as `TAG_ALGORITHM`'s `ParamValue::Enum`. Lives here, next to
/// `Key::algorithm`, the only caller, rather than in `keymint_types`, since
/// nothing else in the core needs to go from raw value back to `Algorithm`.
fn algorithm_from_raw(value: i32) -> Option<Algorithm> {
    match value {
        0 => Some(Algorithm::Rsa),
        1 => Some(Algorithm::Ec),
        2 => Some(Algorithm::Aes),
        3 => Some(Algorithm::TripleDes),
        4 => Some(Algorithm::Hmac),
        _ => None,
    }
}
