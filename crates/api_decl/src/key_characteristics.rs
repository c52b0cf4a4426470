//! `GetKeyCharacteristics` (spec.md §4.7, §6), and the `KeyCharacteristics`
//! shape shared with `GenerateKey`/`ImportKey`/`ImportWrappedKey` responses.

use keymint_core::key_blob::KeyBlob;
use keymint_core::AuthorizationSet;

/// The two authorization lists "scavenged" out of a key
/// (spec.md §4.7: "parse blob and scavenge hw/sw-enforced lists into the
/// response").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyCharacteristics {
    pub hw_enforced: AuthorizationSet,
    pub sw_enforced: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetKeyCharacteristicsRequest {
    pub key_blob: KeyBlob,
    pub additional_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetKeyCharacteristicsResponse {
    pub characteristics: KeyCharacteristics,
}
