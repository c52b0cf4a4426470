//! Secure persistence for the single-use-key deletion contract
//! (spec.md §4.9 Finish step 4, §8 invariant 6).

use keymint_types::Result;

use crate::key::KeyId;

/// Deletes key material by its policy-scoped id. Distinct from
/// `Context::delete_key`/`delete_all_keys`, which operate on blobs the
/// dispatcher's `DeleteKey`/`DeleteAllKeys` entry points receive directly;
/// this trait exists only for the internal single-use contract in
/// `FinishOperation` (spec.md §4.9: "`DeleteKey(operation.key_id)`").
pub trait SecureKeyStorage: Send + Sync {
    fn delete_key(&self, key_id: &KeyId) -> Result<()>;
}
