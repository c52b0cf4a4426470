//! Algorithm×purpose-specific operation construction (spec.md §4.3).

use keymint_types::{BlockMode, Digest, PaddingMode, Result};

use crate::authorization::AuthorizationSet;
use crate::key::Key;
use crate::operation::Operation;

/// Constructs [`Operation`]s for one (algorithm, purpose) pair.
pub trait OperationFactory: Send + Sync {
    fn supported_block_modes(&self) -> &[BlockMode];

    fn supported_padding_modes(&self) -> &[PaddingMode];

    fn supported_digests(&self) -> &[Digest];

    /// Consumes `key` by value (spec.md §9: "Keys move into Operations") and
    /// builds an `Operation`, or rejects `params` with an error.
    fn create_operation(
        &self,
        key: Key,
        params: &AuthorizationSet,
    ) -> Result<Box<dyn Operation>>;
}
