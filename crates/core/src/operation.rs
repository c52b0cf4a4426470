//! The Begin/Update/Finish/Abort state machine per in-flight session
//! (spec.md §3: "Operation", §4.3, §4.9).

use keymint_types::{Purpose, Result};

use crate::authorization::AuthorizationSet;
use crate::key::KeyId;

/// A live cryptographic session. Constructed by an
/// [`OperationFactory`](crate::operation_factory::OperationFactory) from a
/// consumed [`Key`](crate::key::Key); owned exclusively by the
/// [`OperationTable`](crate::operation_table::OperationTable) once begun.
///
/// The operation handle itself is not part of this trait: it is assigned
/// and tracked by the table at insertion time (spec.md §4.4), not
/// self-reported by the operation, so every implementor is freed from
/// having to thread a handle through its own state.
pub trait Operation: Send {
    fn purpose(&self) -> Purpose;

    fn authorizations(&self) -> &AuthorizationSet;

    fn key_id(&self) -> Option<&KeyId>;

    fn set_key_id(&mut self, key_id: KeyId);

    fn begin(&mut self, params: &AuthorizationSet, out_params: &mut AuthorizationSet) -> Result<()>;

    /// Returns the number of bytes of `input` actually consumed. May be
    /// less than `input.len()` (spec.md §4.3: "the client is expected to
    /// re-feed the remainder on the next Update").
    fn update(
        &mut self,
        params: &AuthorizationSet,
        input: &[u8],
        out_params: &mut AuthorizationSet,
        output: &mut Vec<u8>,
    ) -> Result<usize>;

    fn finish(
        &mut self,
        params: &AuthorizationSet,
        input: &[u8],
        signature: &[u8],
        out_params: &mut AuthorizationSet,
        output: &mut Vec<u8>,
    ) -> Result<()>;

    fn abort(&mut self) -> Result<()>;
}
