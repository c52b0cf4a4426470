//! Bounded handle→Operation registry (spec.md §3, §4.4).

use indexmap::IndexMap;
use keymint_types::{KmError, Result};
use tracing::{trace, warn};

use crate::key::KeyId;
use crate::operation::Operation;

/// A 64-bit opaque identifier for a live operation. Zero is reserved as
/// "invalid" and is never assigned (spec.md §3: "Zero is reserved as
/// invalid").
pub type OperationHandle = u64;

/// One live entry: the handle it was assigned, the policy-scoped key id it
/// was begun with (if any), and the operation itself.
///
/// The handle is tracked here rather than on `Operation` — assigning and
/// owning handles is the table's job, so implementors of `Operation` never
/// need to reason about their own identity in the table.
pub struct OperationEntry {
    pub handle: OperationHandle,
    pub key_id: Option<KeyId>,
    pub operation: Box<dyn Operation>,
}

/// A bounded registry of in-flight operations, keyed by handle, evicting
/// least-recently-touched entries once full (spec.md §9 open question,
/// resolved as LRU: "LRU is a reasonable choice consistent with comments").
///
/// Not internally synchronized: the spec models a single shared mutable
/// table (spec.md §5), so callers serving concurrent requests wrap an
/// instance in a mutex rather than this type managing its own locking.
pub struct OperationTable {
    capacity: usize,
    entries: IndexMap<OperationHandle, OperationEntry>,
}

impl OperationTable {
    pub fn new(capacity: usize) -> Self {
        OperationTable {
            capacity: capacity.max(1),
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draws a fresh, unassigned, nonzero handle from the RNG
    /// (spec.md §9: "Handles must be drawn from the same RNG ... the
    /// implementation must not fall back to a counter").
    fn fresh_handle(&self) -> OperationHandle {
        loop {
            let handle: OperationHandle = rand::random();
            if handle != 0 && !self.entries.contains_key(&handle) {
                return handle;
            }
        }
    }

    /// Installs `operation` under a fresh handle, evicting the
    /// least-recently-touched entry first if the table is full
    /// (spec.md §4.4: "the *oldest* operation ... is Aborted and evicted
    /// first; Add then succeeds").
    ///
    /// Handle collision, which spec.md §4.4 asks to be reported as
    /// `UNKNOWN_ERROR`, cannot occur here: `fresh_handle` retries until it
    /// draws an unassigned one, so the condition is structurally
    /// eliminated rather than surfaced as an error path.
    pub fn add(&mut self, key_id: Option<KeyId>, operation: Box<dyn Operation>) -> Result<OperationHandle> {
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        let handle = self.fresh_handle();
        self.entries.insert(
            handle,
            OperationEntry {
                handle,
                key_id,
                operation,
            },
        );
        Ok(handle)
    }

    fn evict_oldest(&mut self) {
        if let Some((_, mut entry)) = self.entries.shift_remove_index(0) {
            warn!(handle = entry.handle, "operation table full, evicting oldest entry");
            if let Err(err) = entry.operation.abort() {
                trace!(handle = entry.handle, ?err, "abort on evicted operation returned an error");
            }
        }
    }

    /// Looks up `handle`, touching it (moving it to the most-recently-used
    /// end) on success so capacity eviction targets genuinely idle entries.
    pub fn find_mut(&mut self, handle: OperationHandle) -> Option<&mut OperationEntry> {
        let index = self.entries.get_index_of(&handle)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_mut(&handle)
    }

    /// Idempotent removal; never calls `abort` (spec.md §4.4: "does not
    /// call Abort — caller is already terminating the op").
    pub fn delete(&mut self, handle: OperationHandle) -> Option<OperationEntry> {
        self.entries.shift_remove(&handle)
    }

    /// Evicts `handle` after a failed Update/Finish (spec.md §4.9,
    /// §8 invariant 2: "Error-evicts"). Identical to `delete`, named
    /// separately so call sites read like the spec's own vocabulary.
    pub fn evict(&mut self, handle: OperationHandle) {
        self.entries.shift_remove(&handle);
    }
}

/// Sentinel error for a handle absent from the table
/// (spec.md §6: `INVALID_OPERATION_HANDLE`).
pub fn invalid_handle_error() -> KmError {
    KmError::InvalidOperationHandle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authorization::AuthorizationSet;
    use crate::key::KeyId;
    use keymint_types::Purpose;

    struct NoopOperation {
        aborted: bool,
        authorizations: AuthorizationSet,
    }

    impl Operation for NoopOperation {
        fn purpose(&self) -> Purpose {
            Purpose::Encrypt
        }

        fn authorizations(&self) -> &AuthorizationSet {
            &self.authorizations
        }

        fn key_id(&self) -> Option<&KeyId> {
            None
        }

        fn set_key_id(&mut self, _key_id: KeyId) {}

        fn begin(
            &mut self,
            _params: &AuthorizationSet,
            _out_params: &mut AuthorizationSet,
        ) -> Result<()> {
            Ok(())
        }

        fn update(
            &mut self,
            _params: &AuthorizationSet,
            input: &[u8],
            _out_params: &mut AuthorizationSet,
            _output: &mut Vec<u8>,
        ) -> Result<usize> {
            Ok(input.len())
        }

        fn finish(
            &mut self,
            _params: &AuthorizationSet,
            _input: &[u8],
            _signature: &[u8],
            _out_params: &mut AuthorizationSet,
            _output: &mut Vec<u8>,
        ) -> Result<()> {
            Ok(())
        }

        fn abort(&mut self) -> Result<()> {
            self.aborted = true;
            Ok(())
        }
    }

    fn op() -> Box<dyn Operation> {
        Box::new(NoopOperation {
            aborted: false,
            authorizations: AuthorizationSet::new(),
        })
    }

    #[test]
    fn handles_are_nonzero_and_unique() {
        let mut table = OperationTable::new(4);
        let a = table.add(None, op()).unwrap();
        let b = table.add(None, op()).unwrap();
        assert_ne!(a, 0);
        assert_ne!(b, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn delete_does_not_invoke_abort() {
        let mut table = OperationTable::new(4);
        let handle = table.add(None, op()).unwrap();
        table.delete(handle);
        assert!(table.find_mut(handle).is_none());
    }

    #[test]
    fn capacity_eviction_removes_the_oldest_entry() {
        let mut table = OperationTable::new(2);
        let first = table.add(None, op()).unwrap();
        let _second = table.add(None, op()).unwrap();
        let _third = table.add(None, op()).unwrap();
        assert!(table.find_mut(first).is_none());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn touching_an_entry_protects_it_from_the_next_eviction() {
        let mut table = OperationTable::new(2);
        let first = table.add(None, op()).unwrap();
        let second = table.add(None, op()).unwrap();
        // Touch `first` so `second` becomes the least-recently-used entry.
        table.find_mut(first);
        let _third = table.add(None, op()).unwrap();
        assert!(table.find_mut(first).is_some());
        assert!(table.find_mut(second).is_none());
    }
}
