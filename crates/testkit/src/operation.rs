//! A toy block-cipher [`Operation`]/[`OperationFactory`] pair used by the
//! dispatcher test suite. Cryptographic primitives are out of scope for the
//! core (spec.md §1); this transform is a keystream XOR, not AES — good
//! enough to exercise block-sized `Update`/`Finish` plumbing, partial
//! consumption, and error-evicts without pulling in a cipher crate for a
//! fixture that never leaves the test tree.

use keymint_core::key::{Key, KeyId};
use keymint_core::{AuthorizationSet, Operation, OperationFactory};
use keymint_types::{BlockMode, Digest, KmError, PaddingMode, Purpose, Result};

const BLOCK_SIZE: usize = 16;

fn xor_block(key: &[u8], block: &mut [u8]) {
    for (i, byte) in block.iter_mut().enumerate() {
        *byte ^= key[i % key.len().max(1)];
    }
}

pub struct ToyCipherOperation {
    purpose: Purpose,
    authorizations: AuthorizationSet,
    key_material: Vec<u8>,
    key_id: Option<KeyId>,
    buffer: Vec<u8>,
}

impl ToyCipherOperation {
    pub fn new(purpose: Purpose, key: Key) -> Self {
        let authorizations = key.hw_enforced().clone();
        ToyCipherOperation {
            purpose,
            authorizations,
            key_material: key.material().to_vec(),
            key_id: None,
            buffer: Vec::new(),
        }
    }
}

impl Operation for ToyCipherOperation {
    fn purpose(&self) -> Purpose {
        self.purpose
    }

    fn authorizations(&self) -> &AuthorizationSet {
        &self.authorizations
    }

    fn key_id(&self) -> Option<&KeyId> {
        self.key_id.as_ref()
    }

    fn set_key_id(&mut self, key_id: KeyId) {
        self.key_id = Some(key_id);
    }

    fn begin(&mut self, _params: &AuthorizationSet, _out_params: &mut AuthorizationSet) -> Result<()> {
        Ok(())
    }

    fn update(
        &mut self,
        _params: &AuthorizationSet,
        input: &[u8],
        _out_params: &mut AuthorizationSet,
        output: &mut Vec<u8>,
    ) -> Result<usize> {
        if self.key_material.is_empty() {
            return Err(KmError::InvalidArgument);
        }
        self.buffer.extend_from_slice(input);
        let whole_blocks = self.buffer.len() / BLOCK_SIZE;
        let consumed_bytes = whole_blocks * BLOCK_SIZE;
        for chunk in self.buffer[..consumed_bytes].chunks_exact(BLOCK_SIZE) {
            let mut block = chunk.to_vec();
            xor_block(&self.key_material, &mut block);
            output.extend_from_slice(&block);
        }
        self.buffer.drain(..consumed_bytes);
        Ok(input.len())
    }

    fn finish(
        &mut self,
        params: &AuthorizationSet,
        input: &[u8],
        _signature: &[u8],
        out_params: &mut AuthorizationSet,
        output: &mut Vec<u8>,
    ) -> Result<()> {
        let mut unused = Vec::new();
        self.update(params, input, out_params, &mut unused)?;
        output.extend_from_slice(&unused);
        if !self.buffer.is_empty() {
            // ECB/NONE-padding semantics (spec.md S1): a trailing partial
            // block with no padding scheme configured is malformed input.
            return Err(KmError::InvalidInputLength);
        }
        Ok(())
    }

    fn abort(&mut self) -> Result<()> {
        self.buffer.clear();
        Ok(())
    }
}

/// Builds [`ToyCipherOperation`]s for one (algorithm, purpose) pair. Only
/// `ECB`/`NONE` are "supported" — enough surface for
/// `SupportedBlockModes`/`SupportedPaddingModes` plumbing tests without
/// pretending to model every AES mode.
pub struct ToyOperationFactory {
    purpose: Purpose,
}

impl ToyOperationFactory {
    pub fn new(purpose: Purpose) -> Self {
        ToyOperationFactory { purpose }
    }
}

impl OperationFactory for ToyOperationFactory {
    fn supported_block_modes(&self) -> &[BlockMode] {
        &[BlockMode::Ecb]
    }

    fn supported_padding_modes(&self) -> &[PaddingMode] {
        &[PaddingMode::None]
    }

    fn supported_digests(&self) -> &[Digest] {
        &[]
    }

    fn create_operation(
        &self,
        key: Key,
        _params: &AuthorizationSet,
    ) -> Result<Box<dyn Operation>> {
        Ok(Box::new(ToyCipherOperation::new(self.purpose, key)))
    }
}
