//! `BeginOperation` / `UpdateOperation` / `FinishOperation` /
//! `AbortOperation` — the request/response shapes of the FSM dispatcher
//! methods (spec.md §4.9, §6).

use keymint_core::key_blob::KeyBlob;
use keymint_core::{AuthorizationSet, OperationHandle};
use keymint_types::Purpose;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginOperationRequest {
    pub purpose: Purpose,
    pub key_blob: KeyBlob,
    pub in_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginOperationResponse {
    pub challenge: OperationHandle,
    pub out_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOperationRequest {
    pub op_handle: OperationHandle,
    pub input: Vec<u8>,
    pub in_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateOperationResponse {
    pub out_params: AuthorizationSet,
    pub output: Vec<u8>,
    pub input_consumed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinishOperationRequest {
    pub op_handle: OperationHandle,
    pub input: Vec<u8>,
    pub signature: Vec<u8>,
    pub in_params: AuthorizationSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinishOperationResponse {
    pub out_params: AuthorizationSet,
    pub output: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbortOperationRequest {
    pub op_handle: OperationHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AbortOperationResponse;
