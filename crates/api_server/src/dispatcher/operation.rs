//! `BeginOperation` / `UpdateOperation` / `FinishOperation` /
//! `AbortOperation` (spec.md §4.9) — the FSM at the heart of the
//! dispatcher.

use keymint_core::operation_table::invalid_handle_error;
use keymint_core::AuthorizationSet;
use keymint_types::tag::TAG_USAGE_COUNT_LIMIT;
use keymint_types::{KmError, ParamValue, Result};
use tracing::warn;

use keymint_api_decl::{
    AbortOperationRequest, AbortOperationResponse, BeginOperationRequest, BeginOperationResponse,
    FinishOperationRequest, FinishOperationResponse, UpdateOperationRequest,
    UpdateOperationResponse,
};

use super::Dispatcher;
use keymint_core::Context;

impl<C: Context> Dispatcher<C> {
    /// spec.md §4.9 Begin: load the key, resolve its operation factory,
    /// construct the operation, authorize it (if a policy is installed),
    /// begin it, and only then admit it to the table — a policy or
    /// operation error here simply never gets inserted, rather than
    /// needing its own eviction step.
    pub fn begin_operation(&self, request: BeginOperationRequest) -> Result<BeginOperationResponse> {
        let key = self.load_key(&request.key_blob, &request.in_params)?;
        let algorithm = key.algorithm().ok_or(KmError::UnknownError)?;
        let factory = self.operation_factory(algorithm, request.purpose)?;

        let hw_enforced = key.hw_enforced().clone();
        let mut operation = factory.create_operation(key, &request.in_params)?;

        let key_id = match self.context().enforcement_policy() {
            Some(policy) => {
                let key_id = policy.create_key_id(&request.key_blob)?;
                operation.set_key_id(key_id.clone());
                policy.authorize_operation(
                    request.purpose,
                    Some(&key_id),
                    &hw_enforced,
                    &request.in_params,
                    0,
                    true,
                )?;
                Some(key_id)
            }
            None => None,
        };

        let mut out_params = AuthorizationSet::new();
        operation.begin(&request.in_params, &mut out_params)?;

        let mut table = self.table.lock().unwrap();
        let handle = table.add(key_id, operation)?;
        Ok(BeginOperationResponse {
            challenge: handle,
            out_params,
        })
    }

    /// spec.md §4.9 Update: on any error — policy or the operation itself
    /// — the operation is evicted from the table (no resumption).
    pub fn update_operation(
        &self,
        request: UpdateOperationRequest,
    ) -> Result<UpdateOperationResponse> {
        let mut table = self.table.lock().unwrap();
        let entry = table
            .find_mut(request.op_handle)
            .ok_or_else(invalid_handle_error)?;

        if let Some(policy) = self.context().enforcement_policy() {
            if let Err(err) = policy.authorize_operation(
                entry.operation.purpose(),
                entry.key_id.as_ref(),
                entry.operation.authorizations(),
                &request.in_params,
                request.op_handle,
                false,
            ) {
                table.evict(request.op_handle);
                return Err(err);
            }
        }

        let mut out_params = AuthorizationSet::new();
        let mut output = Vec::new();
        match entry
            .operation
            .update(&request.in_params, &request.input, &mut out_params, &mut output)
        {
            Ok(input_consumed) => Ok(UpdateOperationResponse {
                out_params,
                output,
                input_consumed,
            }),
            Err(err) => {
                table.evict(request.op_handle);
                Err(err)
            }
        }
    }

    /// spec.md §4.9 Finish: policy check, then `Operation::finish`; on
    /// success, if the key's hw_enforced list caps usage at 1 and secure
    /// storage is present, deletes the key and surfaces the delete error
    /// even though the cryptographic step already succeeded
    /// (spec.md §9 open question, resolved literally). Always evicts.
    pub fn finish_operation(
        &self,
        request: FinishOperationRequest,
    ) -> Result<FinishOperationResponse> {
        let mut table = self.table.lock().unwrap();
        let entry = table
            .find_mut(request.op_handle)
            .ok_or_else(invalid_handle_error)?;

        if let Some(policy) = self.context().enforcement_policy() {
            if let Err(err) = policy.authorize_operation(
                entry.operation.purpose(),
                entry.key_id.as_ref(),
                entry.operation.authorizations(),
                &request.in_params,
                request.op_handle,
                false,
            ) {
                table.evict(request.op_handle);
                return Err(err);
            }
        }

        let mut out_params = AuthorizationSet::new();
        let mut output = Vec::new();
        let finish_result = entry.operation.finish(
            &request.in_params,
            &request.input,
            &request.signature,
            &mut out_params,
            &mut output,
        );

        let single_use = entry
            .operation
            .authorizations()
            .contains(TAG_USAGE_COUNT_LIMIT, &ParamValue::UInt(1));
        let key_id = entry.key_id.clone();

        let result = match finish_result {
            Ok(()) => {
                if single_use {
                    match (self.context().secure_key_storage(), key_id) {
                        (Some(storage), Some(key_id)) => match storage.delete_key(&key_id) {
                            Ok(()) => Ok(FinishOperationResponse { out_params, output }),
                            Err(err) => {
                                warn!(?err, "single-use key delete failed after a successful finish");
                                Err(err)
                            }
                        },
                        _ => Ok(FinishOperationResponse { out_params, output }),
                    }
                } else {
                    Ok(FinishOperationResponse { out_params, output })
                }
            }
            Err(err) => Err(err),
        };

        table.evict(request.op_handle);
        result
    }

    /// spec.md §4.9 Abort: calls `Operation::abort`, then always evicts,
    /// whether or not abort itself reported an error.
    pub fn abort_operation(&self, request: AbortOperationRequest) -> Result<AbortOperationResponse> {
        let mut table = self.table.lock().unwrap();
        let entry = table
            .find_mut(request.op_handle)
            .ok_or_else(invalid_handle_error)?;
        let result = entry.operation.abort();
        table.evict(request.op_handle);
        result.map(|()| AbortOperationResponse)
    }
}
