//! `GetHmacSharingParameters` / `ComputeSharedHmac` / `VerifyAuthorization` /
//! `GenerateTimestampToken` (spec.md §4.6) — every one of these degrades to
//! `UNIMPLEMENTED` when no `EnforcementPolicy` is installed, rather than the
//! dispatcher trying to fake a default.

use keymint_core::policy::{VerifyAuthorizationRequest, VerifyAuthorizationResponse};
use keymint_types::{KmError, Result};

use keymint_api_decl::{
    ComputeSharedHmacRequest, ComputeSharedHmacResponse, GenerateTimestampTokenRequest,
    GenerateTimestampTokenResponse, GetHmacSharingParametersResponse,
};

use super::Dispatcher;
use keymint_core::Context;

impl<C: Context> Dispatcher<C> {
    pub fn get_hmac_sharing_parameters(&self) -> Result<GetHmacSharingParametersResponse> {
        let policy = self.context().enforcement_policy().ok_or(KmError::Unimplemented)?;
        Ok(GetHmacSharingParametersResponse {
            params: policy.get_hmac_sharing_parameters()?,
        })
    }

    pub fn compute_shared_hmac(
        &self,
        request: ComputeSharedHmacRequest,
    ) -> Result<ComputeSharedHmacResponse> {
        let policy = self.context().enforcement_policy().ok_or(KmError::Unimplemented)?;
        let check = policy.compute_shared_hmac(&request.params)?;
        Ok(ComputeSharedHmacResponse {
            sharing_check: check.sharing_check,
        })
    }

    /// Takes `keymint_core::policy::VerifyAuthorizationRequest/Response`
    /// directly rather than an `api_decl` wrapper — the request/response
    /// shapes the policy collaborator already defines are exactly the wire
    /// operation's shape, so there is nothing for a wrapper to add.
    pub fn verify_authorization(
        &self,
        request: VerifyAuthorizationRequest,
    ) -> Result<VerifyAuthorizationResponse> {
        let policy = self.context().enforcement_policy().ok_or(KmError::Unimplemented)?;
        policy.verify_authorization(request)
    }

    pub fn generate_timestamp_token(
        &self,
        request: GenerateTimestampTokenRequest,
    ) -> Result<GenerateTimestampTokenResponse> {
        let policy = self.context().enforcement_policy().ok_or(KmError::Unimplemented)?;
        let token = policy.generate_timestamp_token(request.challenge)?;
        Ok(GenerateTimestampTokenResponse {
            challenge: token.challenge,
            timestamp: token.timestamp,
            mac: token.mac,
        })
    }
}
