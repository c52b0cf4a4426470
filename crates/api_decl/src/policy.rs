//! `GetHmacSharingParameters` / `ComputeSharedHmac` / `GenerateTimestampToken`
//! (spec.md §4.6, §4.7, §6). `VerifyAuthorization`'s request/response is
//! already exactly [`keymint_core::policy::VerifyAuthorizationRequest`] /
//! [`keymint_core::policy::VerifyAuthorizationResponse`], so the dispatcher
//! uses those directly instead of a redundant wrapper here.

use keymint_core::policy::HmacSharingParameters;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GetHmacSharingParametersResponse {
    pub params: HmacSharingParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputeSharedHmacRequest {
    pub params: Vec<HmacSharingParameters>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComputeSharedHmacResponse {
    pub sharing_check: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerateTimestampTokenRequest {
    pub challenge: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerateTimestampTokenResponse {
    pub challenge: u64,
    pub timestamp: u64,
    pub mac: Vec<u8>,
}
