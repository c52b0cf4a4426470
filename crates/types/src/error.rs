//! The core's error vocabulary, modeled on spec.md §6/§7 and on
//! `anvil_zksync_api_server::error::RpcError`'s shape: one `thiserror`
//! variant per distinguishable failure, named after the spec's error
//! identifiers so a transport shim could map them onto the wire-level
//! signed-integer codes 1:1 (that mapping itself stays out of scope here).

/// Errors the core dispatcher and its collaborators can report.
///
/// `Ok(())` / `Ok(T)` plays the role of `KM_ERROR_OK`; every other outcome
/// is one of these variants. There is no catch-all "wraps anything" variant
/// in the hot path — `Other` exists only for collaborator errors
/// (`Context`/`KeyFactory`/`EnforcementPolicy` implementations) that don't
/// fit the spec's named taxonomy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum KmError {
    #[error("algorithm is not supported by this context")]
    UnsupportedAlgorithm,
    #[error("purpose is not supported for this algorithm")]
    UnsupportedPurpose,
    #[error("key format is not supported")]
    UnsupportedKeyFormat,
    #[error("key blob is invalid or was generated by firmware newer than this device's patch level")]
    InvalidKeyBlob,
    #[error("key blob was generated under an older patch level and must be upgraded")]
    KeyRequiresUpgrade,
    #[error("operation handle does not refer to a live operation")]
    InvalidOperationHandle,
    #[error("memory allocation failed")]
    MemoryAllocationFailed,
    #[error("early boot has ended; this operation is early-boot only")]
    EarlyBootEnded,
    #[error("no enforcement policy is installed; this call is unimplemented")]
    Unimplemented,
    #[error("input length is invalid for the selected algorithm/mode")]
    InvalidInputLength,
    #[error("one or more parameters are invalid")]
    InvalidArgument,
    #[error("tag already has a value and does not accept a second one")]
    InvalidTag,
    #[error("signature/MAC verification failed")]
    VerificationFailed,
    #[error("caller is not authorized to perform this operation")]
    KeyUserNotAuthenticated,
    #[error("auth token is missing, stale, or does not match the operation's challenge")]
    KeyExpired,
    #[error("internal error")]
    UnknownError,
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KmError>;
