//! Operation table, key-blob lifecycle, and the collaborator traits a
//! Keymaster/KeyMint-style dispatcher is built against (spec.md §2, §4).
//!
//! This crate owns none of the cryptography, the key-blob wire codec, or the
//! transport boundary — those stay external collaborators (`Context`,
//! `KeyFactory`, `OperationFactory`, `Operation`, `EnforcementPolicy`,
//! `SecureKeyStorage`). What lives here is the part that is genuinely
//! shared no matter which collaborators a deployment plugs in: the
//! authorization multiset, the parsed-key and key-blob shapes, the bounded
//! operation table, and the version check every key load applies.

pub mod authorization;
pub mod context;
pub mod key;
pub mod key_blob;
pub mod key_factory;
pub mod operation;
pub mod operation_factory;
pub mod operation_table;
pub mod policy;
pub mod secure_storage;
pub mod version_check;

pub use authorization::AuthorizationSet;
pub use context::{Context, UnwrappedKeyDescription};
pub use key::{Key, KeyId};
pub use key_blob::KeyBlob;
pub use key_factory::{GeneratedKey, KeyFactory};
pub use operation::Operation;
pub use operation_factory::OperationFactory;
pub use operation_table::{invalid_handle_error, OperationEntry, OperationHandle, OperationTable};
pub use policy::{
    EnforcementPolicy, HmacSharingParameters, SharingCheck, TimestampToken,
    VerificationResult, VerifyAuthorizationRequest, VerifyAuthorizationResponse,
};
pub use secure_storage::SecureKeyStorage;
pub use version_check::check_key_version;
