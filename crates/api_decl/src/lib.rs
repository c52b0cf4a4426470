//! Request/response DTOs for the keymint dispatcher's 27-entry request
//! surface (spec.md §6). Plain data only: no serialization derives, since
//! the wire format is an external collaborator's concern
//! (`original_source/android_keymaster.cpp`'s own `*Request`/`*Response`
//! structs are likewise pure data, encoded/decoded by a separate codec).

pub mod attest;
pub mod configure;
pub mod delete;
pub mod export;
pub mod key_characteristics;
pub mod keygen;
pub mod lifecycle;
pub mod operation;
pub mod policy;
pub mod rng;
pub mod support;
pub mod upgrade;
pub mod version;

pub use attest::{AttestKeyRequest, AttestKeyResponse};
pub use configure::{ConfigureRequest, ConfigureResponse};
pub use delete::{DeleteAllKeysResponse, DeleteKeyRequest, DeleteKeyResponse};
pub use export::{ExportKeyRequest, ExportKeyResponse};
pub use key_characteristics::{
    GetKeyCharacteristicsRequest, GetKeyCharacteristicsResponse, KeyCharacteristics,
};
pub use keygen::{
    GenerateKeyRequest, GenerateKeyResponse, ImportKeyRequest, ImportKeyResponse,
    ImportWrappedKeyRequest, ImportWrappedKeyResponse,
};
pub use lifecycle::{DeviceLockedRequest, EarlyBootEndedResponse};
pub use operation::{
    AbortOperationRequest, AbortOperationResponse, BeginOperationRequest, BeginOperationResponse,
    FinishOperationRequest, FinishOperationResponse, UpdateOperationRequest,
    UpdateOperationResponse,
};
pub use policy::{
    ComputeSharedHmacRequest, ComputeSharedHmacResponse, GenerateTimestampTokenRequest,
    GenerateTimestampTokenResponse, GetHmacSharingParametersResponse,
};
pub use rng::AddRngEntropyRequest;
pub use support::{
    SupportedAlgorithmsResponse, SupportedBlockModesRequest, SupportedBlockModesResponse,
    SupportedDigestsRequest, SupportedDigestsResponse, SupportedExportFormatsRequest,
    SupportedExportFormatsResponse, SupportedImportFormatsRequest,
    SupportedImportFormatsResponse, SupportedPaddingModesRequest, SupportedPaddingModesResponse,
};
pub use upgrade::{UpgradeKeyRequest, UpgradeKeyResponse};
pub use version::{GetVersion2Request, GetVersion2Response, GetVersionResponse};
