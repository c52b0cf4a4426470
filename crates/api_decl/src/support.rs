//! `SupportedAlgorithms` / `Supported{BlockModes,PaddingModes,Digests,
//! ImportFormats,ExportFormats}` (spec.md §4.7, §6).
//!
//! Each of these delegates to a `KeyFactory`/`OperationFactory` lookup, so
//! every request here carries at least the `Algorithm` to resolve one, and
//! the ones scoped to an operation factory also carry the `Purpose`
//! (spec.md §4.7: "checks algorithm support via `GetKeyFactory`, then
//! delegates to factory/operation-factory").

use keymint_types::{Algorithm, BlockMode, Digest, KeyFormat, PaddingMode, Purpose};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedAlgorithmsResponse {
    pub algorithms: Vec<Algorithm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedBlockModesRequest {
    pub algorithm: Algorithm,
    pub purpose: Purpose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedBlockModesResponse {
    pub block_modes: Vec<BlockMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedPaddingModesRequest {
    pub algorithm: Algorithm,
    pub purpose: Purpose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedPaddingModesResponse {
    pub padding_modes: Vec<PaddingMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedDigestsRequest {
    pub algorithm: Algorithm,
    pub purpose: Purpose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedDigestsResponse {
    pub digests: Vec<Digest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedImportFormatsRequest {
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedImportFormatsResponse {
    pub formats: Vec<KeyFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedExportFormatsRequest {
    pub algorithm: Algorithm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedExportFormatsResponse {
    pub formats: Vec<KeyFormat>,
}
