//! `Dispatcher<C>`: the single request-routing surface (spec.md §4.7).
//!
//! Generic over a concrete [`Context`] implementation rather than holding
//! `Box<dyn Context>` — every call monomorphizes instead of paying a second
//! vtable indirection on top of the `KeyFactory`/`OperationFactory`/
//! `EnforcementPolicy` trait objects the `Context` itself already hands out
//! (see SPEC_FULL.md §4.7). This mirrors the teacher's namespace impls
//! holding a concrete `InMemoryNode` rather than `dyn Node`.

mod keygen;
mod key_ops;
mod operation;
mod policy;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use keymint_core::key::Key;
use keymint_core::key_blob::KeyBlob;
use keymint_core::{check_key_version, AuthorizationSet, Context, OperationTable};
use keymint_types::Result;
use tracing::debug;

use keymint_api_decl::{GetVersion2Request, GetVersion2Response, GetVersionResponse};
use keymint_api_decl::{ConfigureRequest, ConfigureResponse};
use keymint_api_decl::{
    SupportedAlgorithmsResponse, SupportedBlockModesRequest, SupportedBlockModesResponse,
    SupportedDigestsRequest, SupportedDigestsResponse, SupportedExportFormatsRequest,
    SupportedExportFormatsResponse, SupportedImportFormatsRequest,
    SupportedImportFormatsResponse, SupportedPaddingModesRequest, SupportedPaddingModesResponse,
};

/// An arbitrary, fixed build date for this core (spec.md §4.7: `km_date`).
/// Real deployments would stamp this at build time; the core only ever
/// reports it verbatim.
pub const KM_DATE: u64 = 20_240_101;

/// The highest wire message version this core speaks
/// (spec.md §6: "Version negotiation").
pub const SERVER_MAX_MESSAGE_VERSION: u32 = 4;

/// The request dispatcher and operation lifecycle manager.
///
/// Owns the [`OperationTable`] behind a `Mutex` (spec.md §5: "the sole
/// shared mutable state"); the `Context` is not itself locked here — any
/// interior mutability it needs (system version, RNG, policy state) is its
/// own concern, the way `anvil_zksync_core::node::InMemoryNode` wraps its
/// own inner state in `Arc<RwLock<InMemoryNodeInner>>` rather than the
/// server crate locking it from outside.
pub struct Dispatcher<C: Context> {
    context: C,
    table: Mutex<OperationTable>,
    message_version: AtomicU32,
}

impl<C: Context> Dispatcher<C> {
    pub fn new(context: C, operation_table_capacity: usize) -> Self {
        Dispatcher {
            context,
            table: Mutex::new(OperationTable::new(operation_table_capacity)),
            message_version: AtomicU32::new(SERVER_MAX_MESSAGE_VERSION),
        }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// The negotiated message version, defaulting to this server's own
    /// ceiling until a `GetVersion2` call negotiates one down
    /// (spec.md §9 open question: "Whether `GetVersion` (v1) should also
    /// set `message_version_` is unclear" — resolved as "no", matching
    /// `original_source/android_keymaster.cpp`).
    pub fn message_version(&self) -> u32 {
        self.message_version.load(Ordering::SeqCst)
    }

    /// `GetVersion` always answers the static `(2, 0, 0)` triple and never
    /// touches `message_version_` (spec.md §4.7, §9).
    pub fn get_version(&self) -> GetVersionResponse {
        GetVersionResponse::STATIC
    }

    /// Negotiates `message_version_ = min(client_max, server_max)`
    /// (spec.md §4.7, §6).
    pub fn get_version_2(&self, request: GetVersion2Request) -> GetVersion2Response {
        let negotiated = request.max_message_version.min(SERVER_MAX_MESSAGE_VERSION);
        self.message_version.store(negotiated, Ordering::SeqCst);
        GetVersion2Response {
            km_version: self.context.km_version(),
            km_date: KM_DATE,
            max_message_version: SERVER_MAX_MESSAGE_VERSION,
        }
    }

    /// Sets the `Context`'s system version/patchlevel
    /// (spec.md §4.7: "Once set, subsequent changes may be rejected per
    /// Context policy").
    pub fn configure(&self, request: ConfigureRequest) -> Result<ConfigureResponse> {
        self.context.set_system_version(request.system_version)?;
        Ok(ConfigureResponse)
    }

    /// Forwards caller bytes to the `Context`'s RNG sink (spec.md §4.7,
    /// §5: "append-only and commute").
    pub fn add_rng_entropy(&self, data: &[u8]) -> Result<()> {
        self.context.add_rng_entropy(data)
    }

    pub fn supported_algorithms(&self) -> SupportedAlgorithmsResponse {
        SupportedAlgorithmsResponse {
            algorithms: self.context.supported_algorithms().to_vec(),
        }
    }

    pub fn supported_block_modes(
        &self,
        request: SupportedBlockModesRequest,
    ) -> Result<SupportedBlockModesResponse> {
        let factory = self.operation_factory(request.algorithm, request.purpose)?;
        Ok(SupportedBlockModesResponse {
            block_modes: factory.supported_block_modes().to_vec(),
        })
    }

    pub fn supported_padding_modes(
        &self,
        request: SupportedPaddingModesRequest,
    ) -> Result<SupportedPaddingModesResponse> {
        let factory = self.operation_factory(request.algorithm, request.purpose)?;
        Ok(SupportedPaddingModesResponse {
            padding_modes: factory.supported_padding_modes().to_vec(),
        })
    }

    pub fn supported_digests(
        &self,
        request: SupportedDigestsRequest,
    ) -> Result<SupportedDigestsResponse> {
        let factory = self.operation_factory(request.algorithm, request.purpose)?;
        Ok(SupportedDigestsResponse {
            digests: factory.supported_digests().to_vec(),
        })
    }

    pub fn supported_import_formats(
        &self,
        request: SupportedImportFormatsRequest,
    ) -> Result<SupportedImportFormatsResponse> {
        let factory = self.key_factory(request.algorithm)?;
        Ok(SupportedImportFormatsResponse {
            formats: factory.supported_import_formats().to_vec(),
        })
    }

    pub fn supported_export_formats(
        &self,
        request: SupportedExportFormatsRequest,
    ) -> Result<SupportedExportFormatsResponse> {
        let factory = self.key_factory(request.algorithm)?;
        Ok(SupportedExportFormatsResponse {
            formats: factory.supported_export_formats().to_vec(),
        })
    }

    pub fn early_boot_ended(&self) {
        if let Some(policy) = self.context.enforcement_policy() {
            policy.early_boot_ended();
        } else {
            debug!("EarlyBootEnded received with no policy installed");
        }
    }

    pub fn device_locked(&self, password_only: bool) {
        if let Some(policy) = self.context.enforcement_policy() {
            policy.device_locked(password_only);
        } else {
            debug!("DeviceLocked received with no policy installed");
        }
    }

    /// Parses `blob` and applies the key-blob version check
    /// (spec.md §4.8), shared by every handler that loads a key for use:
    /// `BeginOperation`, `GetKeyCharacteristics`, `AttestKey`, and the
    /// attestation-signing-key load in `GenerateKey`/`ImportKey`.
    fn load_key(&self, blob: &KeyBlob, additional_params: &AuthorizationSet) -> Result<Key> {
        let key = self.context.parse_key_blob(blob, additional_params)?;
        check_key_version(&key, self.context.system_version())?;
        Ok(key)
    }

    fn key_factory(
        &self,
        algorithm: keymint_types::Algorithm,
    ) -> Result<std::sync::Arc<dyn keymint_core::KeyFactory>> {
        self.context
            .key_factory(algorithm)
            .ok_or(keymint_types::KmError::UnsupportedAlgorithm)
    }

    /// Resolves algorithm and purpose separately so the two failure modes
    /// stay distinguishable (spec.md §4.7: "`UNSUPPORTED_ALGORITHM` if no
    /// factory; `UNSUPPORTED_PURPOSE` if no operation factory") — the
    /// `Context::operation_factory` default short-circuits through
    /// `Option::?` and would collapse both into one `None`.
    fn operation_factory(
        &self,
        algorithm: keymint_types::Algorithm,
        purpose: keymint_types::Purpose,
    ) -> Result<std::sync::Arc<dyn keymint_core::OperationFactory>> {
        let factory = self.key_factory(algorithm)?;
        factory
            .operation_factory(purpose)
            .ok_or(keymint_types::KmError::UnsupportedPurpose)
    }
}
