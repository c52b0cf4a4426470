//! Per-algorithm key generation/import, consumed by the dispatcher
//! (spec.md §4.2).

use std::sync::Arc;

use keymint_types::{KeyFormat, Purpose, Result};

use crate::authorization::AuthorizationSet;
use crate::key::Key;
use crate::key_blob::KeyBlob;
use crate::operation_factory::OperationFactory;

/// The blob, authorization lists, and certificate chain produced by a
/// successful `GenerateKey` or `ImportKey` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedKey {
    pub blob: KeyBlob,
    pub hw_enforced: AuthorizationSet,
    pub sw_enforced: AuthorizationSet,
    pub cert_chain: Vec<Vec<u8>>,
}

/// Per-algorithm object the core plumbs requests through without
/// interpreting key material itself (spec.md §4.2: "The core never
/// interprets key material; it only plumbs").
pub trait KeyFactory: Send + Sync {
    fn generate_key(
        &self,
        description: &AuthorizationSet,
        attest_key: Option<&Key>,
        issuer_subject: Option<&[u8]>,
    ) -> Result<GeneratedKey>;

    fn import_key(
        &self,
        description: &AuthorizationSet,
        key_format: KeyFormat,
        key_data: &[u8],
        attest_key: Option<&Key>,
        issuer_subject: Option<&[u8]>,
    ) -> Result<GeneratedKey>;

    fn supported_import_formats(&self) -> &[KeyFormat];

    fn supported_export_formats(&self) -> &[KeyFormat];

    /// The operation factory for `purpose`, or `None` if this algorithm
    /// does not support it (spec.md §4.2: "`GetOperationFactory(purpose) →
    /// OperationFactory | null`").
    fn operation_factory(&self, purpose: Purpose) -> Option<Arc<dyn OperationFactory>>;
}
