//! The request dispatcher: routes the keymint request/response surface
//! (spec.md §6) to a pluggable [`Context`](keymint_core::Context), its
//! [`KeyFactory`](keymint_core::KeyFactory)/`OperationFactory` collaborators,
//! and its optional [`EnforcementPolicy`](keymint_core::EnforcementPolicy).
//!
//! This crate is the one place in the workspace that knows the shape of
//! every request/response pair; it owns no cryptography, no key-blob
//! encoding, and no transport framing, mirroring the teacher's own
//! `anvil_zksync_api_server` (the namespace implementations know the RPC
//! surface, `InMemoryNode` owns none of the wire format).

pub mod dispatcher;
pub mod error;

pub use dispatcher::{Dispatcher, KM_DATE, SERVER_MAX_MESSAGE_VERSION};
pub use error::DispatchError;
