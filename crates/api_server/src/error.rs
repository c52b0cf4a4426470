//! The dispatcher's error vocabulary is exactly [`KmError`] — spec.md §7:
//! "every handler returns a status in its response; no exception-style
//! unwinding crosses the dispatcher boundary." There is no separate
//! `DispatchError` wrapping it (contrast with the teacher's
//! `anvil_zksync_api_server::error::RpcError`, which exists to translate a
//! lower crate's error into a JSON-RPC error object) because mapping
//! `KmError` onto a wire status code is the transport shim's job, and that
//! shim is explicitly out of scope (spec.md §1).

pub use keymint_types::KmError as DispatchError;
pub use keymint_types::Result as DispatchResult;
