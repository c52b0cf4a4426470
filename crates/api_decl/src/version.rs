//! `GetVersion` / `GetVersion2` (spec.md §4.7, §6).

use keymint_types::KmVersion;

/// `GetVersion` takes no request fields; it always answers the static
/// `(2, 0, 0)` triple (spec.md §4.7: "returns static `(2, 0, 0)` plus OK").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetVersionResponse {
    pub major: i32,
    pub minor: i32,
    pub subminor: i32,
}

impl GetVersionResponse {
    pub const STATIC: GetVersionResponse = GetVersionResponse {
        major: 2,
        minor: 0,
        subminor: 0,
    };
}

/// Carries the client's ceiling on the message (wire) version it can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetVersion2Request {
    pub max_message_version: u32,
}

/// The server's `km_version`/`km_date` plus its own ceiling. The dispatcher
/// negotiates `min(client.max_message_version, server.max_message_version)`
/// and stores it for future calls (spec.md §4.7, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetVersion2Response {
    pub km_version: KmVersion,
    pub km_date: u64,
    pub max_message_version: u32,
}
