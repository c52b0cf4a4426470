//! `Configure` (spec.md §4.7, §6).

use keymint_config::SystemVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureRequest {
    pub system_version: SystemVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigureResponse;
