//! Runtime configuration for a keymint core: the system version/patchlevel
//! pair a [`Context`](keymint_types) reports, and the operation table's
//! capacity. Nothing in this crate touches tags, keys, or operations
//! directly — it only carries the knobs a `Context` implementation is
//! constructed from, the way `anvil_zksync_config::TestNodeConfig` carries
//! the knobs a node is constructed from.

pub mod system_version;

pub use system_version::SystemVersion;

use tracing::debug;

/// Operation table capacity the spec leaves unspecified (spec.md §5: "a
/// fixed-size table of at most `N` entries"); `N` is a deployment knob, not
/// a constant baked into the core.
pub const DEFAULT_OPERATION_TABLE_CAPACITY: usize = 16;

/// Construction-time configuration for a keymint core.
///
/// Built with a fluent setter API, mirroring the builder pattern
/// `anvil_zksync_config`/`anvil_zksync_core::testing` use for their own
/// config and fixture types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymintConfig {
    system_version: SystemVersion,
    operation_table_capacity: usize,
}

impl Default for KeymintConfig {
    fn default() -> Self {
        KeymintConfig {
            system_version: SystemVersion::default(),
            operation_table_capacity: DEFAULT_OPERATION_TABLE_CAPACITY,
        }
    }
}

impl KeymintConfig {
    pub fn new() -> Self {
        KeymintConfig::default()
    }

    pub fn set_system_version(mut self, system_version: SystemVersion) -> Self {
        debug!(?system_version, "setting configured system version");
        self.system_version = system_version;
        self
    }

    pub fn set_operation_table_capacity(mut self, capacity: usize) -> Self {
        debug!(capacity, "setting operation table capacity");
        self.operation_table_capacity = capacity;
        self
    }

    pub fn system_version(&self) -> SystemVersion {
        self.system_version
    }

    pub fn operation_table_capacity(&self) -> usize {
        self.operation_table_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let config = KeymintConfig::default();
        assert_eq!(config.operation_table_capacity(), DEFAULT_OPERATION_TABLE_CAPACITY);
    }

    #[test]
    fn builder_overrides_apply() {
        let config = KeymintConfig::new()
            .set_operation_table_capacity(4)
            .set_system_version(SystemVersion::new(2, 20260101));
        assert_eq!(config.operation_table_capacity(), 4);
        assert_eq!(config.system_version(), SystemVersion::new(2, 20260101));
    }
}
