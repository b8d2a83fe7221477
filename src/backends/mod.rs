// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Plugin backends: built-in chain stages, in-memory collaborator
//! implementations, and stubs for tests.

pub mod local;
pub mod memory;
pub mod stub;

use crate::errors::RegistryError;
use crate::registry::CapabilityRegistry;
use crate::traits::declare_core_contracts;

/// Declare the core contracts and register every built-in plugin.
///
/// The one-call startup routine for hosts that want the full default
/// catalogue; hosts with custom needs call `declare_core_contracts` and the
/// per-backend `register_plugins` routines individually.
pub fn install_defaults(registry: &CapabilityRegistry) -> Result<(), RegistryError> {
    declare_core_contracts(registry)?;
    memory::register_plugins(registry)?;
    local::register_plugins(registry)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Behavior, Dispatch, Filter};

    #[test]
    fn install_defaults_populates_the_catalogue() {
        let registry = CapabilityRegistry::new();
        install_defaults(&registry).unwrap();

        let filters = registry.available::<dyn Filter>().unwrap();
        for name in ["archive", "logging", "require_keys", "timing"] {
            assert!(filters.contains(&name.to_string()), "missing filter '{}'", name);
        }

        let dispatchers = registry.available::<dyn Dispatch>().unwrap();
        assert!(dispatchers.contains(&"background".to_string()));
        assert!(dispatchers.contains(&"publish_result".to_string()));

        let behaviors = registry.available::<dyn Behavior>().unwrap();
        assert!(behaviors.contains(&"logging".to_string()));
        assert!(behaviors.contains(&"schedule_job".to_string()));
    }
}
