// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The capability registry: declared contracts and their registered
//! implementations.
//!
//! The registry is an explicit value with controlled lifetime. Hosts
//! construct one at process start and pass it by reference to every
//! composition site; there is no hidden global. Declarations and
//! registrations typically happen once at startup, resolution on every chain
//! build, so access is guarded by a read-mostly lock.

mod plugin_config;

pub use plugin_config::PluginConfig;

use std::any::{self, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::errors::RegistryError;
use crate::observability::messages::registry::{ContractDeclared, PluginRegistered, PluginResolved};
use crate::observability::messages::StructuredLog;
use crate::traits::Contract;

/// Type-erased plugin instance as produced by a factory.
type BoxedInstance = Box<dyn Any + Send + Sync>;

/// Stored factory: builds one plugin instance from caller-supplied
/// configuration. Factories receive the registry so composite plugins can
/// resolve the collaborators they wrap.
type InstanceFactory =
    Arc<dyn Fn(&CapabilityRegistry, &PluginConfig) -> Result<BoxedInstance, RegistryError> + Send + Sync>;

/// One declared contract: its metadata plus registered implementations.
struct ContractEntry {
    operations: &'static [&'static str],
    instance_type: TypeId,
    contract_type_name: &'static str,
    plugins: BTreeMap<String, InstanceFactory>,
}

/// Catalogue of declared capability contracts and registered plugins.
pub struct CapabilityRegistry {
    contracts: RwLock<HashMap<&'static str, ContractEntry>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            contracts: RwLock::new(HashMap::new()),
        }
    }

    /// Declare contract `C` under `C::ID`.
    ///
    /// Redeclaring an already-declared id fails with `ContractRedeclared`;
    /// a declared contract is immutable for the registry's lifetime.
    pub fn declare<C>(&self) -> Result<(), RegistryError>
    where
        C: Contract + ?Sized,
    {
        let mut contracts = self.contracts.write();
        if contracts.contains_key(C::ID) {
            return Err(RegistryError::ContractRedeclared {
                contract: C::ID.to_string(),
            });
        }
        contracts.insert(
            C::ID,
            ContractEntry {
                operations: C::OPERATIONS,
                instance_type: TypeId::of::<Arc<C>>(),
                contract_type_name: any::type_name::<C>(),
                plugins: BTreeMap::new(),
            },
        );
        drop(contracts);

        ContractDeclared {
            contract: C::ID,
            operations: C::OPERATIONS,
        }
        .log();
        Ok(())
    }

    /// Register `factory` as implementation `name` of contract `C`.
    ///
    /// Compliance with the contract is enforced by the signature: the factory
    /// can only produce `Arc<C>`. What remains checked at runtime is the
    /// registration bookkeeping itself: unknown contract, an id collision
    /// between two contract types, or a duplicate name.
    pub fn register<C, F>(&self, name: &str, factory: F) -> Result<(), RegistryError>
    where
        C: Contract + ?Sized,
        F: Fn(&CapabilityRegistry, &PluginConfig) -> Result<Arc<C>, RegistryError>
            + Send
            + Sync
            + 'static,
    {
        let mut contracts = self.contracts.write();
        let entry = contracts
            .get_mut(C::ID)
            .ok_or_else(|| RegistryError::ContractNotDeclared {
                contract: C::ID.to_string(),
            })?;

        if entry.instance_type != TypeId::of::<Arc<C>>() {
            return Err(RegistryError::ContractMismatch {
                contract: C::ID.to_string(),
                declared: entry.contract_type_name,
                offered: any::type_name::<C>(),
            });
        }
        if entry.plugins.contains_key(name) {
            return Err(RegistryError::DuplicateRegistration {
                contract: C::ID.to_string(),
                plugin: name.to_string(),
            });
        }

        entry.plugins.insert(
            name.to_string(),
            Arc::new(move |registry, config| {
                factory(registry, config).map(|instance| Box::new(instance) as BoxedInstance)
            }),
        );
        drop(contracts);

        PluginRegistered {
            contract: C::ID,
            plugin: name,
        }
        .log();
        Ok(())
    }

    /// Construct an instance of implementation `name` of contract `C`.
    ///
    /// The factory runs outside the registry lock, so it may itself resolve
    /// other plugins.
    pub fn resolve<C>(&self, name: &str, config: &PluginConfig) -> Result<Arc<C>, RegistryError>
    where
        C: Contract + ?Sized,
    {
        let (factory, declared) = {
            let contracts = self.contracts.read();
            let entry = contracts
                .get(C::ID)
                .ok_or_else(|| RegistryError::ContractNotDeclared {
                    contract: C::ID.to_string(),
                })?;

            if entry.instance_type != TypeId::of::<Arc<C>>() {
                return Err(RegistryError::ContractMismatch {
                    contract: C::ID.to_string(),
                    declared: entry.contract_type_name,
                    offered: any::type_name::<C>(),
                });
            }
            match entry.plugins.get(name) {
                Some(factory) => (Arc::clone(factory), entry.contract_type_name),
                None => {
                    return Err(RegistryError::PluginNotFound {
                        contract: C::ID.to_string(),
                        plugin: name.to_string(),
                        available: entry.plugins.keys().cloned().collect(),
                    })
                }
            }
        };

        let instance = factory(self, config)?;
        match instance.downcast::<Arc<C>>() {
            Ok(instance) => {
                PluginResolved {
                    contract: C::ID,
                    plugin: name,
                }
                .log();
                Ok(*instance)
            }
            Err(_) => Err(RegistryError::ContractMismatch {
                contract: C::ID.to_string(),
                declared,
                offered: any::type_name::<C>(),
            }),
        }
    }

    /// Names currently registered for contract `C`, sorted.
    pub fn available<C>(&self) -> Result<Vec<String>, RegistryError>
    where
        C: Contract + ?Sized,
    {
        let contracts = self.contracts.read();
        let entry = contracts
            .get(C::ID)
            .ok_or_else(|| RegistryError::ContractNotDeclared {
                contract: C::ID.to_string(),
            })?;
        Ok(entry.plugins.keys().cloned().collect())
    }

    /// Whether contract `C` has been declared.
    pub fn is_declared<C>(&self) -> bool
    where
        C: Contract + ?Sized,
    {
        self.contracts.read().contains_key(C::ID)
    }

    /// Ids of every declared contract, sorted.
    pub fn declared(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.contracts.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Required operation names of a declared contract.
    pub fn operations(&self, contract_id: &str) -> Result<&'static [&'static str], RegistryError> {
        self.contracts
            .read()
            .get(contract_id)
            .map(|entry| entry.operations)
            .ok_or_else(|| RegistryError::ContractNotDeclared {
                contract: contract_id.to_string(),
            })
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let contracts = self.contracts.read();
        let mut map = f.debug_map();
        for (id, entry) in contracts.iter() {
            map.entry(&id, &entry.plugins.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Continuation;
    use crate::errors::StageResult;
    use crate::traits::Behavior;
    use serde_json::Value;

    struct PassThrough;

    impl Behavior for PassThrough {
        fn execute(&self, next: Continuation, input: Value) -> StageResult {
            next.run(input)
        }

        fn name(&self) -> &'static str {
            "pass_through"
        }
    }

    fn pass_through_factory(
        _registry: &CapabilityRegistry,
        _config: &PluginConfig,
    ) -> Result<Arc<dyn Behavior>, RegistryError> {
        Ok(Arc::new(PassThrough))
    }

    #[test]
    fn register_requires_declared_contract() {
        let registry = CapabilityRegistry::new();
        let err = registry
            .register::<dyn Behavior, _>("pass", pass_through_factory)
            .unwrap_err();
        assert!(matches!(err, RegistryError::ContractNotDeclared { .. }));

        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("pass", pass_through_factory)
            .unwrap();
    }

    #[test]
    fn duplicate_registration_keeps_first_factory() {
        let registry = CapabilityRegistry::new();
        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("pass", pass_through_factory)
            .unwrap();

        let err = registry
            .register::<dyn Behavior, _>("pass", pass_through_factory)
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateRegistration { .. }));

        // The first registration still resolves.
        let behavior = registry
            .resolve::<dyn Behavior>("pass", &PluginConfig::new())
            .unwrap();
        assert_eq!(behavior.name(), "pass_through");
    }

    #[test]
    fn plugin_not_found_lists_registered_names() {
        let registry = CapabilityRegistry::new();
        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("alpha", pass_through_factory)
            .unwrap();
        registry
            .register::<dyn Behavior, _>("beta", pass_through_factory)
            .unwrap();

        let err = registry
            .resolve::<dyn Behavior>("gamma", &PluginConfig::new())
            .err()
            .unwrap();
        match &err {
            RegistryError::PluginNotFound { available, .. } => {
                assert_eq!(available, &vec!["alpha".to_string(), "beta".to_string()]);
            }
            other => panic!("expected PluginNotFound, got {:?}", other),
        }
        assert!(err.to_string().contains("alpha"));
        assert!(err.to_string().contains("beta"));
    }

    #[test]
    fn available_is_sorted_and_requires_declaration() {
        let registry = CapabilityRegistry::new();
        assert!(matches!(
            registry.available::<dyn Behavior>(),
            Err(RegistryError::ContractNotDeclared { .. })
        ));

        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("zeta", pass_through_factory)
            .unwrap();
        registry
            .register::<dyn Behavior, _>("alpha", pass_through_factory)
            .unwrap();
        assert_eq!(registry.available::<dyn Behavior>().unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn operations_reports_contract_metadata() {
        let registry = CapabilityRegistry::new();
        registry.declare::<dyn Behavior>().unwrap();
        assert_eq!(registry.operations("behavior").unwrap(), &["execute"]);
        assert!(matches!(
            registry.operations("unknown"),
            Err(RegistryError::ContractNotDeclared { .. })
        ));
    }

    #[test]
    fn factories_may_reenter_the_registry() {
        let registry = CapabilityRegistry::new();
        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("inner", pass_through_factory)
            .unwrap();
        registry
            .register::<dyn Behavior, _>("outer", |registry, config| {
                // Composite plugin: resolves its inner stage while its own
                // factory is running.
                registry.resolve::<dyn Behavior>("inner", config)
            })
            .unwrap();

        let behavior = registry
            .resolve::<dyn Behavior>("outer", &PluginConfig::new())
            .unwrap();
        assert_eq!(behavior.name(), "pass_through");
    }

    #[test]
    fn resolution_is_shared_across_threads() {
        let registry = Arc::new(CapabilityRegistry::new());
        registry.declare::<dyn Behavior>().unwrap();
        registry
            .register::<dyn Behavior, _>("pass", pass_through_factory)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry
                            .resolve::<dyn Behavior>("pass", &PluginConfig::new())
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
