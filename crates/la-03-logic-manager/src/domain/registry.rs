//! # Selector Registry
//!
//! The routing table of a logic manager: which module handles which
//! selector, plus the confirmation threshold. A registry is only ever built
//! through validated constructors, so a value of this type always satisfies
//! the construction rules:
//!
//! - every selector maps to exactly one module
//! - module addresses are unique
//! - all modules share one storage instance
//! - `1 <= threshold <= module count`
//!
//! Mutations produce a new registry and leave the original untouched.

use crate::errors::ConfigurationError;
use la_01_account_storage::StorageHandle;
use la_02_logic_modules::LogicModule;
use shared_types::{Address, Selector};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Validated selector routing table.
#[derive(Clone, Debug)]
pub struct SelectorRegistry {
    routes: BTreeMap<Selector, Address>,
    modules: Vec<Arc<dyn LogicModule>>,
    storage: StorageHandle,
    threshold: usize,
}

impl SelectorRegistry {
    /// Builds a registry from `modules` in the given order.
    pub fn build(modules: Vec<Arc<dyn LogicModule>>, threshold: usize) -> Result<Self, ConfigurationError> {
        check_threshold(threshold, modules.len())?;

        let storage = match modules.first() {
            Some(first) => first.storage().clone(),
            None => return Err(ConfigurationError::InvalidThreshold { threshold, limit: 0 }),
        };
        let mut registry = Self {
            routes: BTreeMap::new(),
            modules: Vec::with_capacity(modules.len()),
            storage,
            threshold,
        };
        for module in modules {
            registry.insert(module)?;
        }
        Ok(registry)
    }

    fn insert(&mut self, module: Arc<dyn LogicModule>) -> Result<(), ConfigurationError> {
        let address = module.address();
        if self.modules.iter().any(|m| m.address() == address) {
            return Err(ConfigurationError::DuplicateModule(address));
        }
        if !module.storage().same_instance(&self.storage) {
            return Err(ConfigurationError::StorageMismatch {
                module: address,
                expected: self.storage.address(),
                actual: module.storage_address(),
            });
        }
        for selector in module.selectors() {
            if let Some(&first) = self.routes.get(&selector) {
                return Err(ConfigurationError::OverlappingSelector {
                    selector,
                    first,
                    second: address,
                });
            }
            self.routes.insert(selector, address);
        }
        self.modules.push(module);
        Ok(())
    }

    /// Copy of this registry with `module` appended.
    pub fn with_module(&self, module: Arc<dyn LogicModule>) -> Result<Self, ConfigurationError> {
        let mut next = self.clone();
        next.insert(module)?;
        Ok(next)
    }

    /// Copy of this registry without the module at `address`.
    pub fn without_module(&self, address: Address) -> Result<Self, ConfigurationError> {
        if self.module(&address).is_none() {
            return Err(ConfigurationError::ModuleNotFound(address));
        }
        check_threshold(self.threshold, self.modules.len() - 1)?;

        let mut next = self.clone();
        next.modules.retain(|m| m.address() != address);
        next.routes.retain(|_, owner| *owner != address);
        Ok(next)
    }

    /// Copy of this registry with a new threshold.
    pub fn with_threshold(&self, threshold: usize) -> Result<Self, ConfigurationError> {
        check_threshold(threshold, self.modules.len())?;
        Ok(Self {
            threshold,
            ..self.clone()
        })
    }

    /// Module address claiming `selector`.
    #[must_use]
    pub fn resolve(&self, selector: &Selector) -> Option<Address> {
        self.routes.get(selector).copied()
    }

    /// Registered module at `address`.
    #[must_use]
    pub fn module(&self, address: &Address) -> Option<&Arc<dyn LogicModule>> {
        self.modules.iter().find(|m| m.address() == *address)
    }

    /// Module claiming `selector`.
    #[must_use]
    pub fn module_for(&self, selector: &Selector) -> Option<&Arc<dyn LogicModule>> {
        self.resolve(selector).and_then(|address| self.module(&address))
    }

    /// Module addresses in registration order.
    #[must_use]
    pub fn module_addresses(&self) -> Vec<Address> {
        self.modules.iter().map(|m| m.address()).collect()
    }

    /// Number of registered modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Number of routed selectors.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.routes.len()
    }

    /// Storage shared by every module.
    #[must_use]
    pub fn storage(&self) -> &StorageHandle {
        &self.storage
    }

    /// Address of [`SelectorRegistry::storage`].
    #[must_use]
    pub fn storage_address(&self) -> Address {
        self.storage.address()
    }

    /// Confirmation threshold.
    #[must_use]
    pub fn threshold(&self) -> usize {
        self.threshold
    }
}

fn check_threshold(threshold: usize, limit: usize) -> Result<(), ConfigurationError> {
    if threshold == 0 || threshold > limit {
        Err(ConfigurationError::InvalidThreshold { threshold, limit })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{foreign_storage, mock_storage, MockModule, MOCK_STORAGE};

    fn six() -> Vec<Arc<dyn LogicModule>> {
        (0..6u8)
            .map(|i| MockModule::arc(0x10 + i, &[format!("op{i}()").as_str()]))
            .collect()
    }

    #[test]
    fn test_six_modules_threshold_four() {
        let registry = SelectorRegistry::build(six(), 4).unwrap();
        assert_eq!(registry.module_count(), 6);
        assert_eq!(registry.threshold(), 4);
        for i in 0..6u8 {
            let selector = Selector::from_signature(&format!("op{i}()"));
            assert_eq!(registry.resolve(&selector), Some(Address::from_low_u8(0x10 + i)));
        }
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(
            SelectorRegistry::build(six(), 7).unwrap_err(),
            ConfigurationError::InvalidThreshold { threshold: 7, limit: 6 }
        );
        assert!(SelectorRegistry::build(six(), 0).is_err());
        assert!(SelectorRegistry::build(Vec::new(), 1).is_err());
        assert!(SelectorRegistry::build(six(), 6).is_ok());
    }

    #[test]
    fn test_overlapping_selector_rejected() {
        let modules = vec![
            MockModule::arc(0x10, &["a()", "shared()"]),
            MockModule::arc(0x11, &["b()", "shared()"]),
        ];
        assert_eq!(
            SelectorRegistry::build(modules, 1).unwrap_err(),
            ConfigurationError::OverlappingSelector {
                selector: Selector::from_signature("shared()"),
                first: Address::from_low_u8(0x10),
                second: Address::from_low_u8(0x11),
            }
        );
    }

    #[test]
    fn test_duplicate_module_and_storage_mismatch() {
        let dup = vec![MockModule::arc(0x10, &["a()"]), MockModule::arc(0x10, &["b()"])];
        assert_eq!(
            SelectorRegistry::build(dup, 1).unwrap_err(),
            ConfigurationError::DuplicateModule(Address::from_low_u8(0x10))
        );

        let foreign = Arc::new(MockModule::new(0x11, &["b()"]).with_storage(foreign_storage(0x01)));
        let mixed: Vec<Arc<dyn LogicModule>> = vec![MockModule::arc(0x10, &["a()"]), foreign];
        assert!(matches!(
            SelectorRegistry::build(mixed, 1).unwrap_err(),
            ConfigurationError::StorageMismatch { .. }
        ));
    }

    #[test]
    fn test_storage_compared_by_instance_not_address() {
        let twin = Arc::new(MockModule::new(0x11, &["b()"]).with_storage(foreign_storage(0xee)));
        assert_eq!(twin.storage_address(), MOCK_STORAGE);

        let mixed: Vec<Arc<dyn LogicModule>> = vec![MockModule::arc(0x10, &["a()"]), twin.clone()];
        assert_eq!(
            SelectorRegistry::build(mixed, 1).unwrap_err(),
            ConfigurationError::StorageMismatch {
                module: Address::from_low_u8(0x11),
                expected: MOCK_STORAGE,
                actual: MOCK_STORAGE,
            }
        );

        let registry = SelectorRegistry::build(vec![MockModule::arc(0x10, &["a()"])], 1).unwrap();
        assert!(registry.with_module(twin).is_err());
        assert!(registry.storage().same_instance(&mock_storage()));
    }

    #[test]
    fn test_mutations_leave_original_untouched() {
        let registry = SelectorRegistry::build(six(), 4).unwrap();

        let grown = registry.with_module(MockModule::arc(0x20, &["extra()"])).unwrap();
        assert_eq!(grown.module_count(), 7);
        assert_eq!(registry.module_count(), 6);

        let shrunk = registry.without_module(Address::from_low_u8(0x10)).unwrap();
        assert_eq!(shrunk.resolve(&Selector::from_signature("op0()")), None);
        assert_eq!(registry.resolve(&Selector::from_signature("op0()")), Some(Address::from_low_u8(0x10)));

        assert!(registry.with_threshold(6).is_ok());
        assert!(registry.with_threshold(7).is_err());
    }

    #[test]
    fn test_remove_keeps_threshold_reachable() {
        let registry = SelectorRegistry::build(six(), 6).unwrap();
        assert_eq!(
            registry.without_module(Address::from_low_u8(0x10)).unwrap_err(),
            ConfigurationError::InvalidThreshold { threshold: 6, limit: 5 }
        );
        assert_eq!(
            registry.without_module(Address::from_low_u8(0x99)).unwrap_err(),
            ConfigurationError::ModuleNotFound(Address::from_low_u8(0x99))
        );
    }
}
