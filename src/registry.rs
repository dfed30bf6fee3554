//! Start-up collection of suite records.

use std::collections::HashMap;

use crate::diagnostics::HarnessError;
use crate::suite::Suite;

/// Collects suites at start-up and resolves manifest identifiers against
/// them.
///
/// Registration order is preserved for listing; lookup is by name, and names
/// must be unique.
#[derive(Debug, Default)]
pub struct SuiteRegistry {
    suites: Vec<Suite>,
    index: HashMap<String, usize>,
}

impl SuiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a suite, rejecting duplicate names.
    pub fn register(&mut self, suite: Suite) -> Result<(), HarnessError> {
        if self.index.contains_key(suite.name()) {
            return Err(HarnessError::DuplicateSuite {
                name: suite.name().to_string(),
            });
        }
        self.index.insert(suite.name().to_string(), self.suites.len());
        self.suites.push(suite);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Suite> {
        self.index.get(name).map(|&at| &self.suites[at])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Suite names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.suites.iter().map(|suite| suite.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suite> {
        self.suites.iter()
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = SuiteRegistry::new();
        registry.register(Suite::new("b", |_ctx| Ok(()))).unwrap();
        registry.register(Suite::new("a", |_ctx| Ok(()))).unwrap();
        registry.register(Suite::new("c", |_ctx| Ok(()))).unwrap();

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert!(registry.contains("a"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = SuiteRegistry::new();
        registry.register(Suite::new("smoke", |_ctx| Ok(()))).unwrap();

        let err = registry
            .register(Suite::new("smoke", |_ctx| Ok(())))
            .unwrap_err();
        assert!(matches!(err, HarnessError::DuplicateSuite { name } if name == "smoke"));
        assert_eq!(registry.len(), 1);
    }
}
