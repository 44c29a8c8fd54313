use std::collections::HashMap;

use thiserror::Error;

use crate::{FlatZeroCalculator, ProgressiveTaxCalculator, TaxCalculator};

/// Errors raised by [`RegimeRegistry`] lookups.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown regime '{requested}'; available: {available:?}")]
    UnknownRegime {
        requested: String,
        available: Vec<String>,
    },
}

/// Calculators keyed by [`TaxCalculator::name`].
///
/// Typical lifetime:
/// 1. Start from `RegimeRegistry::with_builtins()` (or `new()` for an empty one).
/// 2. Call `register` for every regime loaded from configuration.
/// 3. Call `get` whenever a calculator is needed by name.
#[derive(Debug)]
pub struct RegimeRegistry {
    calculators: HashMap<String, Box<dyn TaxCalculator>>,
}

impl RegimeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            calculators: HashMap::new(),
        }
    }

    /// A registry holding `es-autonomo` and `us-llc`.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ProgressiveTaxCalculator::default()));
        registry.register(Box::new(FlatZeroCalculator::default()));
        registry
    }

    /// Register a calculator.
    ///
    /// If one with the same name is already present it is replaced, which is
    /// how a configuration file overrides a built-in regime.
    pub fn register(&mut self, calculator: Box<dyn TaxCalculator>) {
        self.calculators
            .insert(calculator.name().to_string(), calculator);
    }

    /// Names of every registered regime, sorted alphabetically.
    pub fn available(&self) -> Vec<String> {
        let mut names: Vec<_> = self.calculators.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Look up a calculator by name.
    ///
    /// # Errors
    /// * [`RegistryError::UnknownRegime`] — nothing is registered under
    ///   `name`; the error lists what is.
    pub fn get(
        &self,
        name: &str,
    ) -> Result<&dyn TaxCalculator, RegistryError> {
        self.calculators
            .get(name)
            .map(|calculator| calculator.as_ref())
            .ok_or_else(|| RegistryError::UnknownRegime {
                requested: name.to_string(),
                available: self.available(),
            })
    }
}

impl Default for RegimeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
