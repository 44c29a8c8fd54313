pub mod calculations;
pub mod models;
pub mod registry;

pub use calculations::{
    Comparison, FlatZeroCalculator, ProgressiveTaxCalculator, TaxCalculator, compare,
};
pub use models::*;
pub use registry::{RegimeRegistry, RegistryError};
