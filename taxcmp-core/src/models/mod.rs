mod regime_config;
mod tax_bracket;
mod tax_breakdown;

pub use regime_config::{FlatLevy, RegimeConfig, RegimeError, RoundingMode};
pub use tax_bracket::{BracketSlice, TaxBracket};
pub use tax_breakdown::TaxBreakdown;
