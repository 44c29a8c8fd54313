use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One band of a progressive schedule.
///
/// Brackets carry only their upper edge; the lower edge is the previous
/// bracket's `upper_bound` (or zero for the first one). `None` marks the
/// open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }

    /// Width of the bracket given the previous bracket's upper edge.
    /// `None` for the open-ended bracket.
    pub fn width(
        &self,
        previous_limit: Decimal,
    ) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - previous_limit)
    }
}

/// The portion of taxable income that fell into one bracket during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
    /// Income taxed at `rate`.
    pub taxed_amount: Decimal,
    /// `taxed_amount * rate`, unrounded.
    pub tax: Decimal,
}
