use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// caller-supplied key identifying a loan within a wallet
pub type LoanId = String;

/// unique identifier for a generated plan
pub type PlanId = Uuid;

/// prioritization strategy for directing extra budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// smallest balance first
    Snowball,
    /// highest interest rate first
    Avalanche,
    /// smallest balance-to-rate ratio first
    Spiral,
    /// reserved, not yet specified
    Optimized,
}

impl Strategy {
    /// label used in report headers
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Snowball => "Debt-Snowball",
            Strategy::Avalanche => "Debt-Avalanche",
            Strategy::Spiral => "Debt-Spiral",
            Strategy::Optimized => "Debt-Optimized",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// how a loan's monthly minimum is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimumPayment {
    /// caller-fixed monthly minimum
    Override(Money),
    /// derive the minimum from the amortization formula
    ComputeFromAmortization,
}
