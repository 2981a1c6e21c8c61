use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// default safety cap on simulated months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// plan generation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// a run exceeding this many months fails with NonTerminatingPlan
    pub max_months: u32,
    /// when set, report rows are labeled with calendar months starting here
    pub first_month: Option<NaiveDate>,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            first_month: None,
        }
    }
}

impl PlanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_months(mut self, months: u32) -> Self {
        self.max_months = months;
        self
    }

    pub fn first_month(mut self, date: NaiveDate) -> Self {
        self.first_month = Some(date);
        self
    }
}
