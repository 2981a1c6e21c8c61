use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PlanError, Result};
use crate::types::MinimumPayment;

/// default amortization horizon when none is given (10 years)
pub const DEFAULT_TERM_MONTHS: u32 = 120;

/// one debt instrument
///
/// Holds static terms only. The running balance belongs to the simulation,
/// which operates on its own snapshot, so a loan set can be replayed under
/// several strategies without interference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    name: String,
    principal: Money,
    apr: Rate,
    term_months: u32,
    minimum_payment: MinimumPayment,
}

impl Loan {
    /// builder for creating loans
    pub fn builder(name: impl Into<String>) -> LoanBuilder {
        LoanBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn apr(&self) -> Rate {
        self.apr
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn minimum_payment(&self) -> MinimumPayment {
        self.minimum_payment
    }

    pub fn monthly_rate(&self) -> Rate {
        self.apr.monthly()
    }

    /// payment that fully amortizes the loan in exactly `term_months` months
    ///
    /// Zero-rate loans amortize straight-line. Otherwise the fixed-payment
    /// annuity formula applies: `rate * principal * (1+rate)^n / ((1+rate)^n - 1)`.
    pub fn minimum_required_payment(&self) -> Money {
        let rate = self.monthly_rate().as_decimal();

        if rate.is_zero() {
            return self.principal / Decimal::from(self.term_months);
        }

        let base = Decimal::ONE + rate;
        let mut compound = Decimal::ONE;
        for _ in 0..self.term_months {
            compound *= base;
        }

        let numerator = self.principal.as_decimal() * rate * compound;
        let denominator = compound - Decimal::ONE;

        Money::from_decimal(numerator / denominator)
    }

    /// the caller override if one was given, otherwise the amortizing minimum
    pub fn scheduled_minimum(&self) -> Money {
        match self.minimum_payment {
            MinimumPayment::Override(amount) => amount,
            MinimumPayment::ComputeFromAmortization => self.minimum_required_payment(),
        }
    }

    /// monthly minimum clamped to the remaining balance
    ///
    /// A loan already below its minimum only owes what is left; a cleared
    /// loan owes nothing.
    pub fn minimum_payment_for_balance(&self, balance: Money) -> Money {
        self.scheduled_minimum().min(balance)
    }

    /// declining-balance interest accrued over one cycle
    pub fn interest_on(&self, balance: Money) -> Money {
        Money::from_decimal(balance.as_decimal() * self.monthly_rate().as_decimal())
    }
}

/// builder for creating loans with validated terms
#[derive(Debug, Clone)]
pub struct LoanBuilder {
    name: String,
    principal: Option<Money>,
    apr: Rate,
    term_months: u32,
    minimum_payment: MinimumPayment,
}

impl LoanBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            principal: None,
            apr: Rate::ZERO,
            term_months: DEFAULT_TERM_MONTHS,
            minimum_payment: MinimumPayment::ComputeFromAmortization,
        }
    }

    pub fn principal(mut self, amount: Money) -> Self {
        self.principal = Some(amount);
        self
    }

    pub fn apr(mut self, rate: Rate) -> Self {
        self.apr = rate;
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = months;
        self
    }

    pub fn minimum_payment_override(mut self, amount: Money) -> Self {
        self.minimum_payment = MinimumPayment::Override(amount);
        self
    }

    pub fn build(self) -> Result<Loan> {
        let principal = self.principal.ok_or_else(|| PlanError::InvalidLoanTerms {
            message: format!("loan '{}' has no principal amount", self.name),
        })?;

        if !principal.is_positive() {
            return Err(PlanError::InvalidLoanTerms {
                message: format!("loan '{}' principal must be positive, got {}", self.name, principal),
            });
        }

        if self.apr.is_negative() {
            return Err(PlanError::InvalidLoanTerms {
                message: format!("loan '{}' apr must not be negative, got {}", self.name, self.apr),
            });
        }

        if self.term_months == 0 {
            return Err(PlanError::InvalidLoanTerms {
                message: format!("loan '{}' amortization horizon must be positive", self.name),
            });
        }

        if let MinimumPayment::Override(amount) = self.minimum_payment {
            if !amount.is_positive() {
                return Err(PlanError::InvalidLoanTerms {
                    message: format!(
                        "loan '{}' minimum payment override must be positive, got {}",
                        self.name, amount
                    ),
                });
            }
        }

        Ok(Loan {
            name: self.name,
            principal,
            apr: self.apr,
            term_months: self.term_months,
            minimum_payment: self.minimum_payment,
        })
    }
}
