use thiserror::Error;

use crate::decimal::Money;
use crate::types::{LoanId, Strategy};

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("invalid loan terms: {message}")]
    InvalidLoanTerms {
        message: String,
    },

    #[error("duplicate loan id: {id}")]
    DuplicateLoan {
        id: LoanId,
    },

    #[error("wallet has no loans registered")]
    NoLoans,

    #[error("insufficient budget: minimum payments require {required}, ceiling is {available}")]
    InsufficientBudget {
        required: Money,
        available: Money,
    },

    #[error("plan did not terminate within {months} months: {still_owed} still owed")]
    NonTerminatingPlan {
        months: u32,
        still_owed: Money,
    },

    #[error("strategy not implemented: {strategy}")]
    UnimplementedStrategy {
        strategy: Strategy,
    },
}

pub type Result<T> = std::result::Result<T, PlanError>;
