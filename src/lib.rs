pub mod allocator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod loan;
pub mod report;
pub mod strategy;
pub mod types;
pub mod wallet;

// re-export key types
pub use config::PlanConfig;
pub use decimal::{Money, Rate};
pub use errors::{PlanError, Result};
pub use events::{Event, EventStore};
pub use loan::{Loan, LoanBuilder};
pub use report::render_plan;
pub use types::{LoanId, MinimumPayment, PlanId, Strategy};
pub use wallet::{PaymentPlan, Wallet};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
