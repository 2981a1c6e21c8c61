use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::allocator::allocate_month;
use crate::config::PlanConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{PlanError, Result};
use crate::events::{Event, EventStore};
use crate::loan::Loan;
use crate::strategy;
use crate::types::{LoanId, PlanId, Strategy};

#[derive(Debug, Clone)]
struct LoanEntry {
    id: LoanId,
    loan: Loan,
}

/// completed-run result: three parallel histories plus totals
///
/// For every loan id the balance, payment, and interest sequences all have
/// length `months`. Balance entries are pre-payment snapshots; interest
/// entries are accrued on the post-payment balance of the same month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub plan_id: PlanId,
    pub strategy: Strategy,
    pub months: u32,
    pub loan_ids: Vec<LoanId>,
    pub balance_history: BTreeMap<LoanId, Vec<Money>>,
    pub payment_history: BTreeMap<LoanId, Vec<Money>>,
    pub interest_history: BTreeMap<LoanId, Vec<Money>>,
    pub total_paid: Money,
    pub total_interest: Money,
}

impl PaymentPlan {
    pub fn balance_history(&self, id: &str) -> Option<&[Money]> {
        self.balance_history.get(id).map(Vec::as_slice)
    }

    pub fn payment_history(&self, id: &str) -> Option<&[Money]> {
        self.payment_history.get(id).map(Vec::as_slice)
    }

    pub fn interest_history(&self, id: &str) -> Option<&[Money]> {
        self.interest_history.get(id).map(Vec::as_slice)
    }

    /// total paid across all loans in one month (0-based index)
    pub fn total_paid_in_month(&self, month: usize) -> Money {
        self.payment_history
            .values()
            .filter_map(|series| series.get(month))
            .copied()
            .sum()
    }

    /// total owed across all loans at the start of one month (0-based index)
    pub fn total_owed_in_month(&self, month: usize) -> Money {
        self.balance_history
            .values()
            .filter_map(|series| series.get(month))
            .copied()
            .sum()
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// simulation engine owning a loan collection and a monthly budget
///
/// Each `generate_*` call replays the full payoff from scratch on an owned
/// balance snapshot, so one wallet can be run under several strategies for
/// comparison; the stored plan and event log are overwritten per run.
#[derive(Debug)]
pub struct Wallet {
    loans: Vec<LoanEntry>,
    budget_ceiling: Money,
    config: PlanConfig,
    events: EventStore,
    last_plan: Option<PaymentPlan>,
}

impl Wallet {
    pub fn new(budget_ceiling: Money) -> Self {
        Self::with_config(budget_ceiling, PlanConfig::default())
    }

    pub fn with_config(budget_ceiling: Money, config: PlanConfig) -> Self {
        Self {
            loans: Vec::new(),
            budget_ceiling,
            config,
            events: EventStore::new(),
            last_plan: None,
        }
    }

    /// register a loan; ids must be unique, insertion order is the ranking tie-break
    pub fn add_loan(&mut self, id: impl Into<LoanId>, loan: Loan) -> Result<()> {
        let id = id.into();
        if self.loans.iter().any(|entry| entry.id == id) {
            return Err(PlanError::DuplicateLoan { id });
        }
        self.loans.push(LoanEntry { id, loan });
        Ok(())
    }

    pub fn loan(&self, id: &str) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.loan)
    }

    pub fn loans(&self) -> impl Iterator<Item = (&str, &Loan)> {
        self.loans.iter().map(|entry| (entry.id.as_str(), &entry.loan))
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn budget_ceiling(&self) -> Money {
        self.budget_ceiling
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn total_principal(&self) -> Money {
        self.loans.iter().map(|entry| entry.loan.principal()).sum()
    }

    /// plan stored by the most recent successful run
    pub fn last_plan(&self) -> Option<&PaymentPlan> {
        self.last_plan.as_ref()
    }

    /// events emitted by the most recent run
    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn generate_plan(&mut self, strategy: Strategy) -> Result<PaymentPlan> {
        self.run(strategy)
    }

    pub fn generate_debt_snowball_plan(&mut self) -> Result<PaymentPlan> {
        self.run(Strategy::Snowball)
    }

    pub fn generate_debt_avalanche_plan(&mut self) -> Result<PaymentPlan> {
        self.run(Strategy::Avalanche)
    }

    pub fn generate_debt_spiral_plan(&mut self) -> Result<PaymentPlan> {
        self.run(Strategy::Spiral)
    }

    pub fn generate_debt_optimized_plan(&mut self) -> Result<PaymentPlan> {
        self.run(Strategy::Optimized)
    }

    fn run(&mut self, strategy: Strategy) -> Result<PaymentPlan> {
        self.events.clear();
        if self.loans.is_empty() {
            return Err(PlanError::NoLoans);
        }
        strategy::validate(strategy)?;

        let plan_id = Uuid::new_v4();
        let count = self.loans.len();
        let aprs: Vec<Rate> = self.loans.iter().map(|e| e.loan.apr()).collect();
        let scheduled_minimums: Vec<Money> = self
            .loans
            .iter()
            .map(|e| e.loan.scheduled_minimum())
            .collect();

        // owned snapshot: loan definitions are never mutated by a run
        let mut balances: Vec<Money> = self.loans.iter().map(|e| e.loan.principal()).collect();
        let mut balance_history: Vec<Vec<Money>> = vec![Vec::new(); count];
        let mut payment_history: Vec<Vec<Money>> = vec![Vec::new(); count];
        let mut interest_history: Vec<Vec<Money>> = vec![Vec::new(); count];
        let mut paid_off = vec![false; count];
        let mut months: u32 = 0;

        self.events.emit(Event::PlanStarted {
            plan_id,
            strategy,
            total_principal: balances.iter().copied().sum(),
        });

        loop {
            let total_owed: Money = balances.iter().copied().sum();
            if total_owed.is_zero() {
                break;
            }
            if months >= self.config.max_months {
                return Err(PlanError::NonTerminatingPlan {
                    months,
                    still_owed: total_owed,
                });
            }

            for (series, &balance) in balance_history.iter_mut().zip(&balances) {
                series.push(balance);
            }

            let priority = strategy::priority_order(strategy, &aprs, &balances)?;
            let payments =
                allocate_month(&scheduled_minimums, &balances, self.budget_ceiling, &priority)?;

            for idx in 0..count {
                payment_history[idx].push(payments[idx]);
                balances[idx] -= payments[idx];
                if !paid_off[idx] && balances[idx].is_zero() {
                    paid_off[idx] = true;
                    self.events.emit(Event::LoanPaidOff {
                        plan_id,
                        loan_id: self.loans[idx].id.clone(),
                        month: months + 1,
                    });
                }
            }

            for idx in 0..count {
                let interest = self.loans[idx].loan.interest_on(balances[idx]);
                interest_history[idx].push(interest);
                balances[idx] += interest;
            }

            months += 1;
            debug!(
                month = months,
                total_owed = %balances.iter().copied().sum::<Money>(),
                "month simulated"
            );
        }

        let total_paid: Money = payment_history.iter().flatten().copied().sum();
        let total_interest: Money = interest_history.iter().flatten().copied().sum();

        let loan_ids: Vec<LoanId> = self.loans.iter().map(|e| e.id.clone()).collect();
        let plan = PaymentPlan {
            plan_id,
            strategy,
            months,
            loan_ids: loan_ids.clone(),
            balance_history: loan_ids.iter().cloned().zip(balance_history).collect(),
            payment_history: loan_ids.iter().cloned().zip(payment_history).collect(),
            interest_history: loan_ids.iter().cloned().zip(interest_history).collect(),
            total_paid,
            total_interest,
        };

        self.events.emit(Event::PlanCompleted {
            plan_id,
            strategy,
            months,
            total_interest,
        });
        info!(%plan_id, strategy = %strategy, months, "plan completed");

        self.last_plan = Some(plan.clone());
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(amount: i64) -> Money {
        Money::from_major(amount)
    }

    fn zero_rate_loan(name: &str, principal: i64, term_months: u32) -> Loan {
        Loan::builder(name)
            .principal(money(principal))
            .term_months(term_months)
            .build()
            .unwrap()
    }

    fn two_loan_wallet() -> Wallet {
        // A(500, 0%, min 50), B(1000, 0%, min 50), budget 150
        let mut wallet = Wallet::new(money(150));
        wallet
            .add_loan(
                "a",
                Loan::builder("Loan A")
                    .principal(money(500))
                    .minimum_payment_override(money(50))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        wallet
            .add_loan(
                "b",
                Loan::builder("Loan B")
                    .principal(money(1000))
                    .minimum_payment_override(money(50))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        wallet
    }

    #[test]
    fn test_single_zero_rate_loan() {
        // 1200 at 0% over 12 months with a 100 budget: 12 even payments, no interest
        let mut wallet = Wallet::new(money(100));
        wallet.add_loan("student", zero_rate_loan("Student", 1200, 12)).unwrap();

        let plan = wallet.generate_debt_snowball_plan().unwrap();

        assert_eq!(plan.months, 12);
        assert_eq!(plan.total_paid, money(1200));
        assert_eq!(plan.total_interest, Money::ZERO);

        let payments = plan.payment_history("student").unwrap();
        assert_eq!(payments.len(), 12);
        assert!(payments.iter().all(|&p| p == money(100)));

        let balances = plan.balance_history("student").unwrap();
        assert_eq!(balances[0], money(1200));
        assert_eq!(balances[11], money(100));

        let interest = plan.interest_history("student").unwrap();
        assert!(interest.iter().all(|i| i.is_zero()));
    }

    #[test]
    fn test_snowball_first_month_allocation() {
        let mut wallet = two_loan_wallet();
        let plan = wallet.generate_debt_snowball_plan().unwrap();

        // minimums take 100, the spare 50 goes to A (smaller balance)
        assert_eq!(plan.payment_history("a").unwrap()[0], money(100));
        assert_eq!(plan.payment_history("b").unwrap()[0], money(50));

        // balances at the start of month 2
        assert_eq!(plan.balance_history("a").unwrap()[1], money(400));
        assert_eq!(plan.balance_history("b").unwrap()[1], money(950));
    }

    #[test]
    fn test_snowball_two_loan_full_run() {
        let mut wallet = two_loan_wallet();
        let plan = wallet.generate_debt_snowball_plan().unwrap();

        // 1500 total at 150/month, zero interest
        assert_eq!(plan.months, 10);
        assert_eq!(plan.total_paid, money(1500));

        // budget is met exactly every month, final month included
        for month in 0..plan.months as usize {
            assert_eq!(plan.total_paid_in_month(month), money(150));
        }

        let events = wallet.events();
        assert!(events.contains(&Event::LoanPaidOff {
            plan_id: plan.plan_id,
            loan_id: "a".to_string(),
            month: 5,
        }));
        assert!(events.contains(&Event::LoanPaidOff {
            plan_id: plan.plan_id,
            loan_id: "b".to_string(),
            month: 10,
        }));
    }

    #[test]
    fn test_histories_are_parallel_and_terminal() {
        let mut wallet = Wallet::new(money(400));
        for (id, principal, apr) in [("card", 2000, dec!(19.9)), ("car", 5000, dec!(6.5)), ("loan", 1500, dec!(11))] {
            wallet
                .add_loan(
                    id,
                    Loan::builder(id)
                        .principal(money(principal))
                        .apr(Rate::from_percent(apr))
                        .term_months(48)
                        .build()
                        .unwrap(),
                )
                .unwrap();
        }

        let plan = wallet.generate_debt_avalanche_plan().unwrap();
        let months = plan.months as usize;
        assert!(months > 0);

        for id in &plan.loan_ids {
            assert_eq!(plan.balance_history(id).unwrap().len(), months);
            assert_eq!(plan.payment_history(id).unwrap().len(), months);
            assert_eq!(plan.interest_history(id).unwrap().len(), months);

            // every loan ends cleared: its last payment covers its last balance
            let last_balance = plan.balance_history(id).unwrap()[months - 1];
            let last_payment = plan.payment_history(id).unwrap()[months - 1];
            assert_eq!(last_balance, last_payment);
        }

        // monthly payment totals never exceed the ceiling, and meet it
        // every month except possibly the last
        for month in 0..months {
            assert!(plan.total_paid_in_month(month) <= wallet.budget_ceiling());
        }
        for month in 0..months - 1 {
            assert_eq!(plan.total_paid_in_month(month), wallet.budget_ceiling());
        }
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut wallet = two_loan_wallet();
        let first = wallet.generate_debt_snowball_plan().unwrap();
        let second = wallet.generate_debt_snowball_plan().unwrap();

        assert_eq!(first.months, second.months);
        assert_eq!(first.balance_history, second.balance_history);
        assert_eq!(first.payment_history, second.payment_history);
        assert_eq!(first.interest_history, second.interest_history);
        assert_eq!(first.total_paid, second.total_paid);
        assert_eq!(first.total_interest, second.total_interest);
    }

    #[test]
    fn test_avalanche_beats_snowball_on_interest() {
        let build = || {
            let mut wallet = Wallet::new(money(300));
            wallet
                .add_loan(
                    "small-low",
                    Loan::builder("Small Low")
                        .principal(money(500))
                        .apr(Rate::from_percent(dec!(1)))
                        .build()
                        .unwrap(),
                )
                .unwrap();
            wallet
                .add_loan(
                    "big-high",
                    Loan::builder("Big High")
                        .principal(money(5000))
                        .apr(Rate::from_percent(dec!(20)))
                        .build()
                        .unwrap(),
                )
                .unwrap();
            wallet
        };

        let snowball = build().generate_debt_snowball_plan().unwrap();
        let avalanche = build().generate_debt_avalanche_plan().unwrap();

        assert!(avalanche.total_interest < snowball.total_interest);
    }

    #[test]
    fn test_insufficient_budget_surfaces() {
        let mut wallet = Wallet::new(money(150));
        wallet
            .add_loan(
                "a",
                Loan::builder("A")
                    .principal(money(5000))
                    .minimum_payment_override(money(100))
                    .build()
                    .unwrap(),
            )
            .unwrap();
        wallet
            .add_loan(
                "b",
                Loan::builder("B")
                    .principal(money(5000))
                    .minimum_payment_override(money(100))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let result = wallet.generate_debt_snowball_plan();
        match result {
            Err(PlanError::InsufficientBudget { required, available }) => {
                assert_eq!(required, money(200));
                assert_eq!(available, money(150));
            }
            other => panic!("expected InsufficientBudget, got {other:?}"),
        }
        assert!(wallet.last_plan().is_none());
    }

    #[test]
    fn test_non_terminating_plan_is_capped() {
        // 10/month against 10%/month interest on 1000: the balance only grows
        let mut wallet = Wallet::with_config(money(10), PlanConfig::new().max_months(24));
        wallet
            .add_loan(
                "runaway",
                Loan::builder("Runaway")
                    .principal(money(1000))
                    .apr(Rate::from_percent(dec!(120)))
                    .minimum_payment_override(money(10))
                    .build()
                    .unwrap(),
            )
            .unwrap();

        let result = wallet.generate_debt_snowball_plan();
        match result {
            Err(PlanError::NonTerminatingPlan { months, still_owed }) => {
                assert_eq!(months, 24);
                assert!(still_owed > money(1000));
            }
            other => panic!("expected NonTerminatingPlan, got {other:?}"),
        }
    }

    #[test]
    fn test_optimized_strategy_errors() {
        let mut wallet = two_loan_wallet();
        let result = wallet.generate_debt_optimized_plan();
        assert!(matches!(
            result,
            Err(PlanError::UnimplementedStrategy { strategy: Strategy::Optimized })
        ));
        assert!(wallet.events().is_empty());
    }

    #[test]
    fn test_empty_wallet_rejected() {
        let mut wallet = Wallet::new(money(100));
        assert!(matches!(
            wallet.generate_debt_snowball_plan(),
            Err(PlanError::NoLoans)
        ));
    }

    #[test]
    fn test_duplicate_loan_rejected() {
        let mut wallet = Wallet::new(money(100));
        wallet.add_loan("car", zero_rate_loan("Car", 500, 10)).unwrap();
        let result = wallet.add_loan("car", zero_rate_loan("Car again", 700, 10));
        assert!(matches!(result, Err(PlanError::DuplicateLoan { id }) if id == "car"));
        assert_eq!(wallet.loan_count(), 1);
    }

    #[test]
    fn test_lifecycle_events() {
        let mut wallet = Wallet::new(money(100));
        wallet.add_loan("student", zero_rate_loan("Student", 1200, 12)).unwrap();

        let plan = wallet.generate_debt_snowball_plan().unwrap();
        let events = wallet.events();

        assert!(matches!(events.first(), Some(Event::PlanStarted { .. })));
        assert!(events.contains(&Event::LoanPaidOff {
            plan_id: plan.plan_id,
            loan_id: "student".to_string(),
            month: 12,
        }));
        assert!(matches!(
            events.last(),
            Some(Event::PlanCompleted { months: 12, .. })
        ));
    }

    #[test]
    fn test_last_plan_is_overwritten() {
        let mut wallet = two_loan_wallet();
        wallet.generate_debt_snowball_plan().unwrap();
        wallet.generate_debt_avalanche_plan().unwrap();

        assert_eq!(wallet.last_plan().unwrap().strategy, Strategy::Avalanche);
    }

    #[test]
    fn test_plan_serializes_to_json() {
        let mut wallet = two_loan_wallet();
        let plan = wallet.generate_debt_snowball_plan().unwrap();

        let json = plan.to_json_pretty().unwrap();
        assert!(json.contains("Snowball"));
        assert!(json.contains("\"a\""));
        assert!(json.contains("\"b\""));
    }
}
