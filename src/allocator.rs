use crate::decimal::Money;
use crate::errors::{PlanError, Result};

/// distribute one month's budget across loans
///
/// Every loan is seeded with its minimum clamped to its balance, then the
/// leftover budget walks the priority order: a loan whose minimum already
/// covers its balance is skipped, the first loan the leftover cannot fully
/// clear absorbs all of it, and a loan the leftover does clear is paid off
/// with the walk continuing on the remainder.
///
/// Guarantees: the payments sum to at most `budget_ceiling`, with equality
/// unless every balance clears first, and no payment exceeds its loan's
/// balance.
pub fn allocate_month(
    scheduled_minimums: &[Money],
    balances: &[Money],
    budget_ceiling: Money,
    priority: &[usize],
) -> Result<Vec<Money>> {
    debug_assert_eq!(scheduled_minimums.len(), balances.len());

    let mut payments: Vec<Money> = scheduled_minimums
        .iter()
        .zip(balances)
        .map(|(&minimum, &balance)| minimum.min(balance))
        .collect();

    let minimum_total: Money = payments.iter().copied().sum();
    if minimum_total > budget_ceiling {
        return Err(PlanError::InsufficientBudget {
            required: minimum_total,
            available: budget_ceiling,
        });
    }

    let mut amount_left = budget_ceiling - minimum_total;
    for &idx in priority {
        let remaining_need = balances[idx] - payments[idx];
        if remaining_need.is_zero() {
            continue;
        }
        if amount_left <= remaining_need {
            payments[idx] += amount_left;
            break;
        }
        payments[idx] += remaining_need;
        amount_left -= remaining_need;
    }

    Ok(payments)
}
