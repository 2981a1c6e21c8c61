use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{PlanError, Result};
use crate::types::Strategy;

/// reject strategies that are declared but carry no ranking yet
pub fn validate(strategy: Strategy) -> Result<()> {
    match strategy {
        Strategy::Optimized => Err(PlanError::UnimplementedStrategy { strategy }),
        _ => Ok(()),
    }
}

/// total order over loan indices for one month's allocation
///
/// Stable sorts keyed by the strategy metric; equal keys keep wallet
/// insertion order. Every loan is ranked, cleared ones included — the
/// allocator skips loans with no remaining need.
pub fn priority_order(strategy: Strategy, aprs: &[Rate], balances: &[Money]) -> Result<Vec<usize>> {
    debug_assert_eq!(aprs.len(), balances.len());
    let mut order: Vec<usize> = (0..balances.len()).collect();

    match strategy {
        Strategy::Snowball => {
            order.sort_by_key(|&i| balances[i]);
        }
        Strategy::Avalanche => {
            order.sort_by(|&a, &b| aprs[b].cmp(&aprs[a]));
        }
        Strategy::Spiral => {
            order.sort_by_key(|&i| spiral_key(balances[i], aprs[i]));
        }
        Strategy::Optimized => {
            return Err(PlanError::UnimplementedStrategy { strategy });
        }
    }

    Ok(order)
}

/// smallest balance-to-rate ratio first; a zero-rate loan has an unbounded
/// ratio and sorts after every finite one
fn spiral_key(balance: Money, apr: Rate) -> (u8, Decimal) {
    if apr.is_zero() {
        (1, Decimal::ZERO)
    } else {
        (0, balance.as_decimal() / apr.as_decimal())
    }
}
