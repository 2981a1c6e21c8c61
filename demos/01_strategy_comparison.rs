/// run the same wallet under each strategy and compare the outcomes
use debt_plan_rs::{Loan, Money, Rate, Strategy, Wallet};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut wallet = Wallet::new(Money::from_major(600));

    wallet.add_loan(
        "student",
        Loan::builder("Student Loan")
            .principal(Money::from_major(18_000))
            .apr(Rate::from_percent(dec!(4.5)))
            .term_months(120)
            .build()?,
    )?;
    wallet.add_loan(
        "card",
        Loan::builder("Credit Card")
            .principal(Money::from_major(3_200))
            .apr(Rate::from_percent(dec!(21.9)))
            .minimum_payment_override(Money::from_major(64))
            .build()?,
    )?;
    wallet.add_loan(
        "car",
        Loan::builder("Car")
            .principal(Money::from_major(7_500))
            .apr(Rate::from_percent(dec!(7.9)))
            .term_months(60)
            .build()?,
    )?;

    println!("{:<16} {:>8} {:>16}", "Strategy", "Months", "Total Interest");
    for strategy in [Strategy::Snowball, Strategy::Avalanche, Strategy::Spiral] {
        let plan = wallet.generate_plan(strategy)?;
        println!(
            "{:<16} {:>8} {:>16}",
            strategy.label(),
            plan.months,
            format!("{:.2}", plan.total_interest.round_dp(2).as_decimal()),
        );
    }

    Ok(())
}
