/// quick start - minimal example to get started
use debt_plan_rs::{render_plan, Loan, Money, Rate, Wallet};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 800/month to spend across two debts
    let mut wallet = Wallet::new(Money::from_major(800));

    wallet.add_loan(
        "car",
        Loan::builder("Car")
            .principal(Money::from_major(9_000))
            .apr(Rate::from_percent(dec!(6.5)))
            .term_months(48)
            .build()?,
    )?;

    wallet.add_loan(
        "card",
        Loan::builder("Credit Card")
            .principal(Money::from_major(2_500))
            .apr(Rate::from_percent(dec!(19.9)))
            .minimum_payment_override(Money::from_major(50))
            .build()?,
    )?;

    let plan = wallet.generate_debt_snowball_plan()?;
    println!("{}", render_plan(&wallet, &plan));

    Ok(())
}
