/// an infeasible budget fails with a reason instead of looping forever
use debt_plan_rs::{Loan, Money, Rate, Wallet};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // minimum payments alone need 350/month; the budget offers 200
    let mut wallet = Wallet::new(Money::from_major(200));

    wallet.add_loan(
        "mortgage",
        Loan::builder("Mortgage")
            .principal(Money::from_major(50_000))
            .apr(Rate::from_percent(dec!(5.5)))
            .term_months(240)
            .minimum_payment_override(Money::from_major(250))
            .build()?,
    )?;
    wallet.add_loan(
        "card",
        Loan::builder("Credit Card")
            .principal(Money::from_major(4_000))
            .apr(Rate::from_percent(dec!(22)))
            .minimum_payment_override(Money::from_major(100))
            .build()?,
    )?;

    match wallet.generate_debt_avalanche_plan() {
        Ok(plan) => println!("paid off in {} months", plan.months),
        Err(err) => println!("plan failed: {err}"),
    }

    Ok(())
}
