//! Quick start: compute a loan payment and check affordability.

use loan_advisor_rs::{LoanCalculator, LoanRequest, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = LoanCalculator::default();

    let request = LoanRequest::new(
        Money::from_major(50_000),
        Rate::from_decimal(dec!(0.05)),
        36,
    )?
    .with_income(Money::from_major(10_000))?;

    let result = calculator.compute(&request)?;
    println!("Monthly payment:  {}", result.monthly_payment.to_cents());
    println!("Total payment:    {}", result.total_payment.to_cents());
    println!("Total interest:   {}", result.total_interest.to_cents());

    let affordability = calculator.check_affordability(&request, Money::from_major(500))?;
    println!("\n{}", affordability.message);

    Ok(())
}
