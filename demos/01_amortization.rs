//! Amortization schedule: month-by-month payment breakdown.

use loan_advisor_rs::{LoanCalculator, LoanRequest, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = LoanCalculator::default();
    let request = LoanRequest::new(
        Money::from_major(200_000),
        Rate::from_decimal(dec!(0.0449)),
        360,
    )?;

    let schedule = calculator.schedule(&request)?;
    println!(
        "Loan of {} at {} over {} months, {} / month\n",
        schedule.summary.principal,
        schedule.summary.annual_rate,
        schedule.summary.term_months,
        schedule.summary.monthly_payment.to_cents()
    );

    println!("month  payment      principal    interest     balance");
    for row in schedule.rows.iter().take(3) {
        println!(
            "{:>5}  {:>11}  {:>11}  {:>11}  {:>11}",
            row.month,
            row.payment.to_cents(),
            row.principal_component.to_cents(),
            row.interest_component.to_cents(),
            row.remaining_balance.to_cents()
        );
    }
    println!("  ...");
    let last = schedule.rows.last().unwrap();
    println!(
        "{:>5}  {:>11}  {:>11}  {:>11}  {:>11}",
        last.month,
        last.payment.to_cents(),
        last.principal_component.to_cents(),
        last.interest_component.to_cents(),
        last.remaining_balance.to_cents()
    );

    Ok(())
}
