//! Home affordability and mortgage quoting under the LTV rule table.

use loan_advisor_rs::{
    MortgageCalculator, MortgageQuote, Money, PropertyType, Residency,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = MortgageCalculator::default();

    let affordability = calculator.home_affordability(
        Money::from_major(35_000),
        Money::from_major(2_000),
        None, // base mortgage rate
        300,
        Some(Residency::Expat),
        Some(PropertyType::First),
        Money::ZERO,
    )?;
    println!("{}\n", affordability.message);

    // quote a specific home with a thin down payment
    let quote = calculator.payment_quote(
        Money::from_major(2_000_000),
        Some(Money::from_major(150_000)),
        None,
        300,
        Some(Residency::Expat),
        Some(PropertyType::First),
    )?;

    match quote {
        MortgageQuote::Approved(terms) => {
            println!(
                "Approved: {} / month at LTV {}",
                terms.monthly_payment, terms.ltv_ratio
            );
        }
        MortgageQuote::Rejected { message } => println!("Rejected: {message}"),
    }

    Ok(())
}
