//! Eligibility screening for a personal loan application.

use loan_advisor_rs::{
    ApplicantProfile, EligibilityChecker, EmploymentStatus, Money,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let applicant = ApplicantProfile::new(
        35,
        Money::from_major(10_000),
        720,
        EmploymentStatus::FullTime,
        dec!(5),
        Money::from_major(1_500),
        Money::from_major(50_000),
        36,
        false,
        false,
    )?;

    let result = EligibilityChecker::default().check(&applicant)?;

    println!("Status: {} (score {})", result.status, result.score);
    for reason in &result.reasons {
        println!("  - {reason}");
    }
    for recommendation in &result.recommendations {
        println!("  > {recommendation}");
    }

    Ok(())
}
