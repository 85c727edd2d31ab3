use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::engine::annuity;
use crate::errors::{AdvisorError, Result};

/// outcome of an early payoff simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyPayoffResult {
    pub original_term_months: u32,
    pub new_term_months: u32,
    pub months_saved: u32,
    pub years_saved: Decimal,
    pub original_monthly_payment: Money,
    pub new_monthly_payment: Money,
    pub extra_monthly_payment: Money,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_saved: Money,
    pub message: String,
}

/// Simulate paying `extra_monthly_payment` on top of the scheduled
/// installment. This is a month-by-month balance walk rather than a closed
/// form: the stopping point depends on when the balance actually reaches
/// zero, which can be well before the scheduled term.
pub fn early_payoff(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    extra_monthly_payment: Money,
) -> Result<EarlyPayoffResult> {
    if extra_monthly_payment.is_negative() {
        return Err(AdvisorError::InvalidPayment {
            amount: extra_monthly_payment,
        });
    }

    let original_payment = annuity::payment(principal, annual_rate, term_months)?;
    let original_total_interest = original_payment * Decimal::from(term_months) - principal;

    let monthly_rate = annual_rate.monthly_rate();
    let total_payment = original_payment + extra_monthly_payment;

    let mut balance = principal;
    let mut months_paid = 0u32;
    let mut total_interest_paid = Money::ZERO;

    while balance.is_positive() && months_paid < term_months {
        months_paid += 1;
        let interest = balance * monthly_rate;
        total_interest_paid += interest;
        let principal_paid = (total_payment - interest).min(balance);
        balance = (balance - principal_paid).max(Money::ZERO);
    }

    let months_saved = term_months - months_paid;
    let interest_saved = original_total_interest - total_interest_paid;

    debug!(
        months_paid,
        months_saved,
        interest_saved = %interest_saved,
        "early payoff simulation"
    );

    Ok(EarlyPayoffResult {
        original_term_months: term_months,
        new_term_months: months_paid,
        months_saved,
        years_saved: (Decimal::from(months_saved) / Decimal::from(12)).round_dp(1),
        original_monthly_payment: original_payment.to_cents(),
        new_monthly_payment: total_payment.to_cents(),
        extra_monthly_payment,
        original_total_interest: original_total_interest.to_cents(),
        new_total_interest: total_interest_paid.to_cents(),
        interest_saved: interest_saved.to_cents(),
        message: format!(
            "Paying an extra {} per month saves {} in interest and clears the loan {} months early.",
            extra_monthly_payment.to_cents(),
            interest_saved.round_dp(0),
            months_saved
        ),
    })
}
