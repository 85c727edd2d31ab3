use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{AdvisorError, Result};

use super::MAX_TERM_MONTHS;

/// reject caller contract violations before any computation
pub(crate) fn validate_loan_args(principal: Money, annual_rate: Rate, periods: u32) -> Result<()> {
    if !principal.is_positive() {
        return Err(AdvisorError::InvalidPrincipal { amount: principal });
    }
    if annual_rate.is_negative() || annual_rate > Rate::ONE {
        return Err(AdvisorError::InvalidRate { rate: annual_rate });
    }
    if periods == 0 || periods > MAX_TERM_MONTHS {
        return Err(AdvisorError::InvalidTerm {
            months: periods,
            max: MAX_TERM_MONTHS,
        });
    }
    Ok(())
}

/// (1 + r)^n by repeated multiplication; n is at most 360 so a single
/// linear pass keeps full Decimal precision
pub(crate) fn compound_factor(monthly_rate: Decimal, periods: u32) -> Decimal {
    let base = Decimal::ONE + monthly_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor *= base;
    }
    factor
}

/// monthly payment (EMI) for a fixed-rate fixed-term loan
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), degenerating to P / n when
/// the monthly rate is zero
pub fn payment(principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
    validate_loan_args(principal, annual_rate, periods)?;

    let monthly_rate = annual_rate.monthly_rate().as_decimal();
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let compound = compound_factor(monthly_rate, periods);
    let numerator = principal.as_decimal() * monthly_rate * compound;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

/// maximum principal affordable at a given monthly payment
///
/// exact algebraic inverse of `payment`:
/// P = PMT * ((1 + r)^n - 1) / (r * (1 + r)^n)
pub fn max_principal(payment: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
    if !payment.is_positive() {
        return Err(AdvisorError::InvalidPayment { amount: payment });
    }
    if annual_rate.is_negative() || annual_rate > Rate::ONE {
        return Err(AdvisorError::InvalidRate { rate: annual_rate });
    }
    if periods == 0 || periods > MAX_TERM_MONTHS {
        return Err(AdvisorError::InvalidTerm {
            months: periods,
            max: MAX_TERM_MONTHS,
        });
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();
    if monthly_rate.is_zero() {
        return Ok(payment * Decimal::from(periods));
    }

    let compound = compound_factor(monthly_rate, periods);
    let numerator = payment.as_decimal() * (compound - Decimal::ONE);
    let denominator = monthly_rate * compound;

    Ok(Money::from_decimal(numerator / denominator))
}

/// balance outstanding after `period` payments
///
/// B_k = P * (1 + r)^k - PMT * ((1 + r)^k - 1) / r, clamped at zero and
/// exactly zero once the full term has been paid
pub fn remaining_balance(
    principal: Money,
    annual_rate: Rate,
    period: u32,
    periods: u32,
) -> Result<Money> {
    validate_loan_args(principal, annual_rate, periods)?;
    if period > periods {
        return Err(AdvisorError::InvalidPeriod { period, periods });
    }
    if period == periods {
        return Ok(Money::ZERO);
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();
    if monthly_rate.is_zero() {
        let paid = principal / Decimal::from(periods) * Decimal::from(period);
        return Ok((principal - paid).max(Money::ZERO));
    }

    let pmt = payment(principal, annual_rate, periods)?;
    let compound_k = compound_factor(monthly_rate, period);
    let grown = principal.as_decimal() * compound_k;
    let repaid = pmt.as_decimal() * (compound_k - Decimal::ONE) / monthly_rate;

    Ok(Money::from_decimal(grown - repaid).max(Money::ZERO))
}

/// interest portion of the payment for one specific period (1-indexed)
pub fn interest_component(
    principal: Money,
    annual_rate: Rate,
    period: u32,
    periods: u32,
) -> Result<Money> {
    validate_loan_args(principal, annual_rate, periods)?;
    if period == 0 || period > periods {
        return Err(AdvisorError::InvalidPeriod { period, periods });
    }

    let monthly_rate = annual_rate.monthly_rate();
    if monthly_rate.is_zero() {
        return Ok(Money::ZERO);
    }

    let balance_before = remaining_balance(principal, annual_rate, period - 1, periods)?;
    Ok(balance_before * monthly_rate)
}

/// principal portion of the payment for one specific period (1-indexed);
/// together with the interest portion it always sums to the level payment
pub fn principal_component(
    principal: Money,
    annual_rate: Rate,
    period: u32,
    periods: u32,
) -> Result<Money> {
    validate_loan_args(principal, annual_rate, periods)?;
    if period == 0 || period > periods {
        return Err(AdvisorError::InvalidPeriod { period, periods });
    }

    let monthly_rate = annual_rate.monthly_rate();
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let pmt = payment(principal, annual_rate, periods)?;
    let interest = interest_component(principal, annual_rate, period, periods)?;
    Ok(pmt - interest)
}
