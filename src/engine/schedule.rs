use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;

use super::annuity::{payment, validate_loan_args};

/// one month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: Money,
    pub principal_component: Money,
    pub interest_component: Money,
    pub remaining_balance: Money,
}

/// full amortization schedule in a single forward accumulation pass
///
/// The running balance telescopes, so the principal components sum to the
/// original principal and the final balance lands on exactly zero: the last
/// payment is adjusted to clear whatever balance rounding left behind.
pub fn amortization_table(
    principal: Money,
    annual_rate: Rate,
    periods: u32,
) -> Result<Vec<AmortizationRow>> {
    validate_loan_args(principal, annual_rate, periods)?;

    let monthly_rate = annual_rate.monthly_rate();
    if monthly_rate.is_zero() {
        return Ok(zero_rate_table(principal, periods));
    }

    let pmt = payment(principal, annual_rate, periods)?;

    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for month in 1..=periods {
        let interest = balance * monthly_rate;
        let (paid, principal_portion) = if month == periods {
            // final payment clears the balance exactly
            (balance + interest, balance)
        } else {
            (pmt, pmt - interest)
        };

        let ending = (balance - principal_portion).max(Money::ZERO);
        rows.push(AmortizationRow {
            month,
            payment: paid,
            principal_component: principal_portion,
            interest_component: interest,
            remaining_balance: ending,
        });
        balance = ending;
    }

    Ok(rows)
}

/// zero-rate loans degenerate to equal installments of principal / periods
fn zero_rate_table(principal: Money, periods: u32) -> Vec<AmortizationRow> {
    let installment = principal / Decimal::from(periods);

    let mut rows = Vec::with_capacity(periods as usize);
    let mut balance = principal;

    for month in 1..=periods {
        let principal_portion = if month == periods { balance } else { installment };
        let ending = (balance - principal_portion).max(Money::ZERO);
        rows.push(AmortizationRow {
            month,
            payment: principal_portion,
            principal_component: principal_portion,
            interest_component: Money::ZERO,
            remaining_balance: ending,
        });
        balance = ending;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cent() -> Money {
        Money::from_str_exact("0.01").unwrap()
    }

    #[test]
    fn test_schedule_closure() {
        let principal = Money::from_major(50_000);
        let rate = Rate::from_decimal(dec!(0.05));

        let rows = amortization_table(principal, rate, 36).unwrap();
        assert_eq!(rows.len(), 36);

        // principal components sum back to the original principal
        let total_principal = rows
            .iter()
            .map(|r| r.principal_component)
            .fold(Money::ZERO, |acc, x| acc + x);
        assert!((total_principal - principal).abs() < cent());

        // final balance is exactly zero
        assert_eq!(rows.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_rows_internally_consistent() {
        let principal = Money::from_major(200_000);
        let rate = Rate::from_decimal(dec!(0.0449));

        let rows = amortization_table(principal, rate, 360).unwrap();

        let mut prev_balance = principal;
        for row in &rows {
            // each payment splits exactly into principal + interest
            assert!(
                (row.payment - row.principal_component - row.interest_component).abs() < cent()
            );
            // balance never increases
            assert!(row.remaining_balance <= prev_balance);
            prev_balance = row.remaining_balance;
        }
    }

    #[test]
    fn test_level_payments_except_last() {
        let rows = amortization_table(
            Money::from_major(50_000),
            Rate::from_decimal(dec!(0.05)),
            36,
        )
        .unwrap();

        let emi = rows[0].payment;
        for row in &rows[..35] {
            assert_eq!(row.payment, emi);
        }
        // last payment only differs by the rounding correction
        assert!((rows[35].payment - emi).abs() < Money::from_major(1));
    }

    #[test]
    fn test_zero_rate_schedule() {
        let rows = amortization_table(Money::from_major(12_000), Rate::ZERO, 12).unwrap();

        for row in &rows {
            assert_eq!(row.payment, Money::from_major(1_000));
            assert_eq!(row.interest_component, Money::ZERO);
        }
        assert_eq!(rows.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_interest_declines_over_term() {
        let rows = amortization_table(
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.06)),
            120,
        )
        .unwrap();

        for i in 1..rows.len() {
            assert!(rows[i].interest_component < rows[i - 1].interest_component);
        }
    }

    #[test]
    fn test_rejects_invalid_args() {
        assert!(amortization_table(Money::ZERO, Rate::from_percentage(5), 12).is_err());
        assert!(amortization_table(Money::from_major(1_000), Rate::from_percentage(5), 0).is_err());
    }
}
