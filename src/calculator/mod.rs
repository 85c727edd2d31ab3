pub mod auto;
pub mod mortgage;
pub mod payoff;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AdvisorConfig;
use crate::decimal::{Money, Rate};
use crate::engine::{AmortizationRow, FinancialEngine, MAX_TERM_MONTHS};
use crate::errors::{AdvisorError, Result};
use crate::types::LoanType;

pub use auto::{AutoLoanCalculator, CarLoanQuote, CarLoanTerms};
pub use mortgage::{HomeAffordability, MortgageCalculator, MortgageQuote, MortgageTerms};
pub use payoff::{early_payoff, EarlyPayoffResult};

/// Validated loan calculation request. Immutable value object: constructed
/// per call, no identity beyond its field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    monthly_income: Option<Money>,
}

impl LoanRequest {
    /// construct a request, rejecting out-of-range inputs up front
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        if !principal.is_positive() {
            return Err(AdvisorError::InvalidPrincipal { amount: principal });
        }
        if annual_rate.is_negative() || annual_rate > Rate::ONE {
            return Err(AdvisorError::InvalidRate { rate: annual_rate });
        }
        if term_months == 0 || term_months > MAX_TERM_MONTHS {
            return Err(AdvisorError::InvalidTerm {
                months: term_months,
                max: MAX_TERM_MONTHS,
            });
        }
        Ok(Self {
            principal,
            annual_rate,
            term_months,
            monthly_income: None,
        })
    }

    /// attach monthly income for affordability checks
    pub fn with_income(mut self, monthly_income: Money) -> Result<Self> {
        if !monthly_income.is_positive() {
            return Err(AdvisorError::InvalidIncome {
                amount: monthly_income,
            });
        }
        self.monthly_income = Some(monthly_income);
        Ok(self)
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    pub fn monthly_income(&self) -> Option<Money> {
        self.monthly_income
    }
}

/// summary of a single loan calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculationResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub principal: Money,
    pub term_months: u32,
    pub annual_rate: Rate,
    pub monthly_rate: Rate,
}

/// amortization schedule plus its summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub rows: Vec<AmortizationRow>,
    pub summary: LoanCalculationResult,
}

/// affordability assessment; `affordable` is `None` when no income was
/// supplied, which is indeterminate rather than a failed check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub affordable: Option<bool>,
    pub monthly_payment: Option<Money>,
    pub monthly_income: Option<Money>,
    pub existing_debt: Money,
    pub total_monthly_debt: Option<Money>,
    pub dti_ratio: Option<Rate>,
    pub max_recommended_dti: Rate,
    pub message: String,
}

/// one entry of a term comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermComparison {
    pub term_months: u32,
    pub term_years: Decimal,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// total interest as a percentage of the principal
    pub interest_percentage: Decimal,
    /// interest avoided relative to the longest term in the comparison set
    pub interest_saved_vs_longest: Money,
}

/// reverse affordability: the largest principal the income supports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxLoanResult {
    pub max_principal: Money,
    pub max_monthly_payment: Money,
    pub monthly_income: Money,
    pub existing_debt: Money,
    pub dti_ratio: Rate,
    pub term_months: u32,
    pub annual_rate: Rate,
    pub message: String,
}

/// Loan payment and affordability calculator. Holds only the DTI ceiling;
/// all numeric work is delegated to the financial engine.
#[derive(Debug, Clone, Copy)]
pub struct LoanCalculator {
    max_dti_ratio: Rate,
    engine: FinancialEngine,
}

impl Default for LoanCalculator {
    fn default() -> Self {
        Self::new(Rate::from_decimal(rust_decimal_macros::dec!(0.50)))
    }
}

impl LoanCalculator {
    pub fn new(max_dti_ratio: Rate) -> Self {
        Self {
            max_dti_ratio,
            engine: FinancialEngine::new(),
        }
    }

    /// calculator configured with the DTI ceiling of a specific loan product
    pub fn for_loan_type(loan_type: LoanType, config: &AdvisorConfig) -> Self {
        Self::new(config.loan_policy(loan_type).max_dti_ratio)
    }

    pub fn max_dti_ratio(&self) -> Rate {
        self.max_dti_ratio
    }

    /// monthly payment and totals for a loan request
    pub fn compute(&self, request: &LoanRequest) -> Result<LoanCalculationResult> {
        debug!(
            principal = %request.principal,
            rate = %request.annual_rate,
            term = request.term_months,
            "computing loan payment"
        );

        let monthly_payment =
            self.engine
                .payment(request.principal, request.annual_rate, request.term_months)?;
        let total_payment = monthly_payment * Decimal::from(request.term_months);
        let total_interest = total_payment - request.principal;

        Ok(LoanCalculationResult {
            monthly_payment,
            total_payment,
            total_interest,
            principal: request.principal,
            term_months: request.term_months,
            annual_rate: request.annual_rate,
            monthly_rate: request.annual_rate.monthly_rate(),
        })
    }

    /// month-by-month amortization schedule with summary
    pub fn schedule(&self, request: &LoanRequest) -> Result<ScheduleResult> {
        let summary = self.compute(request)?;
        let rows = self.engine.amortization_table(
            request.principal,
            request.annual_rate,
            request.term_months,
        )?;

        Ok(ScheduleResult { rows, summary })
    }

    /// DTI-based affordability check against the request's income
    pub fn check_affordability(
        &self,
        request: &LoanRequest,
        existing_monthly_debt: Money,
    ) -> Result<AffordabilityResult> {
        if existing_monthly_debt.is_negative() {
            return Err(AdvisorError::InvalidDebt {
                amount: existing_monthly_debt,
            });
        }

        let Some(income) = request.monthly_income else {
            return Ok(AffordabilityResult {
                affordable: None,
                monthly_payment: None,
                monthly_income: None,
                existing_debt: existing_monthly_debt,
                total_monthly_debt: None,
                dti_ratio: None,
                max_recommended_dti: self.max_dti_ratio,
                message: "Monthly income required for affordability check".to_string(),
            });
        };

        let calculation = self.compute(request)?;
        let total_monthly_debt = calculation.monthly_payment + existing_monthly_debt;
        let dti_ratio = total_monthly_debt.ratio_to(income);
        let affordable = dti_ratio <= self.max_dti_ratio;

        debug!(dti = %dti_ratio, affordable, "affordability check");

        Ok(AffordabilityResult {
            affordable: Some(affordable),
            monthly_payment: Some(calculation.monthly_payment),
            monthly_income: Some(income),
            existing_debt: existing_monthly_debt,
            total_monthly_debt: Some(total_monthly_debt),
            dti_ratio: Some(dti_ratio),
            max_recommended_dti: self.max_dti_ratio,
            message: self.affordability_message(dti_ratio, affordable),
        })
    }

    fn affordability_message(&self, dti_ratio: Rate, affordable: bool) -> String {
        let pct = dti_ratio.as_percentage().round_dp(1);
        if affordable {
            if dti_ratio.as_decimal() <= rust_decimal_macros::dec!(0.30) {
                format!("Excellent affordability. DTI ratio of {pct}% is very healthy.")
            } else if dti_ratio.as_decimal() <= rust_decimal_macros::dec!(0.36) {
                format!("Good affordability. DTI ratio of {pct}% is within the comfort zone.")
            } else {
                format!("Acceptable affordability. DTI ratio of {pct}% is manageable but getting high.")
            }
        } else {
            format!(
                "Warning: DTI ratio of {pct}% exceeds the recommended maximum of {max}%. \
                 Consider reducing the loan amount or extending the term.",
                max = self.max_dti_ratio.as_percentage().round_dp(1)
            )
        }
    }

    /// compare payment profiles across loan terms, shortest first
    pub fn compare_terms(
        &self,
        principal: Money,
        annual_rate: Rate,
        terms: &[u32],
    ) -> Result<Vec<TermComparison>> {
        compare_terms_for(principal, annual_rate, terms)
    }

    /// largest affordable principal given income, existing debt and the
    /// configured DTI ceiling; a zero result is a business outcome, not an
    /// error
    pub fn max_affordable_principal(
        &self,
        monthly_income: Money,
        annual_rate: Rate,
        term_months: u32,
        existing_monthly_debt: Money,
    ) -> Result<MaxLoanResult> {
        if !monthly_income.is_positive() {
            return Err(AdvisorError::InvalidIncome {
                amount: monthly_income,
            });
        }
        if existing_monthly_debt.is_negative() {
            return Err(AdvisorError::InvalidDebt {
                amount: existing_monthly_debt,
            });
        }
        if annual_rate.is_negative() || annual_rate > Rate::ONE {
            return Err(AdvisorError::InvalidRate { rate: annual_rate });
        }
        if term_months == 0 || term_months > MAX_TERM_MONTHS {
            return Err(AdvisorError::InvalidTerm {
                months: term_months,
                max: MAX_TERM_MONTHS,
            });
        }

        let max_monthly_payment = monthly_income * self.max_dti_ratio - existing_monthly_debt;

        if !max_monthly_payment.is_positive() {
            return Ok(MaxLoanResult {
                max_principal: Money::ZERO,
                max_monthly_payment,
                monthly_income,
                existing_debt: existing_monthly_debt,
                dti_ratio: self.max_dti_ratio,
                term_months,
                annual_rate,
                message: "Existing debt already exceeds the recommended debt-to-income ratio"
                    .to_string(),
            });
        }

        let max_principal = self
            .engine
            .max_principal(max_monthly_payment, annual_rate, term_months)?;

        Ok(MaxLoanResult {
            max_principal,
            max_monthly_payment,
            monthly_income,
            existing_debt: existing_monthly_debt,
            dti_ratio: self.max_dti_ratio,
            term_months,
            annual_rate,
            message: format!(
                "Based on a {}% DTI ratio, you can afford up to {}",
                self.max_dti_ratio.as_percentage().round_dp(0),
                max_principal.to_cents()
            ),
        })
    }
}

/// shared term comparison used by the personal and auto calculators
pub(crate) fn compare_terms_for(
    principal: Money,
    annual_rate: Rate,
    terms: &[u32],
) -> Result<Vec<TermComparison>> {
    if terms.is_empty() {
        return Err(AdvisorError::EmptyComparison);
    }

    let mut sorted: Vec<u32> = terms.to_vec();
    sorted.sort_unstable();

    let engine = FinancialEngine::new();
    let mut comparisons = Vec::with_capacity(sorted.len());

    for &term in &sorted {
        let monthly_payment = engine.payment(principal, annual_rate, term)?;
        let total_payment = monthly_payment * Decimal::from(term);
        let total_interest = total_payment - principal;

        comparisons.push(TermComparison {
            term_months: term,
            term_years: (Decimal::from(term) / Decimal::from(12)).round_dp(2),
            monthly_payment,
            total_payment,
            total_interest,
            interest_percentage: (total_interest.as_decimal() / principal.as_decimal()
                * Decimal::from(100))
            .round_dp(2),
            interest_saved_vs_longest: Money::ZERO,
        });
    }

    // the longest term pays the most interest; report each entry's saving
    // relative to it
    let longest_interest = comparisons
        .last()
        .map(|c| c.total_interest)
        .unwrap_or(Money::ZERO);
    for comparison in &mut comparisons {
        comparison.interest_saved_vs_longest = longest_interest - comparison.total_interest;
    }

    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(principal: i64, rate: Decimal, term: u32) -> LoanRequest {
        LoanRequest::new(Money::from_major(principal), Rate::from_decimal(rate), term).unwrap()
    }

    #[test]
    fn test_request_validation() {
        assert!(LoanRequest::new(Money::ZERO, Rate::from_percentage(5), 36).is_err());
        assert!(LoanRequest::new(Money::from_major(1_000), Rate::from_decimal(dec!(1.2)), 36).is_err());
        assert!(LoanRequest::new(Money::from_major(1_000), Rate::from_percentage(5), 0).is_err());
        assert!(LoanRequest::new(Money::from_major(1_000), Rate::from_percentage(5), 400).is_err());
        assert!(request(1_000, dec!(0.05), 36)
            .with_income(Money::ZERO)
            .is_err());
    }

    #[test]
    fn test_compute_totals() {
        let calculator = LoanCalculator::default();
        let result = calculator.compute(&request(50_000, dec!(0.05), 36)).unwrap();

        assert!(result.monthly_payment > Money::from_major(1498));
        assert!(result.monthly_payment < Money::from_major(1500));
        assert_eq!(
            result.total_payment,
            result.monthly_payment * Decimal::from(36)
        );
        assert_eq!(
            result.total_interest,
            result.total_payment - Money::from_major(50_000)
        );
        assert!(result.total_interest.is_positive());
        assert_eq!(result.monthly_rate, Rate::from_decimal(dec!(0.05)).monthly_rate());
    }

    #[test]
    fn test_compute_zero_rate() {
        let calculator = LoanCalculator::default();
        let result = calculator.compute(&request(12_000, dec!(0), 12)).unwrap();

        assert_eq!(result.monthly_payment, Money::from_major(1_000));
        assert_eq!(result.total_interest, Money::ZERO);
    }

    #[test]
    fn test_schedule_matches_summary() {
        let calculator = LoanCalculator::default();
        let result = calculator.schedule(&request(50_000, dec!(0.05), 36)).unwrap();

        assert_eq!(result.rows.len(), 36);
        assert_eq!(result.rows[0].payment, result.summary.monthly_payment);
        assert_eq!(result.rows.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_affordability_within_limit() {
        let calculator = LoanCalculator::default();
        let req = request(50_000, dec!(0.05), 36)
            .with_income(Money::from_major(10_000))
            .unwrap();

        let result = calculator
            .check_affordability(&req, Money::from_major(500))
            .unwrap();

        assert_eq!(result.affordable, Some(true));
        let dti = result.dti_ratio.unwrap();
        assert!(dti < Rate::from_decimal(dec!(0.5)));
        assert!(result.message.contains("affordability"));
    }

    #[test]
    fn test_affordability_exceeded() {
        let calculator = LoanCalculator::default();
        let req = request(50_000, dec!(0.05), 36)
            .with_income(Money::from_major(2_000))
            .unwrap();

        let result = calculator.check_affordability(&req, Money::ZERO).unwrap();

        assert_eq!(result.affordable, Some(false));
        assert!(result.message.starts_with("Warning"));
    }

    #[test]
    fn test_affordability_indeterminate_without_income() {
        let calculator = LoanCalculator::default();
        let result = calculator
            .check_affordability(&request(50_000, dec!(0.05), 36), Money::ZERO)
            .unwrap();

        // indeterminate, not "no"
        assert_eq!(result.affordable, None);
        assert!(result.dti_ratio.is_none());
        assert!(result.message.contains("income required"));
    }

    #[test]
    fn test_affordability_message_bands() {
        let calculator = LoanCalculator::default();

        assert!(calculator
            .affordability_message(Rate::from_decimal(dec!(0.25)), true)
            .starts_with("Excellent"));
        assert!(calculator
            .affordability_message(Rate::from_decimal(dec!(0.33)), true)
            .starts_with("Good"));
        assert!(calculator
            .affordability_message(Rate::from_decimal(dec!(0.45)), true)
            .starts_with("Acceptable"));
        assert!(calculator
            .affordability_message(Rate::from_decimal(dec!(0.60)), false)
            .starts_with("Warning"));
    }

    #[test]
    fn test_compare_terms_sorted_with_savings() {
        let calculator = LoanCalculator::default();
        let comparisons = calculator
            .compare_terms(
                Money::from_major(30_000),
                Rate::from_decimal(dec!(0.06)),
                &[60, 24, 36],
            )
            .unwrap();

        assert_eq!(
            comparisons.iter().map(|c| c.term_months).collect::<Vec<_>>(),
            vec![24, 36, 60]
        );

        // shorter terms pay higher installments but save interest
        assert!(comparisons[0].monthly_payment > comparisons[2].monthly_payment);
        assert!(comparisons[0].interest_saved_vs_longest.is_positive());
        assert_eq!(comparisons[2].interest_saved_vs_longest, Money::ZERO);
    }

    #[test]
    fn test_compare_terms_empty_is_error() {
        let calculator = LoanCalculator::default();
        assert!(calculator
            .compare_terms(Money::from_major(30_000), Rate::from_percentage(6), &[])
            .is_err());
    }

    #[test]
    fn test_max_affordable_principal_round_trip() {
        let calculator = LoanCalculator::default();
        let result = calculator
            .max_affordable_principal(
                Money::from_major(10_000),
                Rate::from_decimal(dec!(0.05)),
                36,
                Money::from_major(1_000),
            )
            .unwrap();

        // 10000 * 0.5 - 1000 = 4000/month ceiling
        assert_eq!(result.max_monthly_payment, Money::from_major(4_000));
        assert!(result.max_principal.is_positive());

        // the resulting principal costs exactly the payment ceiling
        let engine = FinancialEngine::new();
        let pmt = engine
            .payment(result.max_principal, Rate::from_decimal(dec!(0.05)), 36)
            .unwrap();
        assert!((pmt - Money::from_major(4_000)).abs() < Money::from_str_exact("0.01").unwrap());
    }

    #[test]
    fn test_max_affordable_principal_debt_exhausts_ceiling() {
        let calculator = LoanCalculator::default();
        let result = calculator
            .max_affordable_principal(
                Money::from_major(4_000),
                Rate::from_decimal(dec!(0.05)),
                36,
                Money::from_major(2_500),
            )
            .unwrap();

        // valid business outcome, not an error
        assert_eq!(result.max_principal, Money::ZERO);
        assert!(result.message.contains("Existing debt"));
    }

    #[test]
    fn test_for_loan_type_uses_product_dti() {
        let config = AdvisorConfig::default();
        let mortgage = LoanCalculator::for_loan_type(LoanType::Mortgage, &config);
        assert_eq!(mortgage.max_dti_ratio(), Rate::from_decimal(dec!(0.43)));
    }
}
