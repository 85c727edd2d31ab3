use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MortgageConfig;
use crate::decimal::{Money, Rate};
use crate::engine::{FinancialEngine, MAX_TERM_MONTHS};
use crate::errors::{AdvisorError, Result};
use crate::rules::get_mortgage_rule;
use crate::types::{PropertyType, Residency};

/// maximum home price the income supports under the mortgage DTI ceiling
/// and the applicable LTV rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAffordability {
    pub affordable: bool,
    pub max_home_price: Money,
    pub max_loan_amount: Money,
    pub required_down_payment: Money,
    pub down_payment_percentage: Rate,
    pub monthly_payment: Money,
    pub dti_ratio: Rate,
    pub ltv_ratio: Rate,
    pub residency: Option<Residency>,
    pub property_type: Option<PropertyType>,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub message: String,
}

/// quoted mortgage terms for a specific home price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageTerms {
    pub home_price: Money,
    pub down_payment: Money,
    pub down_payment_percentage: Rate,
    pub loan_amount: Money,
    pub ltv_ratio: Rate,
    pub max_ltv_allowed: Rate,
    pub residency: Option<Residency>,
    pub property_type: Option<PropertyType>,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

/// Outcome of a mortgage payment quote. A rejected quote is a normal
/// business answer (LTV above the rule's ceiling), not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MortgageQuote {
    Approved(MortgageTerms),
    Rejected { message: String },
}

impl MortgageQuote {
    pub fn is_approved(&self) -> bool {
        matches!(self, MortgageQuote::Approved(_))
    }
}

/// mortgage affordability and payment quoting against the rule table
#[derive(Debug, Clone, Copy)]
pub struct MortgageCalculator {
    config: MortgageConfig,
    engine: FinancialEngine,
}

impl Default for MortgageCalculator {
    fn default() -> Self {
        Self::new(MortgageConfig::default())
    }
}

impl MortgageCalculator {
    pub fn new(config: MortgageConfig) -> Self {
        Self {
            config,
            engine: FinancialEngine::new(),
        }
    }

    /// maximum home price affordable for the given income. Uses the
    /// mortgage-specific DTI ceiling, converts the payment headroom to a
    /// principal, then scales by the rule's LTV to get the price.
    #[allow(clippy::too_many_arguments)]
    pub fn home_affordability(
        &self,
        monthly_income: Money,
        existing_debt_payment: Money,
        annual_rate: Option<Rate>,
        term_months: u32,
        residency: Option<Residency>,
        property_type: Option<PropertyType>,
        estimated_price: Money,
    ) -> Result<HomeAffordability> {
        if !monthly_income.is_positive() {
            return Err(AdvisorError::InvalidIncome {
                amount: monthly_income,
            });
        }
        if existing_debt_payment.is_negative() {
            return Err(AdvisorError::InvalidDebt {
                amount: existing_debt_payment,
            });
        }
        let annual_rate = annual_rate.unwrap_or(self.config.policy.base_rate);
        if annual_rate.is_negative() || annual_rate > Rate::ONE {
            return Err(AdvisorError::InvalidRate { rate: annual_rate });
        }
        if term_months == 0 || term_months > MAX_TERM_MONTHS {
            return Err(AdvisorError::InvalidTerm {
                months: term_months,
                max: MAX_TERM_MONTHS,
            });
        }

        let rule = get_mortgage_rule(residency, property_type, estimated_price);
        let max_dti = self.config.policy.max_dti_ratio;
        let max_mortgage_payment = monthly_income * max_dti - existing_debt_payment;

        debug!(
            income = %monthly_income,
            max_ltv = %rule.max_ltv,
            headroom = %max_mortgage_payment,
            "home affordability"
        );

        if !max_mortgage_payment.is_positive() {
            return Ok(HomeAffordability {
                affordable: false,
                max_home_price: Money::ZERO,
                max_loan_amount: Money::ZERO,
                required_down_payment: Money::ZERO,
                down_payment_percentage: rule.min_down_payment,
                monthly_payment: Money::ZERO,
                dti_ratio: max_dti,
                ltv_ratio: rule.max_ltv,
                residency,
                property_type,
                annual_rate,
                term_months,
                message: "Existing debt exceeds the DTI limit for a mortgage".to_string(),
            });
        }

        let max_loan = self
            .engine
            .max_principal(max_mortgage_payment, annual_rate, term_months)?;
        let max_home_price = max_loan / rule.max_ltv;
        let required_down_payment = max_home_price * rule.min_down_payment;

        Ok(HomeAffordability {
            affordable: true,
            max_home_price: max_home_price.to_cents(),
            max_loan_amount: max_loan.to_cents(),
            required_down_payment: required_down_payment.to_cents(),
            down_payment_percentage: rule.min_down_payment,
            monthly_payment: max_mortgage_payment.to_cents(),
            dti_ratio: max_dti,
            ltv_ratio: rule.max_ltv,
            residency,
            property_type,
            annual_rate,
            term_months,
            message: format!(
                "With {} monthly income you can afford a home up to {} \
                 (LTV {}, down payment {})",
                monthly_income.to_cents(),
                max_home_price.round_dp(0),
                rule.max_ltv,
                required_down_payment.round_dp(0)
            ),
        })
    }

    /// quote a mortgage payment for a specific home price, validating the
    /// resulting LTV against the applicable rule
    pub fn payment_quote(
        &self,
        home_price: Money,
        down_payment: Option<Money>,
        annual_rate: Option<Rate>,
        term_months: u32,
        residency: Option<Residency>,
        property_type: Option<PropertyType>,
    ) -> Result<MortgageQuote> {
        if !home_price.is_positive() {
            return Err(AdvisorError::InvalidPrice { amount: home_price });
        }
        let annual_rate = annual_rate.unwrap_or(self.config.policy.base_rate);
        if annual_rate.is_negative() || annual_rate > Rate::ONE {
            return Err(AdvisorError::InvalidRate { rate: annual_rate });
        }
        if term_months == 0 || term_months > MAX_TERM_MONTHS {
            return Err(AdvisorError::InvalidTerm {
                months: term_months,
                max: MAX_TERM_MONTHS,
            });
        }

        let rule = get_mortgage_rule(residency, property_type, home_price);
        let down_payment = down_payment.unwrap_or(home_price * rule.min_down_payment);

        if down_payment.is_negative() || down_payment >= home_price {
            return Err(AdvisorError::InvalidDownPayment {
                amount: down_payment,
                price: home_price,
            });
        }

        let loan_amount = home_price - down_payment;
        let ltv_ratio = loan_amount.ratio_to(home_price);

        if ltv_ratio > rule.max_ltv {
            let min_required_down = home_price * rule.min_down_payment;
            return Ok(MortgageQuote::Rejected {
                message: format!(
                    "LTV {} exceeds the maximum {} for this residency and property type. \
                     A down payment of at least {} ({}) is required.",
                    ltv_ratio, rule.max_ltv,
                    min_required_down.to_cents(),
                    rule.min_down_payment
                ),
            });
        }

        let monthly_payment = self.engine.payment(loan_amount, annual_rate, term_months)?;
        let total_payment = monthly_payment * Decimal::from(term_months);
        let total_interest = total_payment - loan_amount;

        Ok(MortgageQuote::Approved(MortgageTerms {
            home_price,
            down_payment,
            down_payment_percentage: down_payment.ratio_to(home_price),
            loan_amount,
            ltv_ratio,
            max_ltv_allowed: rule.max_ltv,
            residency,
            property_type,
            monthly_payment: monthly_payment.to_cents(),
            total_payment: total_payment.to_cents(),
            total_interest: total_interest.to_cents(),
            annual_rate,
            term_months,
        }))
    }
}
