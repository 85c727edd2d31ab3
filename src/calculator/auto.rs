use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AutoLoanConfig;
use crate::decimal::{Money, Rate};
use crate::engine::{FinancialEngine, MAX_TERM_MONTHS};
use crate::errors::{AdvisorError, Result};
use crate::rules::get_auto_loan_rule;
use crate::types::{Residency, VehicleType};

use super::{compare_terms_for, TermComparison};

/// quoted car loan terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarLoanTerms {
    pub car_price: Money,
    pub down_payment: Money,
    pub down_payment_percentage: Rate,
    pub loan_amount: Money,
    pub ltv_ratio: Rate,
    pub max_ltv_allowed: Rate,
    pub vehicle_type: Option<VehicleType>,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

/// Outcome of a car loan quote; rejection carries the reason and is a
/// normal business answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CarLoanQuote {
    Approved(CarLoanTerms),
    Rejected { message: String },
}

impl CarLoanQuote {
    pub fn is_approved(&self) -> bool {
        matches!(self, CarLoanQuote::Approved(_))
    }
}

/// car loan quoting and term comparison against the auto rule table
#[derive(Debug, Clone, Copy)]
pub struct AutoLoanCalculator {
    config: AutoLoanConfig,
    engine: FinancialEngine,
}

impl Default for AutoLoanCalculator {
    fn default() -> Self {
        Self::new(AutoLoanConfig::default())
    }
}

impl AutoLoanCalculator {
    pub fn new(config: AutoLoanConfig) -> Self {
        Self {
            config,
            engine: FinancialEngine::new(),
        }
    }

    /// quote a car loan, validating LTV against the vehicle-type rule
    pub fn car_loan(
        &self,
        car_price: Money,
        down_payment: Option<Money>,
        annual_rate: Option<Rate>,
        term_months: u32,
        residency: Option<Residency>,
        vehicle_type: Option<VehicleType>,
    ) -> Result<CarLoanQuote> {
        if !car_price.is_positive() {
            return Err(AdvisorError::InvalidPrice { amount: car_price });
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

        let rule = get_auto_loan_rule(residency, vehicle_type);
        let down_payment = down_payment.unwrap_or(car_price * rule.min_down_payment);

        if down_payment.is_negative() || down_payment >= car_price {
            return Err(AdvisorError::InvalidDownPayment {
                amount: down_payment,
                price: car_price,
            });
        }

        let loan_amount = car_price - down_payment;
        let ltv_ratio = loan_amount.ratio_to(car_price);

        debug!(price = %car_price, ltv = %ltv_ratio, "car loan quote");

        if ltv_ratio > rule.max_ltv {
            let min_required_down = car_price * rule.min_down_payment;
            return Ok(CarLoanQuote::Rejected {
                message: format!(
                    "LTV {} exceeds the maximum {} for this vehicle. \
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

        Ok(CarLoanQuote::Approved(CarLoanTerms {
            car_price,
            down_payment,
            down_payment_percentage: down_payment.ratio_to(car_price),
            loan_amount,
            ltv_ratio,
            max_ltv_allowed: rule.max_ltv,
            vehicle_type,
            monthly_payment: monthly_payment.to_cents(),
            total_payment: total_payment.to_cents(),
            total_interest: total_interest.to_cents(),
            annual_rate,
            term_months,
        }))
    }

    /// compare a car loan across terms; defaults to 3 through 6 years
    pub fn compare_terms(
        &self,
        car_price: Money,
        down_payment: Option<Money>,
        annual_rate: Option<Rate>,
        terms: Option<&[u32]>,
        residency: Option<Residency>,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Vec<TermComparison>> {
        if !car_price.is_positive() {
            return Err(AdvisorError::InvalidPrice { amount: car_price });
        }

        let rule = get_auto_loan_rule(residency, vehicle_type);
        let down_payment = down_payment.unwrap_or(car_price * rule.min_down_payment);
        if down_payment.is_negative() || down_payment >= car_price {
            return Err(AdvisorError::InvalidDownPayment {
                amount: down_payment,
                price: car_price,
            });
        }

        let annual_rate = annual_rate.unwrap_or(self.config.policy.base_rate);
        let terms = terms.unwrap_or(&[36, 48, 60, 72]);

        compare_terms_for(car_price - down_payment, annual_rate, terms)
    }
}
