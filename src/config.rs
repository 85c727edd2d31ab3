use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::LoanType;

/// lending policy shared by every loan product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanPolicy {
    pub max_dti_ratio: Rate,
    pub recommended_dti: Rate,
    pub base_rate: Rate,
    pub min_term_months: u32,
    pub max_term_months: u32,
    pub min_amount: Money,
    pub max_amount: Money,
    pub min_monthly_income: Money,
    pub min_credit_score: u32,
}

/// personal loan policy - unsecured, shorter term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalLoanConfig {
    pub policy: LoanPolicy,
}

impl Default for PersonalLoanConfig {
    fn default() -> Self {
        Self {
            policy: LoanPolicy {
                max_dti_ratio: Rate::from_decimal(dec!(0.50)),
                recommended_dti: Rate::from_decimal(dec!(0.36)),
                base_rate: Rate::from_decimal(dec!(0.0699)),
                min_term_months: 12,
                max_term_months: 60,
                min_amount: Money::from_major(5_000),
                max_amount: Money::from_major(500_000),
                min_monthly_income: Money::from_major(5_000),
                min_credit_score: 600,
            },
        }
    }
}

/// mortgage policy - secured by property, long term, stricter DTI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    pub policy: LoanPolicy,
    pub min_employment_years: rust_decimal::Decimal,
    pub max_age_at_maturity: u32,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        Self {
            policy: LoanPolicy {
                max_dti_ratio: Rate::from_decimal(dec!(0.43)),
                recommended_dti: Rate::from_decimal(dec!(0.36)),
                base_rate: Rate::from_decimal(dec!(0.0449)),
                min_term_months: 120,
                max_term_months: 360,
                min_amount: Money::from_major(50_000),
                max_amount: Money::from_major(10_000_000),
                min_monthly_income: Money::from_major(8_000),
                min_credit_score: 620,
            },
            min_employment_years: dec!(2.0),
            max_age_at_maturity: 70,
        }
    }
}

/// auto loan policy - secured by vehicle, medium term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanConfig {
    pub policy: LoanPolicy,
}

impl Default for AutoLoanConfig {
    fn default() -> Self {
        Self {
            policy: LoanPolicy {
                max_dti_ratio: Rate::from_decimal(dec!(0.45)),
                recommended_dti: Rate::from_decimal(dec!(0.36)),
                base_rate: Rate::from_decimal(dec!(0.0549)),
                min_term_months: 36,
                max_term_months: 84,
                min_amount: Money::from_major(10_000),
                max_amount: Money::from_major(500_000),
                min_monthly_income: Money::from_major(5_000),
                min_credit_score: 600,
            },
        }
    }
}

/// eligibility screening thresholds for personal loan applications
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub min_age: u32,
    /// maximum age at loan maturity
    pub max_age: u32,
    pub min_monthly_income: Money,
    pub min_credit_score: u32,
    pub max_dti_ratio: Rate,
    pub min_employment_years: rust_decimal::Decimal,
    pub max_loan_amount: Money,
    /// loan amount above this multiple of annual income is declined outright
    pub max_loan_to_income: rust_decimal::Decimal,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_age: 18,
            max_age: 65,
            min_monthly_income: Money::from_major(5_000),
            min_credit_score: 600,
            max_dti_ratio: Rate::from_decimal(dec!(0.5)),
            min_employment_years: dec!(1.0),
            max_loan_amount: Money::from_major(1_000_000),
            max_loan_to_income: dec!(3),
        }
    }
}

/// top-level advisor configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvisorConfig {
    pub personal: PersonalLoanConfig,
    pub mortgage: MortgageConfig,
    pub auto: AutoLoanConfig,
    pub eligibility: EligibilityConfig,
}

impl AdvisorConfig {
    /// policy for a specific loan product
    pub fn loan_policy(&self, loan_type: LoanType) -> &LoanPolicy {
        match loan_type {
            LoanType::Personal => &self.personal.policy,
            LoanType::Mortgage => &self.mortgage.policy,
            LoanType::Auto => &self.auto.policy,
        }
    }
}
