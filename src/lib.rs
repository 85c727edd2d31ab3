pub mod calculator;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod rules;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{AdvisorError, Result};
pub use engine::{AmortizationRow, FinancialEngine, MAX_TERM_MONTHS};
pub use calculator::{
    early_payoff, AffordabilityResult, AutoLoanCalculator, CarLoanQuote, CarLoanTerms,
    EarlyPayoffResult, HomeAffordability, LoanCalculationResult, LoanCalculator, LoanRequest,
    MaxLoanResult, MortgageCalculator, MortgageQuote, MortgageTerms, ScheduleResult,
    TermComparison,
};
pub use config::{
    AdvisorConfig, AutoLoanConfig, EligibilityConfig, LoanPolicy, MortgageConfig,
    PersonalLoanConfig,
};
pub use eligibility::{ApplicantProfile, EligibilityChecker, EligibilityResult};
pub use rules::{
    describe_mortgage_rules, get_auto_loan_rule, get_mortgage_rule, AutoLoanRule, MortgageRule,
};
pub use types::{
    EligibilityStatus, EmploymentStatus, LoanType, PropertyType, Residency, VehicleType,
};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
