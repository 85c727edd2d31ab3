use thiserror::Error;

use crate::decimal::{Money, Rate};

/// Invalid-input errors. Unfavorable business outcomes (DTI too high, LTV
/// exceeded, zero affordable principal) are never errors; they come back as
/// ordinary result values with an explanation attached.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("invalid principal: {amount} (must be positive)")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate} (expected decimal form between 0 and 1)")]
    InvalidRate {
        rate: Rate,
    },

    #[error("invalid loan term: {months} months (expected 1 to {max} months)")]
    InvalidTerm {
        months: u32,
        max: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPayment {
        amount: Money,
    },

    #[error("invalid period: {period} (expected 1 to {periods})")]
    InvalidPeriod {
        period: u32,
        periods: u32,
    },

    #[error("invalid price: {amount} (must be positive)")]
    InvalidPrice {
        amount: Money,
    },

    #[error("invalid down payment: {amount} against price {price}")]
    InvalidDownPayment {
        amount: Money,
        price: Money,
    },

    #[error("invalid age: {age} (expected {min} to {max})")]
    InvalidAge {
        age: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid credit score: {score} (expected 300 to 850)")]
    InvalidCreditScore {
        score: u32,
    },

    #[error("invalid monthly income: {amount} (must be positive)")]
    InvalidIncome {
        amount: Money,
    },

    #[error("invalid monthly debt obligations: {amount} (must not be negative)")]
    InvalidDebt {
        amount: Money,
    },

    #[error("invalid employment length: {years} years (must not be negative)")]
    InvalidEmploymentLength {
        years: rust_decimal::Decimal,
    },

    #[error("no terms supplied for comparison")]
    EmptyComparison,
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
