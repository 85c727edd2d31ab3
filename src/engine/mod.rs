pub mod annuity;
pub mod schedule;

use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use schedule::AmortizationRow;

/// longest supported loan term
pub const MAX_TERM_MONTHS: u32 = 360;

/// Stateless annuity calculation engine. Carries no state, so it is a plain
/// value type: construct one wherever needed, or share freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialEngine;

impl FinancialEngine {
    pub fn new() -> Self {
        Self
    }

    /// monthly payment for a fixed-rate fixed-term loan
    pub fn payment(&self, principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
        annuity::payment(principal, annual_rate, periods)
    }

    /// maximum principal affordable at a given monthly payment
    pub fn max_principal(&self, payment: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
        annuity::max_principal(payment, annual_rate, periods)
    }

    /// interest portion of the payment for a specific period (1-indexed)
    pub fn interest_component(
        &self,
        principal: Money,
        annual_rate: Rate,
        period: u32,
        periods: u32,
    ) -> Result<Money> {
        annuity::interest_component(principal, annual_rate, period, periods)
    }

    /// principal portion of the payment for a specific period (1-indexed)
    pub fn principal_component(
        &self,
        principal: Money,
        annual_rate: Rate,
        period: u32,
        periods: u32,
    ) -> Result<Money> {
        annuity::principal_component(principal, annual_rate, period, periods)
    }

    /// balance outstanding after `period` payments
    pub fn remaining_balance(
        &self,
        principal: Money,
        annual_rate: Rate,
        period: u32,
        periods: u32,
    ) -> Result<Money> {
        annuity::remaining_balance(principal, annual_rate, period, periods)
    }

    /// full month-by-month amortization schedule
    pub fn amortization_table(
        &self,
        principal: Money,
        annual_rate: Rate,
        periods: u32,
    ) -> Result<Vec<AmortizationRow>> {
        schedule::amortization_table(principal, annual_rate, periods)
    }
}
