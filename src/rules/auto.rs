use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::decimal::Rate;
use crate::types::{Residency, VehicleType};

/// A single auto loan rule. Less variation than mortgages: LTV depends on
/// vehicle condition, not residency, but the residency condition is kept so
/// jurisdictions that differentiate can add rows without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanRule {
    pub max_ltv: Rate,
    pub min_down_payment: Rate,
    pub residency: Option<Residency>,
    pub vehicle_type: Option<VehicleType>,
}

impl AutoLoanRule {
    pub fn matches(&self, residency: Option<Residency>, vehicle_type: Option<VehicleType>) -> bool {
        if self.residency.is_some() && self.residency != residency {
            return false;
        }
        if self.vehicle_type.is_some() && self.vehicle_type != vehicle_type {
            return false;
        }
        true
    }
}

/// ordered table, first match wins, unconditional default last
pub fn auto_loan_rules() -> &'static [AutoLoanRule] {
    static RULES: OnceLock<Vec<AutoLoanRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // new vehicles hold value, higher LTV
            AutoLoanRule {
                max_ltv: Rate::from_decimal(dec!(0.90)),
                min_down_payment: Rate::from_decimal(dec!(0.10)),
                residency: None,
                vehicle_type: Some(VehicleType::New),
            },
            AutoLoanRule {
                max_ltv: Rate::from_decimal(dec!(0.80)),
                min_down_payment: Rate::from_decimal(dec!(0.20)),
                residency: None,
                vehicle_type: Some(VehicleType::Used),
            },
            AutoLoanRule {
                max_ltv: Rate::from_decimal(dec!(0.85)),
                min_down_payment: Rate::from_decimal(dec!(0.15)),
                residency: None,
                vehicle_type: None,
            },
        ]
    })
}

/// first matching auto loan rule; always succeeds
pub fn get_auto_loan_rule(
    residency: Option<Residency>,
    vehicle_type: Option<VehicleType>,
) -> &'static AutoLoanRule {
    let rules = auto_loan_rules();
    rules
        .iter()
        .find(|rule| rule.matches(residency, vehicle_type))
        .unwrap_or_else(|| rules.last().expect("rule table is never empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vs_used() {
        let new = get_auto_loan_rule(Some(Residency::Expat), Some(VehicleType::New));
        assert_eq!(new.max_ltv, Rate::from_decimal(dec!(0.90)));

        let used = get_auto_loan_rule(Some(Residency::Expat), Some(VehicleType::Used));
        assert_eq!(used.max_ltv, Rate::from_decimal(dec!(0.80)));
    }

    #[test]
    fn test_lookup_is_total() {
        let rule = get_auto_loan_rule(None, None);
        assert_eq!(rule.max_ltv, Rate::from_decimal(dec!(0.85)));
    }

    #[test]
    fn test_ltv_down_payment_complementarity() {
        for rule in auto_loan_rules() {
            let sum = rule.max_ltv.as_decimal() + rule.min_down_payment.as_decimal();
            assert_eq!(sum, dec!(1.0));
        }
    }
}
