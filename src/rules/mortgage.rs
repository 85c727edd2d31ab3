use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::decimal::{Money, Rate};
use crate::types::{PropertyType, Residency};

/// A single mortgage rule: optional conditions plus the LTV / down payment
/// result. A condition left as `None` matches any input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MortgageRule {
    pub max_ltv: Rate,
    pub min_down_payment: Rate,
    pub residency: Option<Residency>,
    pub property_type: Option<PropertyType>,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
}

impl MortgageRule {
    /// true when every declared condition equals the corresponding input
    pub fn matches(
        &self,
        residency: Option<Residency>,
        property_type: Option<PropertyType>,
        price: Money,
    ) -> bool {
        if self.residency.is_some() && self.residency != residency {
            return false;
        }
        if self.property_type.is_some() && self.property_type != property_type {
            return false;
        }
        if let Some(max) = self.price_max {
            if price > max {
                return false;
            }
        }
        if let Some(min) = self.price_min {
            if price < min {
                return false;
            }
        }
        true
    }

    fn unconditional(max_ltv: Rate) -> Self {
        Self {
            max_ltv,
            min_down_payment: max_ltv.complement(),
            residency: None,
            property_type: None,
            price_min: None,
            price_max: None,
        }
    }
}

/// UAE central bank mortgage LTV table. Matched top to bottom, first match
/// wins, so the price-banded citizen rules must stay ahead of the general
/// ones and the unconditional default must stay last.
pub fn mortgage_rules() -> &'static [MortgageRule] {
    static RULES: OnceLock<Vec<MortgageRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            // citizens: first home up to 5M gets the top tier
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.85)),
                min_down_payment: Rate::from_decimal(dec!(0.15)),
                residency: Some(Residency::Citizen),
                property_type: Some(PropertyType::First),
                price_min: None,
                price_max: Some(Money::from_major(5_000_000)),
            },
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.80)),
                min_down_payment: Rate::from_decimal(dec!(0.20)),
                residency: Some(Residency::Citizen),
                property_type: Some(PropertyType::First),
                price_min: Some(Money::from_major(5_000_000)),
                price_max: None,
            },
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.75)),
                min_down_payment: Rate::from_decimal(dec!(0.25)),
                residency: Some(Residency::Citizen),
                property_type: Some(PropertyType::Second),
                price_min: None,
                price_max: None,
            },
            // expats (foreign residents)
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.80)),
                min_down_payment: Rate::from_decimal(dec!(0.20)),
                residency: Some(Residency::Expat),
                property_type: Some(PropertyType::First),
                price_min: None,
                price_max: None,
            },
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.65)),
                min_down_payment: Rate::from_decimal(dec!(0.35)),
                residency: Some(Residency::Expat),
                property_type: Some(PropertyType::Second),
                price_min: None,
                price_max: None,
            },
            // non-residents
            MortgageRule {
                max_ltv: Rate::from_decimal(dec!(0.50)),
                min_down_payment: Rate::from_decimal(dec!(0.50)),
                residency: Some(Residency::NonResident),
                property_type: None,
                price_min: None,
                price_max: None,
            },
            // catch-all, keeps lookup total
            MortgageRule::unconditional(Rate::from_decimal(dec!(0.75))),
        ]
    })
}

/// first matching mortgage rule for the given conditions; the table ends
/// with an unconditional rule, so lookup always succeeds
pub fn get_mortgage_rule(
    residency: Option<Residency>,
    property_type: Option<PropertyType>,
    price: Money,
) -> &'static MortgageRule {
    let rules = mortgage_rules();
    rules
        .iter()
        .find(|rule| rule.matches(residency, property_type, price))
        .unwrap_or_else(|| rules.last().expect("rule table is never empty"))
}

/// human-readable rendering of the mortgage rule table, for the agent layer
pub fn describe_mortgage_rules() -> String {
    let mut lines = vec!["UAE Mortgage LTV Rules:".to_string(), String::new()];
    for rule in mortgage_rules() {
        let mut conditions = Vec::new();
        if let Some(residency) = rule.residency {
            conditions.push(format!("Residency: {residency}"));
        }
        if let Some(property) = rule.property_type {
            conditions.push(format!("Property: {property}"));
        }
        if let Some(max) = rule.price_max {
            conditions.push(format!("Price <= {max}"));
        }
        if let Some(min) = rule.price_min {
            conditions.push(format!("Price >= {min}"));
        }

        let condition_str = if conditions.is_empty() {
            "Default".to_string()
        } else {
            conditions.join(", ")
        };
        lines.push(format!(
            "  {condition_str}: LTV {}, Down Payment {}",
            rule.max_ltv, rule.min_down_payment
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_first_home_price_boundary() {
        // boundary is inclusive on the higher-LTV rule
        let at_threshold = get_mortgage_rule(
            Some(Residency::Citizen),
            Some(PropertyType::First),
            Money::from_major(5_000_000),
        );
        assert_eq!(at_threshold.max_ltv, Rate::from_decimal(dec!(0.85)));

        let above_threshold = get_mortgage_rule(
            Some(Residency::Citizen),
            Some(PropertyType::First),
            Money::from_major(5_000_001),
        );
        assert_eq!(above_threshold.max_ltv, Rate::from_decimal(dec!(0.80)));
    }

    #[test]
    fn test_expat_second_home() {
        let rule = get_mortgage_rule(
            Some(Residency::Expat),
            Some(PropertyType::Second),
            Money::from_major(3_000_000),
        );
        assert_eq!(rule.max_ltv, Rate::from_decimal(dec!(0.65)));
        assert_eq!(rule.min_down_payment, Rate::from_decimal(dec!(0.35)));
    }

    #[test]
    fn test_non_resident_any_property() {
        for property in [PropertyType::First, PropertyType::Second, PropertyType::Investment] {
            let rule = get_mortgage_rule(
                Some(Residency::NonResident),
                Some(property),
                Money::from_major(1_000_000),
            );
            assert_eq!(rule.max_ltv, Rate::from_decimal(dec!(0.50)));
        }
    }

    #[test]
    fn test_lookup_is_total() {
        // unrecognized residency (parsed to None) falls through to default
        assert_eq!(Residency::parse("martian"), None);
        let rule = get_mortgage_rule(None, None, Money::from_major(750_000));
        assert_eq!(rule.max_ltv, Rate::from_decimal(dec!(0.75)));

        // investment property has no dedicated rule either
        let rule = get_mortgage_rule(
            Some(Residency::Citizen),
            Some(PropertyType::Investment),
            Money::from_major(750_000),
        );
        assert_eq!(rule.max_ltv, Rate::from_decimal(dec!(0.75)));
    }

    #[test]
    fn test_ltv_down_payment_complementarity() {
        for rule in mortgage_rules() {
            let sum = rule.max_ltv.as_decimal() + rule.min_down_payment.as_decimal();
            assert_eq!(sum, dec!(1.0));
        }
    }

    #[test]
    fn test_last_rule_is_unconditional() {
        let last = mortgage_rules().last().unwrap();
        assert!(last.residency.is_none());
        assert!(last.property_type.is_none());
        assert!(last.price_min.is_none());
        assert!(last.price_max.is_none());
    }

    #[test]
    fn test_describe_lists_every_rule() {
        let description = describe_mortgage_rules();
        assert!(description.contains("Default"));
        assert_eq!(
            description.lines().filter(|l| l.contains("LTV")).count(),
            mortgage_rules().len()
        );
    }
}
