use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EligibilityConfig;
use crate::decimal::{Money, Rate};
use crate::engine::annuity;
use crate::errors::{AdvisorError, Result};
use crate::types::{EligibilityStatus, EmploymentStatus};

/// Fixed reference rate for the eligibility DTI estimate. This is a
/// screening heuristic: the prospective payment is estimated at 5% annual
/// regardless of the rate the applicant would actually be quoted, so the
/// DTI figure here can differ from the calculator's affordability check,
/// which uses the real requested rate.
const DTI_REFERENCE_RATE: Decimal = dec!(0.05);

/// Applicant information for an eligibility check. Range-checked at
/// construction; an out-of-bounds profile is rejected before any scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    pub monthly_income: Money,
    /// FICO scale, 300-850
    pub credit_score: u32,
    pub employment_status: EmploymentStatus,
    pub employment_length_years: Decimal,
    pub monthly_debt_obligations: Money,
    pub requested_loan_amount: Money,
    pub loan_term_months: u32,
    pub has_existing_loans: bool,
    pub previous_defaults: bool,
}

/// longest personal loan term accepted for screening
const MAX_APPLICATION_TERM_MONTHS: u32 = 60;

impl ApplicantProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        age: u32,
        monthly_income: Money,
        credit_score: u32,
        employment_status: EmploymentStatus,
        employment_length_years: Decimal,
        monthly_debt_obligations: Money,
        requested_loan_amount: Money,
        loan_term_months: u32,
        has_existing_loans: bool,
        previous_defaults: bool,
    ) -> Result<Self> {
        let profile = Self {
            age,
            monthly_income,
            credit_score,
            employment_status,
            employment_length_years,
            monthly_debt_obligations,
            requested_loan_amount,
            loan_term_months,
            has_existing_loans,
            previous_defaults,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// range checks; never clamps or coerces
    pub fn validate(&self) -> Result<()> {
        if self.age < 18 || self.age > 100 {
            return Err(AdvisorError::InvalidAge {
                age: self.age,
                min: 18,
                max: 100,
            });
        }
        if !self.monthly_income.is_positive() {
            return Err(AdvisorError::InvalidIncome {
                amount: self.monthly_income,
            });
        }
        if self.credit_score < 300 || self.credit_score > 850 {
            return Err(AdvisorError::InvalidCreditScore {
                score: self.credit_score,
            });
        }
        if self.employment_length_years.is_sign_negative() {
            return Err(AdvisorError::InvalidEmploymentLength {
                years: self.employment_length_years,
            });
        }
        if self.monthly_debt_obligations.is_negative() {
            return Err(AdvisorError::InvalidDebt {
                amount: self.monthly_debt_obligations,
            });
        }
        if !self.requested_loan_amount.is_positive() {
            return Err(AdvisorError::InvalidPrincipal {
                amount: self.requested_loan_amount,
            });
        }
        if self.loan_term_months == 0 || self.loan_term_months > MAX_APPLICATION_TERM_MONTHS {
            return Err(AdvisorError::InvalidTerm {
                months: self.loan_term_months,
                max: MAX_APPLICATION_TERM_MONTHS,
            });
        }
        Ok(())
    }
}

/// result of a loan eligibility check, produced fresh per call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub status: EligibilityStatus,
    pub eligible: bool,
    pub reasons: Vec<String>,
    /// 0-100, mean of the individual check scores
    pub score: Decimal,
    pub recommendations: Vec<String>,
}

/// collects reasons, recommendations and sub-scores across the checks
#[derive(Default)]
struct Evaluation {
    reasons: Vec<String>,
    recommendations: Vec<String>,
    scores: Vec<Decimal>,
}

impl Evaluation {
    fn score(&mut self, value: Decimal) {
        self.scores.push(value);
    }

    fn reason(&mut self, text: String) {
        self.reasons.push(text);
    }

    fn recommend(&mut self, text: &str) {
        self.recommendations.push(text.to_string());
    }

    fn mean_score(&self) -> Decimal {
        if self.scores.is_empty() {
            return Decimal::ZERO;
        }
        let total: Decimal = self.scores.iter().copied().sum();
        (total / Decimal::from(self.scores.len())).round_dp(2)
    }
}

/// rule-based eligibility screening for personal loan applications
#[derive(Debug, Clone, Copy)]
pub struct EligibilityChecker {
    config: EligibilityConfig,
}

impl Default for EligibilityChecker {
    fn default() -> Self {
        Self::new(EligibilityConfig::default())
    }
}

impl EligibilityChecker {
    pub fn new(config: EligibilityConfig) -> Self {
        Self { config }
    }

    /// Evaluate every criterion in a single pass. Each check contributes a
    /// 0-100 sub-score; the final score is their mean. The applicant is
    /// eligible only when every critical check passes; passing all critical
    /// checks with a borderline employment history yields a conditional
    /// status instead.
    pub fn check(&self, applicant: &ApplicantProfile) -> Result<EligibilityResult> {
        applicant.validate()?;

        let mut eval = Evaluation::default();

        let age_ok = self.check_age(applicant, &mut eval);
        let income_ok = self.check_income(applicant, &mut eval);
        let credit_ok = self.check_credit_score(applicant, &mut eval);
        let (employment_ok, tenure_borderline) = self.check_employment(applicant, &mut eval);
        let dti_ok = self.check_dti(applicant, &mut eval)?;
        let amount_ok = self.check_loan_amount(applicant, &mut eval);
        let defaults_ok = self.check_defaults(applicant, &mut eval);

        let score = eval.mean_score();
        let critical_pass = age_ok
            && income_ok
            && credit_ok
            && employment_ok
            && dti_ok
            && amount_ok
            && defaults_ok;

        let (status, eligible) = if critical_pass && !tenure_borderline {
            if eval.reasons.is_empty() {
                eval.reason("All eligibility criteria met successfully".to_string());
            }
            (EligibilityStatus::Eligible, true)
        } else if critical_pass {
            eval.recommend(
                "Consider improving employment stability or reducing the requested loan amount",
            );
            (EligibilityStatus::Conditional, false)
        } else {
            (EligibilityStatus::NotEligible, false)
        };

        debug!(%status, %score, "eligibility check complete");

        Ok(EligibilityResult {
            status,
            eligible,
            reasons: eval.reasons,
            score,
            recommendations: eval.recommendations,
        })
    }

    fn check_age(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> bool {
        let maturity_age = Decimal::from(applicant.age)
            + Decimal::from(applicant.loan_term_months) / Decimal::from(12);

        if applicant.age < self.config.min_age {
            eval.reason(format!(
                "Age {} is below the minimum requirement of {}",
                applicant.age, self.config.min_age
            ));
            eval.recommend("Applicants must meet the minimum age to apply");
            eval.score(dec!(0));
            return false;
        }

        if maturity_age > Decimal::from(self.config.max_age) {
            eval.reason(format!(
                "Loan maturity age {} exceeds the maximum of {}",
                maturity_age.round_dp(0),
                self.config.max_age
            ));
            eval.recommend("Consider a shorter loan term");
            eval.score(dec!(30));
            return false;
        }

        eval.score(dec!(100));
        true
    }

    fn check_income(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> bool {
        if applicant.monthly_income < self.config.min_monthly_income {
            eval.reason(format!(
                "Monthly income {} is below the minimum requirement of {}",
                applicant.monthly_income.to_cents(),
                self.config.min_monthly_income.to_cents()
            ));
            eval.recommend("A higher verified monthly income is required");
            eval.score(dec!(0));
            return false;
        }

        // tiered by multiples of the minimum income
        let income_ratio =
            applicant.monthly_income.as_decimal() / self.config.min_monthly_income.as_decimal();
        eval.score(if income_ratio >= dec!(3) {
            dec!(100)
        } else if income_ratio >= dec!(2) {
            dec!(85)
        } else if income_ratio >= dec!(1.5) {
            dec!(70)
        } else {
            dec!(55)
        });
        true
    }

    fn check_credit_score(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> bool {
        if applicant.credit_score < self.config.min_credit_score {
            eval.reason(format!(
                "Credit score {} is below the minimum of {}",
                applicant.credit_score, self.config.min_credit_score
            ));
            eval.recommend(
                "Improve the credit score by paying bills on time and reducing credit utilization",
            );
            eval.score(dec!(0));
            return false;
        }

        eval.score(if applicant.credit_score >= 750 {
            dec!(100)
        } else if applicant.credit_score >= 700 {
            dec!(85)
        } else if applicant.credit_score >= 650 {
            dec!(70)
        } else {
            dec!(55)
        });
        true
    }

    /// returns (critical pass, borderline tenure). Unemployment is the only
    /// critical employment failure; short tenure while employed is a
    /// borderline condition that caps the outcome at conditional.
    fn check_employment(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> (bool, bool) {
        match applicant.employment_status {
            EmploymentStatus::Unemployed => {
                eval.reason("Unemployed applicants are not eligible".to_string());
                eval.recommend("Secure employment before applying for a loan");
                eval.score(dec!(0));
                (false, false)
            }
            EmploymentStatus::Retired => {
                if applicant.age < 60 {
                    eval.reason("Early retirement requires additional verification".to_string());
                    eval.score(dec!(60));
                } else {
                    eval.score(dec!(80));
                }
                (true, false)
            }
            _ => {
                if applicant.employment_length_years < self.config.min_employment_years {
                    eval.reason(format!(
                        "Employment length {} years is below the minimum of {} years",
                        applicant.employment_length_years.round_dp(1),
                        self.config.min_employment_years.round_dp(1)
                    ));
                    eval.recommend("Build employment history for better loan terms");
                    eval.score(dec!(40));
                    return (true, true);
                }

                eval.score(if applicant.employment_length_years >= dec!(5) {
                    dec!(100)
                } else if applicant.employment_length_years >= dec!(3) {
                    dec!(85)
                } else if applicant.employment_length_years >= dec!(2) {
                    dec!(70)
                } else {
                    dec!(55)
                });
                (true, false)
            }
        }
    }

    fn check_dti(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> Result<bool> {
        // estimate the prospective installment at the fixed reference rate
        let estimated_payment = annuity::payment(
            applicant.requested_loan_amount,
            Rate::from_decimal(DTI_REFERENCE_RATE),
            applicant.loan_term_months,
        )?;

        let total_monthly_debt = applicant.monthly_debt_obligations + estimated_payment;
        let dti_ratio = total_monthly_debt.ratio_to(applicant.monthly_income);

        if dti_ratio > self.config.max_dti_ratio {
            eval.reason(format!(
                "Debt-to-income ratio {}% exceeds the maximum of {}%",
                dti_ratio.as_percentage().round_dp(1),
                self.config.max_dti_ratio.as_percentage().round_dp(1)
            ));
            eval.recommend(
                "Reduce existing debt or request a smaller loan amount to improve the DTI ratio",
            );
            eval.score(dec!(0));
            return Ok(false);
        }

        let dti = dti_ratio.as_decimal();
        eval.score(if dti <= dec!(0.30) {
            dec!(100)
        } else if dti <= dec!(0.36) {
            dec!(85)
        } else if dti <= dec!(0.43) {
            dec!(70)
        } else {
            dec!(55)
        });
        Ok(true)
    }

    fn check_loan_amount(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> bool {
        if applicant.requested_loan_amount > self.config.max_loan_amount {
            eval.reason(format!(
                "Requested amount {} exceeds the maximum of {}",
                applicant.requested_loan_amount.to_cents(),
                self.config.max_loan_amount.to_cents()
            ));
            eval.recommend("Request an amount within the maximum loan limit");
            eval.score(dec!(0));
            return false;
        }

        let annual_income = applicant.monthly_income * Decimal::from(12);
        let loan_to_income =
            applicant.requested_loan_amount.as_decimal() / annual_income.as_decimal();

        if loan_to_income > self.config.max_loan_to_income {
            eval.reason(format!(
                "Loan amount is {}x annual income (very high risk)",
                loan_to_income.round_dp(1)
            ));
            eval.recommend("Request a smaller loan amount relative to income");
            eval.score(dec!(30));
            return false;
        }

        eval.score(if loan_to_income <= dec!(1) {
            dec!(100)
        } else if loan_to_income <= dec!(1.5) {
            dec!(85)
        } else if loan_to_income <= dec!(2) {
            dec!(70)
        } else {
            dec!(55)
        });
        true
    }

    fn check_defaults(&self, applicant: &ApplicantProfile, eval: &mut Evaluation) -> bool {
        if applicant.previous_defaults {
            eval.reason("Previous loan defaults on record - high risk".to_string());
            eval.recommend("Resolve previous defaults and rebuild credit history before reapplying");
            eval.score(dec!(0));
            return false;
        }

        eval.score(dec!(100));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_applicant() -> ApplicantProfile {
        ApplicantProfile::new(
            35,
            Money::from_major(10_000),
            720,
            EmploymentStatus::FullTime,
            dec!(5),
            Money::from_major(1_500),
            Money::from_major(50_000),
            36,
            false,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_strong_applicant_is_eligible() {
        let result = EligibilityChecker::default()
            .check(&strong_applicant())
            .unwrap();

        assert!(result.eligible);
        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert!(result.score > dec!(80));
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("criteria met")));
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_previous_defaults_force_rejection() {
        let mut applicant = strong_applicant();
        applicant.previous_defaults = true;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert!(result.reasons.iter().any(|r| r.contains("defaults")));
    }

    #[test]
    fn test_unemployed_is_critical_failure() {
        let mut applicant = strong_applicant();
        applicant.employment_status = EmploymentStatus::Unemployed;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert!(result.reasons.iter().any(|r| r.contains("Unemployed")));
    }

    #[test]
    fn test_short_tenure_is_conditional_not_rejected() {
        let mut applicant = strong_applicant();
        applicant.employment_length_years = dec!(0.5);

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert_eq!(result.status, EligibilityStatus::Conditional);
        assert!(result.reasons.iter().any(|r| r.contains("Employment length")));
        assert!(!result.recommendations.is_empty());
    }

    #[test]
    fn test_low_income_fails() {
        let mut applicant = strong_applicant();
        applicant.monthly_income = Money::from_major(3_000);
        // keep the requested amount sane relative to income so the income
        // check is the one that fires
        applicant.requested_loan_amount = Money::from_major(10_000);

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert!(result.reasons.iter().any(|r| r.contains("Monthly income")));
    }

    #[test]
    fn test_low_credit_score_fails() {
        let mut applicant = strong_applicant();
        applicant.credit_score = 550;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert!(result.reasons.iter().any(|r| r.contains("Credit score")));
    }

    #[test]
    fn test_high_dti_fails() {
        let mut applicant = strong_applicant();
        applicant.monthly_debt_obligations = Money::from_major(6_000);

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("Debt-to-income")));
    }

    #[test]
    fn test_excessive_amount_forces_rejection() {
        let mut applicant = strong_applicant();
        applicant.requested_loan_amount = Money::from_major(2_000_000);

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("exceeds the maximum")));
    }

    #[test]
    fn test_loan_to_income_over_three_forces_rejection() {
        let mut applicant = strong_applicant();
        // 50k monthly income would pass every other gate; 45x annual income
        // in requested principal must not
        applicant.monthly_income = Money::from_major(5_000);
        applicant.requested_loan_amount = Money::from_major(200_000);
        applicant.monthly_debt_obligations = Money::ZERO;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert_eq!(result.status, EligibilityStatus::NotEligible);
        assert!(result.reasons.iter().any(|r| r.contains("annual income")));
    }

    #[test]
    fn test_maturity_age_ceiling() {
        let mut applicant = strong_applicant();
        applicant.age = 64;
        applicant.loan_term_months = 36;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(!result.eligible);
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("maturity age")));
    }

    #[test]
    fn test_retired_under_sixty_flagged_but_passes() {
        let mut applicant = strong_applicant();
        applicant.employment_status = EmploymentStatus::Retired;
        applicant.age = 55;

        let result = EligibilityChecker::default().check(&applicant).unwrap();

        assert!(result.eligible);
        assert!(result
            .reasons
            .iter()
            .any(|r| r.contains("Early retirement")));
    }

    #[test]
    fn test_score_monotonic_in_credit_score() {
        let checker = EligibilityChecker::default();
        let mut prev_score = Decimal::ZERO;

        for credit in [600u32, 650, 700, 750, 800] {
            let mut applicant = strong_applicant();
            applicant.credit_score = credit;
            let result = checker.check(&applicant).unwrap();
            assert!(
                result.score >= prev_score,
                "score must not decrease as credit improves"
            );
            prev_score = result.score;
        }
    }

    #[test]
    fn test_profile_construction_rejects_out_of_range() {
        let valid = strong_applicant();

        let too_young = ApplicantProfile { age: 17, ..valid.clone() };
        assert!(too_young.validate().is_err());

        let bad_credit = ApplicantProfile {
            credit_score: 900,
            ..valid.clone()
        };
        assert!(bad_credit.validate().is_err());

        let no_income = ApplicantProfile {
            monthly_income: Money::ZERO,
            ..valid.clone()
        };
        assert!(no_income.validate().is_err());

        let bad_term = ApplicantProfile {
            loan_term_months: 72,
            ..valid
        };
        assert!(bad_term.validate().is_err());
    }

    #[test]
    fn test_result_serializes_flat() {
        let result = EligibilityChecker::default()
            .check(&strong_applicant())
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"status\":\"eligible\""));
        assert!(json.contains("\"eligible\":true"));
    }
}
