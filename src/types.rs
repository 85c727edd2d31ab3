use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// supported loan products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Personal,
    Mortgage,
    Auto,
}

impl LoanType {
    /// human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoanType::Personal => "Personal Loan",
            LoanType::Mortgage => "Mortgage / Home Loan",
            LoanType::Auto => "Auto / Car Loan",
        }
    }

    /// brief description
    pub fn description(&self) -> &'static str {
        match self {
            LoanType::Personal => "Unsecured loan for personal expenses",
            LoanType::Mortgage => "Secured loan for property purchase",
            LoanType::Auto => "Secured loan for vehicle purchase",
        }
    }

    /// collateral backing this loan type, if any
    pub fn collateral(&self) -> Option<&'static str> {
        match self {
            LoanType::Personal => None,
            LoanType::Mortgage => Some("Real Estate"),
            LoanType::Auto => Some("Vehicle"),
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanType::Personal => "personal",
            LoanType::Mortgage => "mortgage",
            LoanType::Auto => "auto",
        };
        write!(f, "{s}")
    }
}

impl FromStr for LoanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "personal" => Ok(LoanType::Personal),
            "mortgage" => Ok(LoanType::Mortgage),
            "auto" => Ok(LoanType::Auto),
            other => Err(format!("unknown loan type: {other}")),
        }
    }
}

/// residency status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Residency {
    Citizen,
    Expat,
    NonResident,
}

impl Residency {
    /// parse a boundary string; unknown values come back as None so rule
    /// lookup falls through to the catch-all rule instead of failing
    pub fn parse(s: &str) -> Option<Residency> {
        match s.to_ascii_lowercase().as_str() {
            "citizen" => Some(Residency::Citizen),
            "expat" => Some(Residency::Expat),
            "non_resident" => Some(Residency::NonResident),
            _ => None,
        }
    }
}

impl fmt::Display for Residency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Residency::Citizen => "citizen",
            Residency::Expat => "expat",
            Residency::NonResident => "non_resident",
        };
        write!(f, "{s}")
    }
}

/// property tier for mortgage rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    First,
    Second,
    Investment,
}

impl PropertyType {
    pub fn parse(s: &str) -> Option<PropertyType> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Some(PropertyType::First),
            "second" => Some(PropertyType::Second),
            "investment" => Some(PropertyType::Investment),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyType::First => "first",
            PropertyType::Second => "second",
            PropertyType::Investment => "investment",
        };
        write!(f, "{s}")
    }
}

/// vehicle condition for auto loan rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    New,
    Used,
}

impl VehicleType {
    pub fn parse(s: &str) -> Option<VehicleType> {
        match s.to_ascii_lowercase().as_str() {
            "new" => Some(VehicleType::New),
            "used" => Some(VehicleType::Used),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleType::New => "new",
            VehicleType::Used => "used",
        };
        write!(f, "{s}")
    }
}

/// employment status categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    FullTime,
    PartTime,
    SelfEmployed,
    Unemployed,
    Retired,
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EmploymentStatus::FullTime => "full_time",
            EmploymentStatus::PartTime => "part_time",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
        };
        write!(f, "{s}")
    }
}

/// loan eligibility status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    NotEligible,
    /// all critical checks passed but a borderline condition needs review
    Conditional,
}

impl fmt::Display for EligibilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EligibilityStatus::Eligible => "eligible",
            EligibilityStatus::NotEligible => "not_eligible",
            EligibilityStatus::Conditional => "conditional",
        };
        write!(f, "{s}")
    }
}
