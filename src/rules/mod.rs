pub mod auto;
pub mod mortgage;

pub use auto::{auto_loan_rules, get_auto_loan_rule, AutoLoanRule};
pub use mortgage::{describe_mortgage_rules, get_mortgage_rule, mortgage_rules, MortgageRule};
