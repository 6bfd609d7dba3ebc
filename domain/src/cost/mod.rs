//! Spend accounting against configured budgets.

pub mod ledger;

pub use ledger::{BudgetPeriod, BudgetStatus, CostLedger, PeriodStatus};
