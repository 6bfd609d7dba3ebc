//! Running spend totals against daily and monthly budgets
//!
//! The ledger never blocks execution. It only reports totals so that a
//! caller or policy layer can decide to refuse further requests.

use crate::config::BudgetLimits;
use crate::util::non_negative;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Daily,
    Monthly,
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Daily => write!(f, "daily"),
            BudgetPeriod::Monthly => write!(f, "monthly"),
        }
    }
}

/// Spend for one period compared to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatus {
    pub spent: f64,
    pub limit: f64,
    /// `max(0, limit - spent)`
    pub remaining: f64,
    pub exceeded: bool,
}

impl PeriodStatus {
    fn new(spent: f64, limit: f64) -> Self {
        Self {
            spent,
            limit,
            remaining: (limit - spent).max(0.0),
            exceeded: spent > limit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub daily: PeriodStatus,
    pub monthly: PeriodStatus,
}

impl BudgetStatus {
    pub fn any_exceeded(&self) -> bool {
        self.daily.exceeded || self.monthly.exceeded
    }
}

/// Accumulates spend; totals reset when the calendar day or month changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CostLedger {
    day: NaiveDate,
    daily_total: f64,
    monthly_total: f64,
}

impl CostLedger {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            day: today,
            daily_total: 0.0,
            monthly_total: 0.0,
        }
    }

    /// Add spend. Negative or non-finite amounts are ignored.
    pub fn charge(&mut self, amount: f64, today: NaiveDate) {
        self.roll_over(today);
        let amount = if amount.is_finite() { non_negative(amount) } else { 0.0 };
        self.daily_total += amount;
        self.monthly_total += amount;
    }

    /// Spend recorded for the period containing `today`.
    pub fn spent(&self, period: BudgetPeriod, today: NaiveDate) -> f64 {
        match period {
            BudgetPeriod::Daily if self.day == today => self.daily_total,
            BudgetPeriod::Monthly if same_month(self.day, today) => self.monthly_total,
            _ => 0.0,
        }
    }

    /// Budget left for the period, never negative.
    pub fn remaining(&self, period: BudgetPeriod, limits: &BudgetLimits, today: NaiveDate) -> f64 {
        let limit = match period {
            BudgetPeriod::Daily => limits.daily,
            BudgetPeriod::Monthly => limits.monthly,
        };
        (limit - self.spent(period, today)).max(0.0)
    }

    pub fn status(&self, limits: &BudgetLimits, today: NaiveDate) -> BudgetStatus {
        BudgetStatus {
            daily: PeriodStatus::new(self.spent(BudgetPeriod::Daily, today), limits.daily),
            monthly: PeriodStatus::new(self.spent(BudgetPeriod::Monthly, today), limits.monthly),
        }
    }

    fn roll_over(&mut self, today: NaiveDate) {
        if today == self.day {
            return;
        }
        if !same_month(self.day, today) {
            self.monthly_total = 0.0;
        }
        self.daily_total = 0.0;
        self.day = today;
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn limits() -> BudgetLimits {
        BudgetLimits {
            daily: 1.0,
            monthly: 5.0,
        }
    }

    #[test]
    fn test_charge_accumulates() {
        let today = date(2026, 3, 10);
        let mut ledger = CostLedger::new(today);
        ledger.charge(0.25, today);
        ledger.charge(0.5, today);

        assert!((ledger.spent(BudgetPeriod::Daily, today) - 0.75).abs() < 1e-12);
        assert!((ledger.remaining(BudgetPeriod::Daily, &limits(), today) - 0.25).abs() < 1e-12);
        assert!((ledger.remaining(BudgetPeriod::Monthly, &limits(), today) - 4.25).abs() < 1e-12);
    }

    #[test]
    fn test_day_rollover_keeps_month() {
        let mut ledger = CostLedger::new(date(2026, 3, 10));
        ledger.charge(0.8, date(2026, 3, 10));
        ledger.charge(0.3, date(2026, 3, 11));

        let today = date(2026, 3, 11);
        assert!((ledger.spent(BudgetPeriod::Daily, today) - 0.3).abs() < 1e-12);
        assert!((ledger.spent(BudgetPeriod::Monthly, today) - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_month_rollover_resets_both() {
        let mut ledger = CostLedger::new(date(2026, 3, 31));
        ledger.charge(2.0, date(2026, 3, 31));
        ledger.charge(0.1, date(2026, 4, 1));
        let today = date(2026, 4, 1);
        assert!((ledger.spent(BudgetPeriod::Monthly, today) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_reads_do_not_see_stale_periods() {
        let mut ledger = CostLedger::new(date(2026, 3, 10));
        ledger.charge(0.9, date(2026, 3, 10));
        assert_eq!(ledger.spent(BudgetPeriod::Daily, date(2026, 3, 12)), 0.0);
        assert_eq!(ledger.spent(BudgetPeriod::Monthly, date(2026, 5, 1)), 0.0);
    }

    #[test]
    fn test_status_reports_exceeded_without_blocking() {
        let today = date(2026, 3, 10);
        let mut ledger = CostLedger::new(today);
        ledger.charge(1.5, today);
        ledger.charge(0.5, today);

        let status = ledger.status(&limits(), today);
        assert!(status.daily.exceeded);
        assert_eq!(status.daily.remaining, 0.0);
        assert!(!status.monthly.exceeded);
        assert!(status.any_exceeded());
    }

    #[test]
    fn test_ignores_invalid_amounts() {
        let today = date(2026, 3, 10);
        let mut ledger = CostLedger::new(today);
        ledger.charge(-4.0, today);
        ledger.charge(f64::INFINITY, today);
        ledger.charge(f64::NAN, today);
        assert_eq!(ledger.spent(BudgetPeriod::Daily, today), 0.0);
    }
}
