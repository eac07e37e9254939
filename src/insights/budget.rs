//! Budget consumption: spent/remaining/utilization against the
//! transactions that fall inside a budget period. Always recomputed from
//! source data; nothing here is cached or incrementally maintained.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InsightResult;
use crate::ledger::{Budget, DateRange, Direction, LedgerStore, Scope, Transaction};

use super::share_of;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetConsumption {
    pub spent: f64,
    /// Unclamped; negative signals over-budget. Presentation layers may
    /// clamp for display, this value stays authoritative.
    pub remaining: f64,
    /// `spent / amount`, 0 when the limit is zero.
    pub consumption_rate: f64,
    /// `consumption_rate` as a percentage, uncapped.
    pub utilization_pct: f64,
    pub over_budget: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub generated_at: DateTime<Utc>,
    pub budget_id: Uuid,
    pub name: String,
    pub currency: String,
    pub amount: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub consumption: BudgetConsumption,
}

pub struct BudgetReview;

impl BudgetReview {
    /// Pure consumption kernel: sums `Out` transactions dated inside the
    /// budget period (inclusive bounds). Other directions and out-of-period
    /// dates are ignored, so callers may pass an unfiltered slice.
    pub fn consumption(budget: &Budget, transactions: &[Transaction]) -> BudgetConsumption {
        let spent: f64 = transactions
            .iter()
            .filter(|txn| txn.direction == Direction::Out)
            .filter(|txn| budget.covers(txn.date))
            .map(|txn| txn.amount)
            .sum();
        let remaining = budget.amount - spent;
        let consumption_rate = share_of(spent, budget.amount);
        BudgetConsumption {
            spent,
            remaining,
            consumption_rate,
            utilization_pct: consumption_rate * 100.0,
            over_budget: spent > budget.amount,
        }
    }

    /// Loads the owner's budgets in scope and computes consumption for each
    /// from the transactions overlapping its period.
    pub fn review(
        store: &impl LedgerStore,
        user_id: Uuid,
        scope: Scope,
        active_on: Option<NaiveDate>,
    ) -> InsightResult<Vec<BudgetReport>> {
        let budgets = store.find_budgets(user_id, scope, active_on)?;
        let mut reports = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let transactions = store.find_transactions(
                user_id,
                scope,
                Some(DateRange::between(budget.period_start, budget.period_end)),
                Some(Direction::Out),
            )?;
            let consumption = Self::consumption(&budget, &transactions);
            reports.push(BudgetReport {
                generated_at: Utc::now(),
                budget_id: budget.id,
                name: budget.name,
                currency: budget.currency,
                amount: budget.amount,
                period_start: budget.period_start,
                period_end: budget.period_end,
                consumption,
            });
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, MemoryLedger};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn out(user: Uuid, account: Uuid, on: NaiveDate, amount: f64) -> Transaction {
        Transaction::new(user, account, on, Direction::Out, amount, "spend")
    }

    #[test]
    fn sums_only_out_transactions_inside_the_period() {
        let user = Uuid::new_v4();
        let account = Uuid::new_v4();
        let budget = Budget::new(user, "March", 400.0, date(2024, 3, 1), date(2024, 3, 31));
        let transactions = vec![
            out(user, account, date(2024, 3, 1), 100.0),
            out(user, account, date(2024, 3, 31), 50.0),
            out(user, account, date(2024, 2, 29), 999.0),
            out(user, account, date(2024, 4, 1), 999.0),
            Transaction::new(
                user,
                account,
                date(2024, 3, 15),
                Direction::In,
                75.0,
                "refund",
            ),
            Transaction::new(
                user,
                account,
                date(2024, 3, 15),
                Direction::Transfer,
                60.0,
                "shuffle",
            ),
        ];

        let consumption = BudgetReview::consumption(&budget, &transactions);
        assert_eq!(consumption.spent, 150.0);
        assert_eq!(consumption.remaining, 250.0);
        assert!((consumption.consumption_rate - 0.375).abs() < 1e-9);
        assert!((consumption.utilization_pct - 37.5).abs() < 1e-9);
        assert!(!consumption.over_budget);
    }

    #[test]
    fn over_budget_keeps_remaining_negative() {
        let user = Uuid::new_v4();
        let budget = Budget::new(user, "Tight", 100.0, date(2024, 1, 1), date(2024, 1, 31));
        let transactions = vec![out(user, Uuid::new_v4(), date(2024, 1, 10), 130.0)];
        let consumption = BudgetReview::consumption(&budget, &transactions);
        assert_eq!(consumption.remaining, -30.0);
        assert!((consumption.utilization_pct - 130.0).abs() < 1e-9);
        assert!(consumption.over_budget);
    }

    #[test]
    fn zero_limit_never_divides_by_zero() {
        let user = Uuid::new_v4();
        let budget = Budget::new(user, "Empty", 0.0, date(2024, 1, 1), date(2024, 1, 31));
        let transactions = vec![out(user, Uuid::new_v4(), date(2024, 1, 5), 40.0)];
        let consumption = BudgetReview::consumption(&budget, &transactions);
        assert_eq!(consumption.consumption_rate, 0.0);
        assert!(consumption.over_budget);
    }

    #[test]
    fn consumption_is_idempotent_for_a_fixed_transaction_set() {
        let user = Uuid::new_v4();
        let budget = Budget::new(user, "Repeat", 300.0, date(2024, 5, 1), date(2024, 5, 31));
        let transactions = vec![
            out(user, Uuid::new_v4(), date(2024, 5, 4), 120.0),
            out(user, Uuid::new_v4(), date(2024, 5, 20), 45.5),
        ];
        let first = BudgetReview::consumption(&budget, &transactions);
        let second = BudgetReview::consumption(&budget, &transactions);
        assert_eq!(first, second);
    }

    #[test]
    fn review_reports_each_budget_against_its_own_period() {
        let user = Uuid::new_v4();
        let mut ledger = MemoryLedger::new();
        let account = ledger.add_account(Account::new(user, "Checking", "USD"));
        ledger.add_budget(Budget::new(
            user,
            "January",
            500.0,
            date(2024, 1, 1),
            date(2024, 1, 31),
        ));
        ledger.add_budget(Budget::new(
            user,
            "February",
            500.0,
            date(2024, 2, 1),
            date(2024, 2, 29),
        ));
        ledger.add_transaction(out(user, account, date(2024, 1, 15), 200.0));
        ledger.add_transaction(out(user, account, date(2024, 2, 15), 600.0));

        let reports = BudgetReview::review(&ledger, user, Scope::Personal, None).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].consumption.spent, 200.0);
        assert!(!reports[0].consumption.over_budget);
        assert_eq!(reports[1].consumption.spent, 600.0);
        assert!(reports[1].consumption.over_budget);
        assert_eq!(reports[1].consumption.remaining, -100.0);
    }
}
