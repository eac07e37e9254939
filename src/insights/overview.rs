//! Trailing-window income/spending overview: the estimated monthly figures
//! the savings planner and health scorer build on.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::InsightResult;
use crate::ledger::{DateRange, Direction, LedgerStore, Scope};

use super::aggregate::{bucket_by, signed_amount, with_shares, BucketShare};
use super::month::MonthKey;
use super::resolve_currency;

pub(crate) const UNCATEGORIZED: &str = "uncategorized";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewReport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub window_months: u32,
    pub total_income: f64,
    pub total_spending: f64,
    pub estimated_monthly_income: f64,
    pub estimated_monthly_spending: f64,
    /// Income estimate minus spending estimate; negative when the user
    /// spends more than they earn.
    pub savings_capacity: f64,
    /// Net position across active accounts flagged for net worth.
    pub current_balance: f64,
    pub spending_by_category: Vec<BucketShare>,
    pub income_by_source: Vec<BucketShare>,
    pub top_category: Option<String>,
    pub top_source: Option<String>,
}

pub struct OverviewService;

impl OverviewService {
    /// Aggregates the user's personal activity over the configured trailing
    /// window of whole calendar months ending at `today`'s month.
    pub fn compute(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        today: NaiveDate,
    ) -> InsightResult<OverviewReport> {
        let months = config.default_window_months.max(1);
        let current = MonthKey::from_date(today);
        let earliest = current.add(-(months as i32 - 1));

        let window_txns: Vec<_> = store
            .find_transactions(
                user_id,
                Scope::Personal,
                Some(DateRange::from(earliest.first_day())),
                None,
            )?
            .into_iter()
            .filter(|txn| {
                let slot = earliest.diff(MonthKey::from_date(txn.date));
                (0..months as i64).contains(&slot)
            })
            .collect();

        let mut total_income = 0.0;
        let mut total_spending = 0.0;
        for txn in &window_txns {
            match txn.direction {
                Direction::In => total_income += txn.amount,
                Direction::Out => total_spending += txn.amount,
                Direction::Transfer => {}
            }
        }
        let estimated_monthly_income = total_income / months as f64;
        let estimated_monthly_spending = total_spending / months as f64;

        let spending: Vec<_> = window_txns
            .iter()
            .filter(|txn| txn.direction == Direction::Out)
            .cloned()
            .collect();
        let income: Vec<_> = window_txns
            .iter()
            .filter(|txn| txn.direction == Direction::In)
            .cloned()
            .collect();
        let spending_by_category = with_shares(bucket_by(&spending, |txn| {
            txn.category.clone().unwrap_or_else(|| UNCATEGORIZED.into())
        }));
        let income_by_source = with_shares(bucket_by(&income, |txn| txn.label.clone()));

        let current_balance = Self::current_balance(store, user_id)?;
        let currency = resolve_currency(store, config, user_id, Scope::Personal)?;

        Ok(OverviewReport {
            generated_at: Utc::now(),
            currency,
            window_months: months,
            total_income,
            total_spending,
            estimated_monthly_income,
            estimated_monthly_spending,
            savings_capacity: estimated_monthly_income - estimated_monthly_spending,
            current_balance,
            top_category: spending_by_category.first().map(|b| b.key.clone()),
            top_source: income_by_source.first().map(|b| b.key.clone()),
            spending_by_category,
            income_by_source,
        })
    }

    /// Signed sum over the full history of accounts that are active and
    /// included in net worth. Transfers net to zero by construction.
    fn current_balance(store: &impl LedgerStore, user_id: Uuid) -> InsightResult<f64> {
        let accounts = store.find_accounts(user_id, Scope::Personal, true)?;
        let included: Vec<Uuid> = accounts
            .iter()
            .filter(|account| account.include_in_net_worth)
            .map(|account| account.id)
            .collect();
        let transactions = store.find_transactions(user_id, Scope::Personal, None, None)?;
        Ok(transactions
            .iter()
            .filter(|txn| included.contains(&txn.account_id))
            .map(signed_amount)
            .sum())
    }
}
