//! Savings plan projection: required monthly/daily rates toward a target
//! amount and date, classified against the user's estimated capacity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::{InsightError, InsightResult};

use super::overview::OverviewService;
use crate::ledger::LedgerStore;

/// Average Gregorian month length in days.
const DAYS_PER_MONTH: f64 = 30.44;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavingsPlanRequest {
    pub target_amount: f64,
    pub target_date: NaiveDate,
    /// Overrides the balance-derived starting point when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_savings: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    OnTrack,
    Stretch,
    Unrealistic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub months_remaining: u32,
    /// Negative when the target date is already past.
    pub days_remaining: i64,
    pub effective_current_savings: f64,
    pub amount_still_needed: f64,
    pub required_monthly_savings: f64,
    pub required_daily_savings: f64,
    /// Fraction of estimated monthly income that must be saved; 1.0 when
    /// income is zero or unknown.
    pub required_savings_rate: f64,
    pub estimated_monthly_income: f64,
    pub estimated_savings_capacity: f64,
    pub status: PlanStatus,
    pub notes: Vec<String>,
}

pub struct SavingsPlanner;

impl SavingsPlanner {
    /// Projects the savings rate required to reach `target_amount` by
    /// `target_date`, judged against the trailing-window overview.
    pub fn plan(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        today: NaiveDate,
        request: SavingsPlanRequest,
    ) -> InsightResult<SavingsPlan> {
        if !(request.target_amount > 0.0) {
            return Err(InsightError::InvalidInput(
                "target amount must be positive".into(),
            ));
        }

        let overview = OverviewService::compute(store, config, user_id, today)?;

        let days_remaining = (request.target_date - today).num_days();
        let months_remaining =
            ((days_remaining as f64 / DAYS_PER_MONTH).ceil().max(0.0)) as u32;

        let effective_current_savings = request
            .current_savings
            .unwrap_or(overview.current_balance);
        let amount_still_needed =
            (request.target_amount - effective_current_savings).max(0.0);

        // With no time left the full remainder is required now.
        let required_monthly_savings = if months_remaining > 0 {
            amount_still_needed / months_remaining as f64
        } else {
            amount_still_needed
        };
        let required_daily_savings = if days_remaining > 0 {
            amount_still_needed / days_remaining as f64
        } else {
            amount_still_needed
        };
        let required_savings_rate = if overview.estimated_monthly_income > 0.0 {
            required_monthly_savings / overview.estimated_monthly_income
        } else {
            1.0
        };

        let mut notes = Vec::new();
        if days_remaining < 0 {
            notes.push("Target date has already passed; the remaining amount is due immediately.".to_string());
        }
        if overview.savings_capacity < 0.0 {
            notes.push(
                "Spending currently exceeds income, leaving no monthly savings capacity."
                    .to_string(),
            );
        }

        let status = if required_monthly_savings <= overview.savings_capacity {
            PlanStatus::OnTrack
        } else if required_monthly_savings > overview.estimated_monthly_income {
            notes.push(format!(
                "Saving {:.2} per month exceeds the estimated monthly income of {:.2}.",
                required_monthly_savings, overview.estimated_monthly_income
            ));
            PlanStatus::Unrealistic
        } else {
            notes.push(format!(
                "Saving {:.2} per month is above the estimated capacity of {:.2}; spending cuts are needed.",
                required_monthly_savings, overview.savings_capacity
            ));
            PlanStatus::Stretch
        };

        Ok(SavingsPlan {
            generated_at: Utc::now(),
            currency: overview.currency,
            target_amount: request.target_amount,
            target_date: request.target_date,
            months_remaining,
            days_remaining,
            effective_current_savings,
            amount_still_needed,
            required_monthly_savings,
            required_daily_savings,
            required_savings_rate,
            estimated_monthly_income: overview.estimated_monthly_income,
            estimated_savings_capacity: overview.savings_capacity,
            status,
            notes,
        })
    }
}
