use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A spending limit over an inclusive date range. Spent/remaining figures
/// are always recomputed from transactions, never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Option<Uuid>,
    pub name: String,
    pub currency: String,
    /// Positive spending limit for the period.
    pub amount: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

impl Budget {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        amount: f64,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_id: None,
            name: name.into(),
            currency: "USD".into(),
            amount,
            period_start,
            period_end,
        }
    }

    /// Whether `date` falls inside the budget period (inclusive bounds).
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }
}
