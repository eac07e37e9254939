use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money movement relative to the owning user.
///
/// `Transfer` is balance-neutral movement between a user's own accounts and
/// never counts toward income or spending aggregates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    In,
    Out,
    Transfer,
}

/// A single ledger movement. `amount` is a non-negative magnitude; the sign
/// is derived from `direction`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub business_id: Option<Uuid>,
    pub account_id: Uuid,
    /// Date-only, UTC-normalized; time of day is discarded upstream.
    pub date: NaiveDate,
    pub direction: Direction,
    pub amount: f64,
    pub currency: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        user_id: Uuid,
        account_id: Uuid,
        date: NaiveDate,
        direction: Direction,
        amount: f64,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_id: None,
            account_id,
            date,
            direction,
            amount,
            currency: "USD".into(),
            label: label.into(),
            category: None,
            notes: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn for_business(mut self, business_id: Uuid) -> Self {
        self.business_id = Some(business_id);
        self
    }
}
