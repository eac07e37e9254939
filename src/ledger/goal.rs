use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Paused,
    Reached,
    Cancelled,
}

/// A savings target with a cached running amount maintained by the CRUD
/// layer; forecasts read it, never update it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
}

impl SavingsGoal {
    pub fn new(user_id: Uuid, name: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            target_date: None,
            status: GoalStatus::Active,
        }
    }
}
