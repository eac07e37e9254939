use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A financial account owned by a user, optionally scoped to a business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub user_id: Uuid,
    /// `None` marks a personal account.
    pub business_id: Option<Uuid>,
    pub name: String,
    pub currency: String,
    pub is_active: bool,
    pub include_in_budget: bool,
    pub include_in_net_worth: bool,
}

impl Account {
    /// Creates an active personal account included in all rollups.
    pub fn new(user_id: Uuid, name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            business_id: None,
            name: name.into(),
            currency: currency.into(),
            is_active: true,
            include_in_budget: true,
            include_in_net_worth: true,
        }
    }

    pub fn for_business(mut self, business_id: Uuid) -> Self {
        self.business_id = Some(business_id);
        self
    }
}
