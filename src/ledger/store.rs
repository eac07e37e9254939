use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::InsightResult;

use super::{Account, Budget, Direction, GoalStatus, Project, SavingsGoal, Transaction};

/// Which side of the personal/business partition a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Personal,
    Business(Uuid),
}

impl Scope {
    /// Whether an entity tagged with `business_id` belongs to this scope.
    pub fn matches(&self, business_id: Option<Uuid>) -> bool {
        match self {
            Scope::Personal => business_id.is_none(),
            Scope::Business(id) => business_id == Some(*id),
        }
    }
}

/// Inclusive date bounds for transaction queries; open ends select
/// everything on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn from(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Read surface of the external ledger store. Implementations are passed
/// to each insight operation explicitly; there is no shared global client.
pub trait LedgerStore: Send + Sync {
    fn find_transactions(
        &self,
        user_id: Uuid,
        scope: Scope,
        range: Option<DateRange>,
        direction: Option<Direction>,
    ) -> InsightResult<Vec<Transaction>>;

    fn find_accounts(
        &self,
        user_id: Uuid,
        scope: Scope,
        active_only: bool,
    ) -> InsightResult<Vec<Account>>;

    /// `active_on` filters to budgets whose period contains the given date.
    fn find_budgets(
        &self,
        user_id: Uuid,
        scope: Scope,
        active_on: Option<NaiveDate>,
    ) -> InsightResult<Vec<Budget>>;

    fn find_savings_goals(
        &self,
        user_id: Uuid,
        statuses: &[GoalStatus],
    ) -> InsightResult<Vec<SavingsGoal>>;

    fn find_projects(&self, business_id: Uuid) -> InsightResult<Vec<Project>>;
}
