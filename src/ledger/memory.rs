use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InsightResult;

use super::{
    Account, Budget, DateRange, Direction, GoalStatus, LedgerStore, Project, SavingsGoal, Scope,
    Transaction,
};

/// In-memory ledger snapshot implementing the [`LedgerStore`] read surface.
///
/// Entities are kept in insertion order so filtered query results, and
/// therefore every derived aggregation, stay deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        id
    }

    pub fn add_budget(&mut self, budget: Budget) -> Uuid {
        let id = budget.id;
        self.budgets.push(budget);
        id
    }

    pub fn add_goal(&mut self, goal: SavingsGoal) -> Uuid {
        let id = goal.id;
        self.goals.push(goal);
        id
    }

    pub fn add_project(&mut self, project: Project) -> Uuid {
        let id = project.id;
        self.projects.push(project);
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }
}

impl LedgerStore for MemoryLedger {
    fn find_transactions(
        &self,
        user_id: Uuid,
        scope: Scope,
        range: Option<DateRange>,
        direction: Option<Direction>,
    ) -> InsightResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .iter()
            .filter(|txn| txn.user_id == user_id)
            .filter(|txn| scope.matches(txn.business_id))
            .filter(|txn| range.map_or(true, |r| r.contains(txn.date)))
            .filter(|txn| direction.map_or(true, |d| txn.direction == d))
            .cloned()
            .collect())
    }

    fn find_accounts(
        &self,
        user_id: Uuid,
        scope: Scope,
        active_only: bool,
    ) -> InsightResult<Vec<Account>> {
        Ok(self
            .accounts
            .iter()
            .filter(|account| account.user_id == user_id)
            .filter(|account| scope.matches(account.business_id))
            .filter(|account| !active_only || account.is_active)
            .cloned()
            .collect())
    }

    fn find_budgets(
        &self,
        user_id: Uuid,
        scope: Scope,
        active_on: Option<NaiveDate>,
    ) -> InsightResult<Vec<Budget>> {
        Ok(self
            .budgets
            .iter()
            .filter(|budget| budget.user_id == user_id)
            .filter(|budget| scope.matches(budget.business_id))
            .filter(|budget| active_on.map_or(true, |date| budget.covers(date)))
            .cloned()
            .collect())
    }

    fn find_savings_goals(
        &self,
        user_id: Uuid,
        statuses: &[GoalStatus],
    ) -> InsightResult<Vec<SavingsGoal>> {
        Ok(self
            .goals
            .iter()
            .filter(|goal| goal.user_id == user_id)
            .filter(|goal| statuses.is_empty() || statuses.contains(&goal.status))
            .cloned()
            .collect())
    }

    fn find_projects(&self, business_id: Uuid) -> InsightResult<Vec<Project>> {
        Ok(self
            .projects
            .iter()
            .filter(|project| project.business_id == business_id)
            .cloned()
            .collect())
    }
}
