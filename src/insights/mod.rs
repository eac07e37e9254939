//! The analytical services: overview, savings planning, seasonality,
//! health scoring, budget consumption, and forecasting. Every operation is
//! a pure read: one or more ledger queries followed by CPU-bound math,
//! returning a transient DTO stamped with `generated_at`.

pub mod aggregate;
pub mod budget;
pub mod forecast;
pub mod health;
pub mod month;
pub mod overview;
pub mod savings;
pub mod seasonality;

pub use aggregate::{bucket_by, share_of, signed_amount, with_shares, Bucket, BucketShare};
pub use budget::{BudgetConsumption, BudgetReport, BudgetReview};
pub use forecast::{
    BusinessForecast, BusinessForecastPoint, BusinessForecastRequest, ForecastService,
    GoalCompletion, GoalProjection, PersonalForecast, PersonalForecastPoint,
    PersonalForecastRequest,
};
pub use health::{Grade, HealthReport, HealthService};
pub use month::MonthKey;
pub use overview::{OverviewReport, OverviewService};
pub use savings::{PlanStatus, SavingsPlan, SavingsPlanRequest, SavingsPlanner};
pub use seasonality::{MonthlyPoint, SeasonalityReport, SeasonalityService};

use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::InsightResult;
use crate::ledger::{LedgerStore, Scope};

/// Currency code for a DTO: the first active account in scope, falling back
/// to the configured base currency.
pub(crate) fn resolve_currency(
    store: &impl LedgerStore,
    config: &InsightConfig,
    user_id: Uuid,
    scope: Scope,
) -> InsightResult<String> {
    let accounts = store.find_accounts(user_id, scope, true)?;
    Ok(accounts
        .first()
        .map(|account| account.currency.clone())
        .unwrap_or_else(|| config.base_currency.clone()))
}
