//! Forward projections: personal savings-goal growth and business
//! revenue/cost/margin, both driven by trailing historical averages.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::InsightResult;
use crate::ledger::{
    DateRange, Direction, GoalStatus, LedgerStore, Project, Scope, Transaction,
};

use super::month::MonthKey;
use super::resolve_currency;

const MIN_HORIZON: u32 = 1;
const MAX_HORIZON: u32 = 36;
const DEFAULT_HORIZON: u32 = 12;
/// Months of history feeding the contribution/expense averages.
const TRAILING_MONTHS: u32 = 6;
/// Category tag marking outflows that are really savings contributions.
const SAVINGS_CATEGORY: &str = "savings";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PersonalForecastRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_months: Option<u32>,
    /// Overrides the history-derived monthly contribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BusinessForecastRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProjection {
    pub goal_id: Uuid,
    pub name: String,
    /// Clamped at the goal's target.
    pub projected_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalForecastPoint {
    pub month: MonthKey,
    pub projected_total: f64,
    pub goals: Vec<GoalProjection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCompletion {
    pub goal_id: Uuid,
    pub name: String,
    /// First simulated month whose projection reaches the target.
    pub month: MonthKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalForecast {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub horizon_months: u32,
    pub monthly_contribution: f64,
    pub starting_total: f64,
    pub points: Vec<PersonalForecastPoint>,
    pub completions: Vec<GoalCompletion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessForecastPoint {
    pub month: MonthKey,
    pub projected_revenue: f64,
    pub recurring_expenses: f64,
    pub projected_margin: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessForecast {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub horizon_months: u32,
    pub recurring_expenses_per_month: f64,
    /// Σ project budget × pipeline-stage weight.
    pub pipeline_weighted_revenue: f64,
    pub points: Vec<BusinessForecastPoint>,
}

pub struct ForecastService;

impl ForecastService {
    /// Projects savings-goal growth month by month. The horizon is clamped
    /// to [1, 36]; simulation starts the month after `today`'s month.
    pub fn personal(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        today: NaiveDate,
        request: PersonalForecastRequest,
    ) -> InsightResult<PersonalForecast> {
        let horizon = clamp_horizon(request.horizon_months);
        let contribution = match request.monthly_contribution {
            Some(explicit) => explicit,
            None => trailing_out_average(store, user_id, Scope::Personal, today, |txn| {
                txn.category
                    .as_deref()
                    .map_or(false, |c| c.eq_ignore_ascii_case(SAVINGS_CATEGORY))
            })?,
        };

        let goals =
            store.find_savings_goals(user_id, &[GoalStatus::Active, GoalStatus::Paused])?;
        let starting_total: f64 = goals.iter().map(|goal| goal.current_amount).sum();
        tracing::debug!(horizon, goals = goals.len(), "simulating personal forecast");

        let current = MonthKey::from_date(today);
        let mut points = Vec::with_capacity(horizon as usize);
        let mut completions = Vec::new();
        let mut completed: Vec<Uuid> = Vec::new();
        for step in 1..=horizon {
            let month = current.add(step as i32);
            let contributed = contribution * step as f64;
            let projections = goals
                .iter()
                .map(|goal| {
                    let projected =
                        (goal.current_amount + contributed).min(goal.target_amount);
                    if projected >= goal.target_amount && !completed.contains(&goal.id) {
                        completed.push(goal.id);
                        completions.push(GoalCompletion {
                            goal_id: goal.id,
                            name: goal.name.clone(),
                            month,
                        });
                    }
                    GoalProjection {
                        goal_id: goal.id,
                        name: goal.name.clone(),
                        projected_amount: projected,
                    }
                })
                .collect();
            points.push(PersonalForecastPoint {
                month,
                projected_total: starting_total + contributed,
                goals: projections,
            });
        }

        Ok(PersonalForecast {
            generated_at: Utc::now(),
            currency: resolve_currency(store, config, user_id, Scope::Personal)?,
            horizon_months: horizon,
            monthly_contribution: contribution,
            starting_total,
            points,
            completions,
        })
    }

    /// Projects monthly revenue, recurring cost, and margin for a business.
    /// Revenue is recognized evenly across each project's start..=due month
    /// span; projects missing either date contribute nothing.
    pub fn business(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        business_id: Uuid,
        today: NaiveDate,
        request: BusinessForecastRequest,
    ) -> InsightResult<BusinessForecast> {
        let horizon = clamp_horizon(request.horizon_months);
        let scope = Scope::Business(business_id);
        let recurring =
            trailing_out_average(store, user_id, scope, today, |_| true)?;
        let projects = store.find_projects(business_id)?;
        tracing::debug!(horizon, projects = projects.len(), "simulating business forecast");

        let pipeline_weighted_revenue = projects
            .iter()
            .map(|project| project.budget_amount.unwrap_or(0.0) * project.stage.weight())
            .sum();

        let current = MonthKey::from_date(today);
        let points = (1..=horizon)
            .map(|step| {
                let month = current.add(step as i32);
                let projected_revenue = projects
                    .iter()
                    .map(|project| recognized_revenue(project, month))
                    .sum::<f64>();
                BusinessForecastPoint {
                    month,
                    projected_revenue,
                    recurring_expenses: recurring,
                    projected_margin: projected_revenue - recurring,
                }
            })
            .collect();

        Ok(BusinessForecast {
            generated_at: Utc::now(),
            currency: resolve_currency(store, config, user_id, scope)?,
            horizon_months: horizon,
            recurring_expenses_per_month: recurring,
            pipeline_weighted_revenue,
            points,
        })
    }
}

fn clamp_horizon(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_HORIZON).clamp(MIN_HORIZON, MAX_HORIZON)
}

/// Evenly spread slice of a project's budget for one simulated month; zero
/// outside the start..=due interval or when the project lacks dates/budget.
fn recognized_revenue(project: &Project, month: MonthKey) -> f64 {
    let (Some(start), Some(due), Some(budget)) =
        (project.start_date, project.due_date, project.budget_amount)
    else {
        return 0.0;
    };
    let start = MonthKey::from_date(start);
    let due = MonthKey::from_date(due);
    if month < start || month > due {
        return 0.0;
    }
    let span = MonthKey::span_inclusive(start, due).max(1);
    budget / span as f64
}

/// Average monthly `Out` volume over the trailing window, restricted by
/// `filter`. Months without matching activity still count toward the
/// divisor; empty history averages to zero.
fn trailing_out_average(
    store: &impl LedgerStore,
    user_id: Uuid,
    scope: Scope,
    today: NaiveDate,
    filter: impl Fn(&Transaction) -> bool,
) -> InsightResult<f64> {
    let current = MonthKey::from_date(today);
    let earliest = current.add(-(TRAILING_MONTHS as i32 - 1));
    let transactions = store.find_transactions(
        user_id,
        scope,
        Some(DateRange::from(earliest.first_day())),
        Some(Direction::Out),
    )?;
    let total: f64 = transactions
        .iter()
        .filter(|txn| {
            let slot = earliest.diff(MonthKey::from_date(txn.date));
            (0..TRAILING_MONTHS as i64).contains(&slot) && filter(*txn)
        })
        .map(|txn| txn.amount)
        .sum();
    Ok(total / TRAILING_MONTHS as f64)
}
