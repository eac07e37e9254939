mod common;

use common::{date, seeded_personal_ledger};
use uuid::Uuid;

use insights_core::config::InsightConfig;
use insights_core::insights::{
    BusinessForecastRequest, ForecastService, MonthKey, PersonalForecastRequest,
};
use insights_core::ledger::{
    Account, Direction, MemoryLedger, PipelineStage, Project, SavingsGoal, Transaction,
};

#[test]
fn personal_forecast_derives_contribution_and_completes_goals() {
    let user = Uuid::new_v4();
    let mut ledger = seeded_personal_ledger(user);
    let mut goal = SavingsGoal::new(user, "Emergency fund", 2000.0);
    goal.current_amount = 500.0;
    ledger.add_goal(goal);

    let forecast = ForecastService::personal(
        &ledger,
        &InsightConfig::default(),
        user,
        date(2024, 12, 20),
        PersonalForecastRequest::default(),
    )
    .unwrap();

    // Six trailing months each carry a 300 savings-tagged outflow.
    assert!((forecast.monthly_contribution - 300.0).abs() < 1e-6);
    assert_eq!(forecast.horizon_months, 12);
    assert_eq!(forecast.points.first().unwrap().month, MonthKey::new(2025, 1));
    assert_eq!(forecast.points.last().unwrap().month, MonthKey::new(2025, 12));

    // 500 + 300 * 5 = 2000: reached in the fifth simulated month.
    assert_eq!(forecast.completions.len(), 1);
    assert_eq!(forecast.completions[0].month, MonthKey::new(2025, 5));
}

#[test]
fn business_forecast_combines_pipeline_and_recurring_costs() {
    let user = Uuid::new_v4();
    let business = Uuid::new_v4();
    let today = date(2024, 12, 10);
    let mut ledger = MemoryLedger::new();
    let ops = ledger.add_account(Account::new(user, "Ops", "EUR").for_business(business));

    // 3000 across the trailing six months: 500/month recurring.
    for month in [8u32, 10, 12] {
        ledger.add_transaction(
            Transaction::new(user, ops, date(2024, month, 4), Direction::Out, 1000.0, "Payroll")
                .for_business(business),
        );
    }

    let mut retainer = Project::new(business, "Retainer", PipelineStage::InProgress);
    retainer.start_date = Some(date(2025, 1, 1));
    retainer.due_date = Some(date(2025, 6, 30));
    retainer.budget_amount = Some(12000.0);
    ledger.add_project(retainer);

    let mut lead = Project::new(business, "Lead", PipelineStage::Prospecting);
    lead.budget_amount = Some(5000.0);
    ledger.add_project(lead);

    let forecast = ForecastService::business(
        &ledger,
        &InsightConfig::default(),
        user,
        business,
        today,
        BusinessForecastRequest {
            horizon_months: Some(8),
        },
    )
    .unwrap();

    assert_eq!(forecast.currency, "EUR");
    assert!((forecast.recurring_expenses_per_month - 500.0).abs() < 1e-6);
    // 0.8 * 12000 + 0.2 * 5000.
    assert!((forecast.pipeline_weighted_revenue - 10600.0).abs() < 1e-6);

    // Jan..Jun recognize 2000/month; Jul and Aug fall outside the project.
    for (idx, point) in forecast.points.iter().enumerate() {
        let expected_revenue = if idx < 6 { 2000.0 } else { 0.0 };
        assert!((point.projected_revenue - expected_revenue).abs() < 1e-6);
        assert!((point.projected_margin - (expected_revenue - 500.0)).abs() < 1e-6);
    }
}

#[test]
fn horizon_is_always_clamped_to_the_supported_range() {
    let user = Uuid::new_v4();
    let ledger = MemoryLedger::new();
    let config = InsightConfig::default();
    let today = date(2024, 3, 1);

    let wide = ForecastService::personal(
        &ledger,
        &config,
        user,
        today,
        PersonalForecastRequest {
            horizon_months: Some(100),
            monthly_contribution: Some(50.0),
        },
    )
    .unwrap();
    assert_eq!(wide.points.len(), 36);

    let narrow = ForecastService::business(
        &ledger,
        &config,
        user,
        Uuid::new_v4(),
        today,
        BusinessForecastRequest {
            horizon_months: Some(0),
        },
    )
    .unwrap();
    assert_eq!(narrow.points.len(), 1);
}
