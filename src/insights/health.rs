//! Financial health scoring: a bounded 0–100 score with a letter grade,
//! built from the seasonality series and category/source aggregates.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::InsightResult;
use crate::ledger::{DateRange, Direction, LedgerStore, Scope};

use super::aggregate::{bucket_by, with_shares, BucketShare};
use super::month::MonthKey;
use super::overview::UNCATEGORIZED;
use super::resolve_currency;
use super::seasonality::SeasonalityService;

const RED_MONTH_PENALTY: f64 = 3.0;
const RED_MONTH_CAP: f64 = 40.0;
const VOLATILITY_FACTOR: f64 = 5.0;
const VOLATILITY_CAP: f64 = 30.0;
const SAVINGS_RATE_SWING: f64 = 30.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl Grade {
    /// Inclusive lower bounds: 85 → A, 70 → B, 55 → C, 40 → D, else E.
    pub fn for_score(score: f64) -> Self {
        if score >= 85.0 {
            Grade::A
        } else if score >= 70.0 {
            Grade::B
        } else if score >= 55.0 {
            Grade::C
        } else if score >= 40.0 {
            Grade::D
        } else {
            Grade::E
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub months: u32,
    pub score: f64,
    pub grade: Grade,
    pub months_in_red: usize,
    pub savings_rate: f64,
    /// Mean absolute z-score across the window.
    pub volatility: f64,
    pub notes: Vec<String>,
    pub spending_by_category: Vec<BucketShare>,
    pub income_by_source: Vec<BucketShare>,
    pub top_category: Option<String>,
    pub top_source: Option<String>,
}

pub struct HealthService;

impl HealthService {
    /// Scores the user's recent financial health over `months` (default 12)
    /// trailing calendar months. Pure scoring; nothing is persisted.
    pub fn score(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        today: NaiveDate,
        months: Option<u32>,
    ) -> InsightResult<HealthReport> {
        let seasonality = SeasonalityService::detect(store, config, user_id, today, months)?;
        let months = seasonality.months;

        let months_in_red = seasonality
            .points
            .iter()
            .filter(|point| point.net < 0.0)
            .count();
        let total_income: f64 = seasonality.points.iter().map(|p| p.income).sum();
        let total_net: f64 = seasonality.points.iter().map(|p| p.net).sum();
        let savings_rate = if total_income > 0.0 {
            total_net / total_income
        } else {
            0.0
        };
        let volatility = seasonality
            .points
            .iter()
            .map(|point| point.z_score.abs())
            .sum::<f64>()
            / seasonality.points.len() as f64;

        let raw = 100.0
            - (months_in_red as f64 * RED_MONTH_PENALTY).min(RED_MONTH_CAP)
            - (volatility * VOLATILITY_FACTOR).min(VOLATILITY_CAP)
            + (savings_rate * 100.0).clamp(-SAVINGS_RATE_SWING, SAVINGS_RATE_SWING);
        let score = raw.clamp(0.0, 100.0);
        let grade = Grade::for_score(score);

        let mut notes = Vec::new();
        if months_in_red > 0 {
            notes.push(format!(
                "{} of the last {} months ended with negative net cash flow.",
                months_in_red, months
            ));
        }
        if savings_rate > 0.2 {
            notes.push(format!(
                "Healthy savings rate: {:.0}% of income is being kept.",
                savings_rate * 100.0
            ));
        } else if savings_rate < 0.0 {
            notes.push("Spending exceeded income over the analysis window.".to_string());
        }
        notes.push(format!("Month-to-month volatility index: {:.2}.", volatility));

        let earliest = MonthKey::from_date(today).add(-(months as i32 - 1));
        let window_txns: Vec<_> = store
            .find_transactions(
                user_id,
                Scope::Personal,
                Some(DateRange::from(earliest.first_day())),
                None,
            )?
            .into_iter()
            .filter(|txn| {
                let slot = earliest.diff(MonthKey::from_date(txn.date));
                (0..months as i64).contains(&slot)
            })
            .collect();
        let spending: Vec<_> = window_txns
            .iter()
            .filter(|txn| txn.direction == Direction::Out)
            .cloned()
            .collect();
        let income: Vec<_> = window_txns
            .iter()
            .filter(|txn| txn.direction == Direction::In)
            .cloned()
            .collect();
        let spending_by_category = with_shares(bucket_by(&spending, |txn| {
            txn.category.clone().unwrap_or_else(|| UNCATEGORIZED.into())
        }));
        let income_by_source = with_shares(bucket_by(&income, |txn| txn.label.clone()));

        Ok(HealthReport {
            generated_at: Utc::now(),
            currency: resolve_currency(store, config, user_id, Scope::Personal)?,
            months,
            score,
            grade,
            months_in_red,
            savings_rate,
            volatility,
            notes,
            top_category: spending_by_category.first().map(|b| b.key.clone()),
            top_source: income_by_source.first().map(|b| b.key.clone()),
            spending_by_category,
            income_by_source,
        })
    }
}
