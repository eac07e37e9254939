//! Monthly income/spending time series with z-score anomaly flags.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::InsightConfig;
use crate::errors::InsightResult;
use crate::ledger::{DateRange, Direction, LedgerStore, Scope};

use super::month::MonthKey;
use super::resolve_currency;

const DEFAULT_MONTHS: u32 = 12;
const ANOMALY_Z: f64 = 2.0;

/// One calendar month of aggregated activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: MonthKey,
    pub income: f64,
    pub spending: f64,
    pub net: f64,
    pub z_score: f64,
    pub is_anomaly: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityReport {
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    pub months: u32,
    pub mean_net: f64,
    pub stddev_net: f64,
    /// Oldest first, gapless, always exactly `months` entries.
    pub points: Vec<MonthlyPoint>,
}

pub struct SeasonalityService;

impl SeasonalityService {
    /// Builds a gapless monthly net series ending at `today`'s month and
    /// flags months whose net deviates at least two sample standard
    /// deviations from the series mean.
    ///
    /// `months` defaults to 12 and is clamped to at least 1. Transfers are
    /// ignored; only personal transactions participate.
    pub fn detect(
        store: &impl LedgerStore,
        config: &InsightConfig,
        user_id: Uuid,
        today: NaiveDate,
        months: Option<u32>,
    ) -> InsightResult<SeasonalityReport> {
        let months = months.unwrap_or(DEFAULT_MONTHS).max(1);
        let current = MonthKey::from_date(today);
        let window = MonthKey::window_ending(current, months);
        let earliest = window[0];

        let transactions = store.find_transactions(
            user_id,
            Scope::Personal,
            Some(DateRange::from(earliest.first_day())),
            None,
        )?;
        tracing::debug!(
            months,
            transactions = transactions.len(),
            "building seasonality series"
        );

        // Every bucket exists up front so empty months still appear.
        let mut income = vec![0.0f64; months as usize];
        let mut spending = vec![0.0f64; months as usize];
        for txn in &transactions {
            let slot = earliest.diff(MonthKey::from_date(txn.date));
            if !(0..months as i64).contains(&slot) {
                continue;
            }
            match txn.direction {
                Direction::In => income[slot as usize] += txn.amount,
                Direction::Out => spending[slot as usize] += txn.amount,
                Direction::Transfer => {}
            }
        }

        let nets: Vec<f64> = income
            .iter()
            .zip(&spending)
            .map(|(inc, spend)| inc - spend)
            .collect();
        let (mean, stddev) = mean_and_sample_stddev(&nets);

        let points = window
            .into_iter()
            .enumerate()
            .map(|(idx, month)| {
                let net = nets[idx];
                let z_score = if stddev > 0.0 { (net - mean) / stddev } else { 0.0 };
                MonthlyPoint {
                    month,
                    income: income[idx],
                    spending: spending[idx],
                    net,
                    z_score,
                    is_anomaly: z_score.abs() >= ANOMALY_Z,
                }
            })
            .collect();

        Ok(SeasonalityReport {
            generated_at: Utc::now(),
            currency: resolve_currency(store, config, user_id, Scope::Personal)?,
            months,
            mean_net: mean,
            stddev_net: stddev,
            points,
        })
    }
}

/// Mean and sample standard deviation (n−1 denominator; 1 for a
/// single-point series so the division stays defined).
fn mean_and_sample_stddev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let denominator = if values.len() > 1 { n - 1.0 } else { 1.0 };
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / denominator;
    (mean, variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Account, MemoryLedger, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_with_nets(user: Uuid, today: NaiveDate, nets: &[f64]) -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        let account = ledger.add_account(Account::new(user, "Checking", "USD"));
        let current = MonthKey::from_date(today);
        let window = MonthKey::window_ending(current, nets.len() as u32);
        for (month, net) in window.into_iter().zip(nets) {
            let (direction, amount) = if *net >= 0.0 {
                (Direction::In, *net)
            } else {
                (Direction::Out, net.abs())
            };
            if amount > 0.0 {
                ledger.add_transaction(Transaction::new(
                    user,
                    account,
                    month.first_day(),
                    direction,
                    amount,
                    "activity",
                ));
            }
        }
        ledger
    }

    #[test]
    fn series_is_gapless_even_without_transactions() {
        let user = Uuid::new_v4();
        let ledger = MemoryLedger::new();
        let report =
            SeasonalityService::detect(&ledger, &InsightConfig::default(), user, date(2024, 6, 15), Some(5)).unwrap();
        assert_eq!(report.points.len(), 5);
        for pair in report.points.windows(2) {
            assert_eq!(pair[0].month.add(1), pair[1].month, "gap in month series");
        }
        assert_eq!(report.points.last().unwrap().month, MonthKey::new(2024, 6));
        assert!(report.points.iter().all(|p| p.net == 0.0 && !p.is_anomaly));
    }

    #[test]
    fn z_scores_use_sample_stddev() {
        let user = Uuid::new_v4();
        let today = date(2024, 3, 20);
        let ledger = ledger_with_nets(user, today, &[100.0, -50.0, 500.0]);
        let report = SeasonalityService::detect(&ledger, &InsightConfig::default(), user, today, Some(3)).unwrap();

        let mean = (100.0 - 50.0 + 500.0) / 3.0;
        assert!((report.mean_net - mean).abs() < 1e-6);
        // Sample variance with n-1 = 2 in the denominator.
        let variance = ((100.0f64 - mean).powi(2) + (-50.0 - mean).powi(2)
            + (500.0 - mean).powi(2))
            / 2.0;
        assert!((report.stddev_net - variance.sqrt()).abs() < 1e-6);

        for point in &report.points {
            let expected = (point.net - mean) / variance.sqrt();
            assert!((point.z_score - expected).abs() < 1e-6);
            assert_eq!(point.is_anomaly, expected.abs() >= 2.0);
        }
    }

    #[test]
    fn transfers_and_business_activity_are_excluded() {
        let user = Uuid::new_v4();
        let business = Uuid::new_v4();
        let today = date(2024, 4, 10);
        let mut ledger = MemoryLedger::new();
        let account = ledger.add_account(Account::new(user, "Checking", "USD"));
        ledger.add_transaction(Transaction::new(
            user,
            account,
            date(2024, 4, 2),
            Direction::Transfer,
            900.0,
            "to savings",
        ));
        ledger.add_transaction(
            Transaction::new(
                user,
                account,
                date(2024, 4, 3),
                Direction::In,
                1200.0,
                "invoice",
            )
            .for_business(business),
        );
        ledger.add_transaction(Transaction::new(
            user,
            account,
            date(2024, 4, 4),
            Direction::In,
            300.0,
            "salary",
        ));

        let report = SeasonalityService::detect(&ledger, &InsightConfig::default(), user, today, Some(1)).unwrap();
        assert_eq!(report.points[0].income, 300.0);
        assert_eq!(report.points[0].spending, 0.0);
    }

    #[test]
    fn zero_months_clamps_to_one() {
        let user = Uuid::new_v4();
        let ledger = MemoryLedger::new();
        let report =
            SeasonalityService::detect(&ledger, &InsightConfig::default(), user, date(2024, 1, 1), Some(0)).unwrap();
        assert_eq!(report.points.len(), 1);
    }
}
