#![doc(test(attr(deny(warnings))))]

//! Insights Core turns raw ledger data (accounts, transactions, budgets,
//! savings goals, projects) into derived financial metrics: overviews,
//! savings plans, seasonality and anomaly detection, health scores, budget
//! consumption, and revenue/expense forecasts.

pub mod config;
pub mod errors;
pub mod insights;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Insights Core tracing initialized.");
    });
}
