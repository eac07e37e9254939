use chrono::NaiveDate;
use uuid::Uuid;

use insights_core::ledger::{Account, Direction, MemoryLedger, Transaction};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A year of regular personal activity: 3200 salary in, 2100 spending out,
/// and a 300 tagged savings transfer-out per month of 2024.
pub fn seeded_personal_ledger(user: Uuid) -> MemoryLedger {
    let mut ledger = MemoryLedger::new();
    let checking = ledger.add_account(Account::new(user, "Checking", "USD"));
    for month in 1..=12u32 {
        ledger.add_transaction(Transaction::new(
            user,
            checking,
            date(2024, month, 1),
            Direction::In,
            3200.0,
            "Salary",
        ));
        ledger.add_transaction(
            Transaction::new(
                user,
                checking,
                date(2024, month, 5),
                Direction::Out,
                1400.0,
                "Rent",
            )
            .with_category("housing"),
        );
        ledger.add_transaction(
            Transaction::new(
                user,
                checking,
                date(2024, month, 12),
                Direction::Out,
                700.0,
                "Groceries",
            )
            .with_category("food"),
        );
        ledger.add_transaction(
            Transaction::new(
                user,
                checking,
                date(2024, month, 25),
                Direction::Out,
                300.0,
                "Auto-save",
            )
            .with_category("savings"),
        );
    }
    ledger
}
