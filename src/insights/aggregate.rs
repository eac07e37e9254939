//! Aggregation primitives shared by every insight computation: signed
//! amounts, insertion-ordered bucketing, and guarded share-of-total math.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ledger::{Direction, Transaction};

/// Signed contribution of a transaction: `+amount` for inflows, `-amount`
/// for outflows. Transfers are balance-neutral movement between a user's
/// own accounts and contribute nothing; the ledger does not pair transfer
/// legs, so counting them would double count one side.
pub fn signed_amount(txn: &Transaction) -> f64 {
    match txn.direction {
        Direction::In => txn.amount,
        Direction::Out => -txn.amount,
        Direction::Transfer => 0.0,
    }
}

/// A named aggregation group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub key: String,
    pub total: f64,
    pub count: usize,
}

/// Groups transactions by `key_fn`, accumulating amount magnitudes.
/// Buckets appear in first-seen order so output is deterministic without
/// an explicit sort.
pub fn bucket_by<F>(transactions: &[Transaction], key_fn: F) -> Vec<Bucket>
where
    F: Fn(&Transaction) -> String,
{
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for txn in transactions {
        let key = key_fn(txn);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(Bucket {
                key,
                total: 0.0,
                count: 0,
            });
            buckets.len() - 1
        });
        buckets[slot].total += txn.amount;
        buckets[slot].count += 1;
    }
    buckets
}

/// `part / whole` guarded against empty denominators; never NaN or ∞.
pub fn share_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// A bucket annotated with its share of the grand total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub key: String,
    pub total: f64,
    pub count: usize,
    pub share: f64,
}

/// Annotates buckets with shares and sorts them descending by total.
/// Ties keep first-seen order.
pub fn with_shares(buckets: Vec<Bucket>) -> Vec<BucketShare> {
    let whole: f64 = buckets.iter().map(|bucket| bucket.total).sum();
    let mut shared: Vec<BucketShare> = buckets
        .into_iter()
        .map(|bucket| BucketShare {
            share: share_of(bucket.total, whole),
            key: bucket.key,
            total: bucket.total,
            count: bucket.count,
        })
        .collect();
    shared.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn txn(direction: Direction, amount: f64, category: &str) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            direction,
            amount,
            "label",
        )
        .with_category(category)
    }

    #[test]
    fn signed_amount_follows_direction() {
        assert_eq!(signed_amount(&txn(Direction::In, 25.0, "salary")), 25.0);
        assert_eq!(signed_amount(&txn(Direction::Out, 25.0, "food")), -25.0);
        assert_eq!(signed_amount(&txn(Direction::Transfer, 25.0, "move")), 0.0);
    }

    #[test]
    fn bucket_by_preserves_first_seen_order() {
        let txns = vec![
            txn(Direction::Out, 10.0, "food"),
            txn(Direction::Out, 5.0, "rent"),
            txn(Direction::Out, 7.5, "food"),
        ];
        let buckets = bucket_by(&txns, |t| t.category.clone().unwrap());
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].key, "food");
        assert_eq!(buckets[0].total, 17.5);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].key, "rent");
    }

    #[test]
    fn share_of_never_divides_by_zero() {
        assert_eq!(share_of(5.0, 0.0), 0.0);
        assert_eq!(share_of(5.0, -1.0), 0.0);
        assert_eq!(share_of(5.0, 20.0), 0.25);
    }

    #[test]
    fn shares_sum_to_one_when_total_is_positive() {
        let txns = vec![
            txn(Direction::Out, 30.0, "food"),
            txn(Direction::Out, 50.0, "rent"),
            txn(Direction::Out, 20.0, "fun"),
        ];
        let shared = with_shares(bucket_by(&txns, |t| t.category.clone().unwrap()));
        let sum: f64 = shared.iter().map(|b| b.share).sum();
        assert!((sum - 1.0).abs() < 1e-9, "shares summed to {sum}");
        assert_eq!(shared[0].key, "rent");
    }

    #[test]
    fn shares_are_zero_for_empty_totals() {
        let shared = with_shares(vec![Bucket {
            key: "empty".into(),
            total: 0.0,
            count: 0,
        }]);
        assert_eq!(shared[0].share, 0.0);
    }
}
