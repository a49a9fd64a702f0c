// src/analytics/trend.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::config::TREND_MAX_POINTS;
use crate::models::attempt::Attempt;
use crate::models::report::TrendPoint;
use crate::utils::percent::round2;

/// Buckets attempts by UTC calendar day and emits a chronologically
/// ascending series of daily averages, capped at `TREND_MAX_POINTS` points.
/// Recomputed fresh on every call; no state is retained between calls.
pub fn performance_trend(attempts: &[Attempt]) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();

    for attempt in attempts {
        let day = attempt.created_at.date_naive();
        let bucket = buckets.entry(day).or_insert((0, 0));
        bucket.0 += attempt.score;
        bucket.1 += 1;
    }

    buckets
        .into_iter()
        .take(TREND_MAX_POINTS)
        .map(|(date, (score_sum, count))| TrendPoint {
            date,
            avg_score: round2(score_sum as f64 / count as f64),
            attempted: count,
        })
        .collect()
}
