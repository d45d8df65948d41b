// Linear disk-full forecast: assumes the used space accumulated evenly over the window.

use std::collections::BTreeMap;

use chrono::TimeDelta;

use crate::models::{DiskFullPrediction, ServerResource};

/// Number of most recent records the forecast looks back over (≈ days).
pub const DEFAULT_PREDICTION_WINDOW: u32 = 30;

const SECS_PER_DAY: f64 = 86_400.0;

/// Forecast for a single record, or None when no finite forecast exists
/// (nothing used yet, zero window, or a date chrono cannot represent).
pub fn predict_one(record: &ServerResource, window: u32) -> Option<DiskFullPrediction> {
    if window == 0 || !record.used_disk.is_finite() || !record.total_disk.is_finite() {
        return None;
    }
    let window = f64::from(window);
    let daily_consumption = record.used_disk / window;
    if daily_consumption <= 0.0 {
        return None;
    }

    // free / (used / window), rearranged to keep exact day counts exact.
    let free = record.total_disk - record.used_disk;
    let days_remaining = (free * window / record.used_disk).max(0.0);

    let secs = (days_remaining * SECS_PER_DAY).round();
    if !secs.is_finite() || secs > i64::MAX as f64 {
        return None;
    }
    let predicted_at = record
        .date_time
        .checked_add_signed(TimeDelta::try_seconds(secs as i64)?)?;

    Some(DiskFullPrediction {
        pool_id: record.pool_id,
        daily_consumption,
        days_remaining,
        predicted_at,
    })
}

/// Forecast per pool id. When several records share a pool id the one later in
/// `records` wins; pass `latest_per_host` output for one-record-per-host semantics.
pub fn predict_disk_full(
    records: &[ServerResource],
    window: u32,
) -> BTreeMap<i64, DiskFullPrediction> {
    let mut out = BTreeMap::new();
    for r in records {
        match predict_one(r, window) {
            Some(p) => {
                out.insert(r.pool_id, p);
            }
            None => {
                tracing::debug!(
                    pool_id = r.pool_id,
                    used_disk = r.used_disk,
                    "no disk-full prediction"
                );
            }
        }
    }
    out
}

/// Most recent record per pool id (ties keep the first seen), ordered by pool id.
pub fn latest_per_host(records: &[ServerResource]) -> Vec<ServerResource> {
    let mut latest: BTreeMap<i64, &ServerResource> = BTreeMap::new();
    for r in records {
        latest
            .entry(r.pool_id)
            .and_modify(|cur| {
                if r.date_time > cur.date_time {
                    *cur = r;
                }
            })
            .or_insert(r);
    }
    latest.into_values().cloned().collect()
}
