//! Optimal charging window search

use chrono::{DateTime, Duration, Utc};

use crate::energy::{
    error::EnergyError,
    fuels::{clean_energy_score, round2},
    types::{ChargingDuration, IntervalRecord, OptimalChargingWindow},
};

/// How far ahead the optimizer looks for a window.
pub const SEARCH_HORIZON_DAYS: i64 = 2;

pub fn window_fetch_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(SEARCH_HORIZON_DAYS))
}

/// Slide a window of `duration` across `records` and return the placement
/// with the highest average clean-energy score.
///
/// Only a strictly better average replaces the incumbent, so ties go to the
/// earliest window. Window bounds are copied from the first and last record
/// of the winning span.
pub fn find_optimal_window(
    records: &[IntervalRecord],
    duration: ChargingDuration,
) -> Result<OptimalChargingWindow, EnergyError> {
    let needed = duration.interval_count();
    if records.len() < needed {
        return Err(EnergyError::InsufficientData {
            needed,
            available: records.len(),
        });
    }

    let scores: Vec<f64> = records
        .iter()
        .map(|record| clean_energy_score(&record.mix))
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (offset, window) in scores.windows(needed).enumerate() {
        let average = window.iter().sum::<f64>() / needed as f64;
        if best.map_or(true, |(_, best_average)| average > best_average) {
            best = Some((offset, average));
        }
    }

    let (offset, average) = best.ok_or(EnergyError::Optimization)?;
    let first = &records[offset];
    let last = &records[offset + needed - 1];

    Ok(OptimalChargingWindow {
        start_time: first.from.clone(),
        end_time: last.to.clone(),
        clean_energy_percentage: round2(average),
    })
}
