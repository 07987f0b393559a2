//! Daily generation mix aggregation

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveTime, Utc};

use crate::energy::{
    fuels::{is_clean_fuel, round2},
    types::{DailyEnergyMix, FuelMix, IntervalRecord},
};

/// Maximum number of days reported by [`aggregate_daily`].
pub const MAX_DAYS: usize = 3;

/// Fetch range for the daily summary: yesterday 00:30 UTC up to the day
/// after tomorrow 00:00 UTC.
pub fn daily_fetch_range(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let from = midnight(today - Days::new(1)) + Duration::minutes(30);
    let to = midnight(today + Days::new(2));
    (from, to)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::default()).and_utc()
}

/// Group intervals by the UTC date they start on and average every fuel
/// over each day's intervals.
///
/// Means divide by the number of intervals actually present that day, so
/// partial days are averaged correctly. At most [`MAX_DAYS`] days are
/// returned, oldest first.
pub fn aggregate_daily(records: &[IntervalRecord]) -> Vec<DailyEnergyMix> {
    let mut days: BTreeMap<NaiveDate, Vec<&IntervalRecord>> = BTreeMap::new();
    for record in records {
        days.entry(record.date()).or_default().push(record);
    }

    days.into_iter()
        .take(MAX_DAYS)
        .map(|(date, intervals)| summarise_day(date, &intervals))
        .collect()
}

fn summarise_day(date: NaiveDate, intervals: &[&IntervalRecord]) -> DailyEnergyMix {
    let count = intervals.len() as f64;

    let mut fuel_sums = FuelMix::new();
    for interval in intervals {
        for share in &interval.mix {
            *fuel_sums.entry(share.fuel.clone()).or_insert(0.0) += share.perc;
        }
    }

    let mut clean_energy_sum = 0.0;
    let mut mix = FuelMix::new();
    for (fuel, sum) in fuel_sums {
        let average = sum / count;
        if is_clean_fuel(&fuel) {
            clean_energy_sum += average;
        }
        mix.insert(fuel, round2(average));
    }

    DailyEnergyMix {
        date,
        clean_energy_percentage: round2(clean_energy_sum),
        mix,
    }
}
