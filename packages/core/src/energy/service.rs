//! Fetch-then-compute pipelines behind the HTTP endpoints.
//!
//! Every call issues its own fetch; nothing is cached or shared between
//! requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::energy::{
    aggregator::{aggregate_daily, daily_fetch_range},
    error::EnergyError,
    optimizer::{find_optimal_window, window_fetch_range},
    provider::GenerationProvider,
    types::{ChargingDuration, DailyEnergyMix, IntervalRecord, OptimalChargingWindow},
};

#[derive(Clone)]
pub struct EnergyService {
    provider: Arc<dyn GenerationProvider + Send + Sync>,
}

impl EnergyService {
    pub fn new(provider: Arc<dyn GenerationProvider + Send + Sync>) -> Self {
        Self { provider }
    }

    /// Daily mix for yesterday, today and tomorrow.
    pub async fn daily_mix(&self) -> Result<Vec<DailyEnergyMix>, EnergyError> {
        self.daily_mix_at(Utc::now()).await
    }

    pub async fn daily_mix_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<DailyEnergyMix>, EnergyError> {
        let (from, to) = daily_fetch_range(now);
        let records = self.fetch_intervals(from, to).await?;
        let days = aggregate_daily(&records);

        tracing::debug!("Aggregated {} intervals into {} days", records.len(), days.len());
        Ok(days)
    }

    /// Cleanest window of `duration` within the next two days.
    pub async fn optimal_window(
        &self,
        duration: ChargingDuration,
    ) -> Result<OptimalChargingWindow, EnergyError> {
        self.optimal_window_at(duration, Utc::now()).await
    }

    pub async fn optimal_window_at(
        &self,
        duration: ChargingDuration,
        now: DateTime<Utc>,
    ) -> Result<OptimalChargingWindow, EnergyError> {
        let (from, to) = window_fetch_range(now);
        let records = self.fetch_intervals(from, to).await?;
        let window = find_optimal_window(&records, duration)?;

        tracing::debug!(
            "Optimal {} window starts at {} ({}% clean)",
            duration,
            window.start_time,
            window.clean_energy_percentage,
        );
        Ok(window)
    }

    async fn fetch_intervals(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<IntervalRecord>, EnergyError> {
        let records = self.provider.fetch_generation(from, to).await?;

        let breaks = count_discontinuities(&records);
        if breaks > 0 {
            tracing::warn!(
                "{} returned {} non-contiguous intervals between {} and {}",
                self.provider.provider_name(),
                breaks,
                from,
                to,
            );
        }

        Ok(records)
    }
}

/// Number of records that do not start where the previous one ended.
///
/// Both pipelines assume a gap-free, ascending series; this only measures
/// how far the data departs from that.
pub fn count_discontinuities(records: &[IntervalRecord]) -> usize {
    records
        .windows(2)
        .filter(|pair| pair[0].to != pair[1].from)
        .count()
}
