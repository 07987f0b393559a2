//! Generation Data Provider Interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::energy::{error::ProviderError, types::IntervalRecord};

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Source of half-hourly generation mix records.
#[async_trait]
pub trait GenerationProvider {
    /// Fetch the records covering `from`..`to`, ordered by start time.
    ///
    /// Boundary inclusivity is whatever the upstream source applies.
    async fn fetch_generation(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ProviderResult<Vec<IntervalRecord>>;

    /// Get the name of this provider for logging/debugging
    fn provider_name(&self) -> &str;
}
