//! Error types for generation mix pipelines

use thiserror::Error;

/// Errors from generation data providers
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Non-success response or transport failure.
    #[error("Failed to fetch data from API: {message}")]
    Upstream { message: String },

    /// Response body could not be read as generation records.
    #[error("Failed to parse generation data: {message}")]
    Parse { message: String },
}

/// Errors that can occur while computing mix summaries or charging windows
#[derive(Error, Debug)]
pub enum EnergyError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Not enough data available to calculate optimal window ({available} of {needed} intervals)")]
    InsufficientData { needed: usize, available: usize },

    #[error("Could not calculate optimal window")]
    Optimization,
}

impl ProviderError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream { message: message.into() }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse { message: message.into() }
    }
}
