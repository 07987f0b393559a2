//! Clean-energy analytics over half-hourly generation mix data.
//!
//! Two pipelines share one fetcher and one scoring function: the daily
//! aggregator summarises the mix per calendar day, the window optimizer
//! finds the cleanest contiguous span for a flexible load.

pub mod aggregator;
pub mod error;
pub mod fuels;
pub mod optimizer;
pub mod provider;
pub mod service;
pub mod types;


pub use error::{EnergyError, ProviderError};
pub use provider::GenerationProvider;
pub use service::EnergyService;
pub use types::*;
