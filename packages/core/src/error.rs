use thiserror::Error;

/// Startup failures of the service binary.
///
/// Request-time failures live in [`crate::energy::EnergyError`] and never
/// reach this type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
