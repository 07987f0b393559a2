// Library root — exposes internal modules for integration tests in `tests/`.
// Production entry point remains `src/main.rs`.

pub mod api;
pub mod energy;
pub mod error;
pub mod metrics;
pub mod services;

// Only needed by the binary, public so `main.rs` can share them.
pub mod cli;
pub mod config;
pub mod logging;
