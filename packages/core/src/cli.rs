use clap::Parser;

/// Energy mix service CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "energy-mix-service",
    version,
    about = "Daily clean-energy mix and optimal EV charging windows for the GB grid"
)]
pub struct Cli {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Generation mix API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long)]
    pub log_level: Option<String>,
}
