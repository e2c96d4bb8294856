use clap::Parser;

use clinica_api::DEFAULT_BASE_URL;

/// Line-delimited JSON bridge to the clinic API over stdin/stdout.
#[derive(Debug, Parser)]
#[command(name = "clinica", version)]
pub struct Config {
    /// Base URL of the clinic API
    #[arg(long, env = "CLINICA_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}
