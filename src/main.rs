//! Service entry point
//!
//! Initializes logging, loads configuration from the environment, and
//! runs the HTTP server. All logic lives in the library; failures print
//! to stderr and exit non-zero.

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = bfhl_api::http_server::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
