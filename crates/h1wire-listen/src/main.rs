//! h1wire-listen: print every HTTP/1.1 request received on a TCP port
//!
//! Logging is controlled with `RUST_LOG` (default `info`).

mod config;
mod server;

use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerConfig::command().get_matches();
    let config = ServerConfig::from_args(&args);

    match server::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to start server");
            ExitCode::FAILURE
        }
    }
}
