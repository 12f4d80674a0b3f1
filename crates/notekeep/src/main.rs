//! # notekeep
//!
//! The binary is intentionally thin: `cli::run()` owns argument parsing,
//! backend selection, and dispatch; the server module hosts the REST API
//! when the `serve` subcommand asks for it. This file only wires the
//! runtime and handles process termination.

#[tokio::main]
async fn main() {
    if let Err(e) = notekeep::cli::run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
