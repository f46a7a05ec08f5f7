mod analyzer;
mod config;
mod console;
mod model;
mod presenter;
mod source;
mod utils;

use config::load_config;
use console::listener::listen_for_commands;
use console::Session;
use source::BinanceSource;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for command replies
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file (first argument, or config.json)
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    info!(
        "Source: {} {} (limit {})",
        config.source.symbol, config.source.interval, config.source.limit
    );

    let source = match BinanceSource::new(config.source.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };

    let mut session = Session::new(&config, Box::new(source));
    if let Err(e) = listen_for_commands(&mut session).await {
        error!("Console I/O error: {}", e);
    }
    info!("Bye.");
}
