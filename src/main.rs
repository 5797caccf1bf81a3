//! Pulse Timer - an interval timer with periodic pulses and forced cooldowns
//!
//! This is the main entry point for the pulse-timer application.

use std::sync::Arc;
use tokio::{io::BufReader, net::TcpListener};
use tracing::{error, info, warn};

use pulse_timer::{
    api::create_router,
    config::Config,
    sinks::{FanoutSink, LogSink, TerminalSink},
    state::AppState,
    tasks::{keyboard_task, ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr so they don't fight the terminal display on stdout
    tracing_subscriber::fmt()
        .with_env_filter(format!("pulse_timer={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting pulse-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, keyboard={}, quiet={}",
          config.host, config.port, config.keyboard, config.quiet);

    let mut sinks = FanoutSink::new().with(LogSink);
    if !config.quiet {
        sinks = sinks.with(TerminalSink::stdout());
    }

    // Create application state and draw the initial display
    let state = Arc::new(AppState::new(config.port, config.host.clone(), sinks));
    if let Err(e) = state.render() {
        warn!("Initial render failed: {}", e);
    }

    // Start the ticker background task
    tokio::spawn(ticker_task(Arc::clone(&state)));

    if config.keyboard {
        let keyboard_state = Arc::clone(&state);
        tokio::spawn(async move {
            keyboard_task(keyboard_state, BufReader::new(tokio::io::stdin())).await;
        });
    }

    if config.autostart {
        if let Err(e) = state.toggle("autostart") {
            error!("Failed to start timer: {}", e);
        }
    }

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /toggle - Start or pause the timer");
    info!("  GET  /status - Current timer state and display");
    info!("  GET  /events - Server-sent timer events");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
