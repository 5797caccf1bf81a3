//! Ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Period of both tick sources
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that delivers one tick per second from whichever clock
/// source the controller has switched on.
///
/// Every source change restarts the one-second period, so a freshly started
/// source first ticks a full second after it was started. The task sleeps
/// while no source is active. It holds the state, and with it the clock, so
/// it runs for as long as the process does.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut clock_rx = state.subscribe_clock();

    'sources: loop {
        let mode = *clock_rx.borrow_and_update();

        let Some(mode) = mode else {
            if clock_rx.changed().await.is_err() {
                break 'sources;
            }
            continue;
        };

        debug!("Ticking {} clock", mode);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                // Source switched or stopped - restart the period
                changed = clock_rx.changed() => {
                    if changed.is_err() {
                        break 'sources;
                    }
                    break;
                }

                _ = interval.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to deliver tick: {}", e);
                    }
                }
            }
        }
    }

    info!("Clock dropped, stopping ticker task");
}
