//! Main application state management

use std::{
    sync::Mutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{TimerController, TimerEvent, TimerSnapshot, ToggleOutcome};
use crate::{
    clock::{ChannelClock, ClockMode},
    sinks::{ChannelSink, FanoutSink, TimerUpdate},
};

/// Capacity of the update broadcast used by SSE clients
const UPDATE_CHANNEL_CAPACITY: usize = 100;

/// Process-wide state: the single timer controller plus server metadata
pub struct AppState {
    /// The timer itself; every toggle and tick goes through this lock
    controller: Mutex<TimerController>,
    /// Which tick source the ticker task should be driving
    clock_rx: watch::Receiver<Option<ClockMode>>,
    /// Outbound snapshots and events for HTTP clients
    updates: ChannelSink,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

impl AppState {
    /// Create the app state around a fresh idle timer.
    ///
    /// `sinks` receive every render and event in addition to the internal
    /// channel sink that feeds the HTTP API.
    pub fn new(port: u16, host: String, sinks: FanoutSink) -> Self {
        let clock = ChannelClock::new();
        let clock_rx = clock.subscribe();
        let updates = ChannelSink::new(UPDATE_CHANNEL_CAPACITY);
        let sinks = sinks.with(updates.clone());

        Self {
            controller: Mutex::new(TimerController::new(clock, sinks)),
            clock_rx,
            updates,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    fn with_controller<T, F>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&mut TimerController) -> T,
    {
        let mut controller = self.controller.lock()
            .map_err(|e| format!("Failed to lock timer controller: {}", e))?;
        Ok(f(&mut controller))
    }

    /// Toggle the timer on behalf of `source` (e.g. "http", "keyboard")
    pub fn toggle(&self, source: &str) -> Result<(ToggleOutcome, TimerSnapshot), String> {
        let (outcome, snapshot) = self.with_controller(|c| {
            let outcome = c.toggle();
            (outcome, c.snapshot())
        })?;

        info!("Toggle from {}: {}", source, outcome.as_str());
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((format!("{} ({})", outcome.as_str(), source), Utc::now()));
        }

        Ok((outcome, snapshot))
    }

    /// Deliver one tick from the active clock
    pub fn tick(&self) -> Result<Vec<TimerEvent>, String> {
        let events = self.with_controller(|c| c.tick())?;
        if !events.is_empty() {
            debug!("Tick emitted {:?}", events);
        }
        Ok(events)
    }

    /// Push the current snapshot to every sink, used once at startup
    pub fn render(&self) -> Result<(), String> {
        self.with_controller(|c| c.render())
    }

    /// Get the current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.with_controller(|c| c.snapshot())
    }

    /// Watch the active tick source
    pub fn subscribe_clock(&self) -> watch::Receiver<Option<ClockMode>> {
        self.clock_rx.clone()
    }

    /// Subscribe to every snapshot and event published from now on
    pub fn subscribe_updates(&self) -> broadcast::Receiver<TimerUpdate> {
        self.updates.subscribe_updates()
    }

    /// Last snapshot pushed to the sinks, read without locking the controller
    pub fn latest_snapshot(&self) -> TimerSnapshot {
        self.updates.latest()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }
}
