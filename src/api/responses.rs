//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    sinks::cue::CueInfo,
    state::{TimerSnapshot, ToggleOutcome},
};

/// API response structure for the toggle endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ToggleResponse {
    /// Create a new toggle response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Build the response matching a toggle outcome
    pub fn from_outcome(outcome: ToggleOutcome, timer: TimerSnapshot) -> Self {
        match outcome {
            ToggleOutcome::Started => Self::toggled("Timer started".to_string(), timer),
            ToggleOutcome::Paused => Self::toggled("Timer paused".to_string(), timer),
            ToggleOutcome::Ignored => Self::ignored("Cooldown in progress, toggle ignored".to_string(), timer),
        }
    }

    /// Create a toggled response
    pub fn toggled(message: String, timer: TimerSnapshot) -> Self {
        Self::new("toggled".to_string(), message, timer)
    }

    /// Create an ignored response
    pub fn ignored(message: String, timer: TimerSnapshot) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }
}

/// Pre-formatted display strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub main: String,
    /// Only present while the cooldown countdown is visible
    pub cooldown: Option<String>,
    pub counter: u64,
}

impl From<&TimerSnapshot> for DisplayResponse {
    fn from(snapshot: &TimerSnapshot) -> Self {
        Self {
            main: snapshot.main_display(),
            cooldown: snapshot.cooldown_display(),
            counter: snapshot.pulse_count,
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub display: DisplayResponse,
    pub cue: CueInfo,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
