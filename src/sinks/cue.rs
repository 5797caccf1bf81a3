//! Fixed parameters of the pulse cue

use std::time::Duration;

use serde::Serialize;

/// How long the pulse flash stays visible
pub const FLASH_DURATION: Duration = Duration::from_millis(500);

/// Shape of the ping played on every pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PingTone {
    pub frequency_hz: f32,
    pub duration_ms: u64,
    pub attack_ms: u64,
    pub peak_gain: f32,
    /// Gain the exponential decay ends on
    pub floor_gain: f32,
}

/// A5 sine, short attack, exponential tail
pub const PING_TONE: PingTone = PingTone {
    frequency_hz: 880.0,
    duration_ms: 300,
    attack_ms: 10,
    peak_gain: 0.3,
    floor_gain: 0.01,
};

/// Cue parameters published to remote renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CueInfo {
    pub flash_ms: u64,
    pub tone: PingTone,
}

impl CueInfo {
    pub fn current() -> Self {
        Self {
            flash_ms: FLASH_DURATION.as_millis() as u64,
            tone: PING_TONE,
        }
    }
}
