//! Timer state structure and snapshots

use serde::{Deserialize, Serialize};

/// Which of the three controller states the timer is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Idle,
    Active,
    Cooldown,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Cooldown => "cooldown",
        }
    }
}

/// Mutable timer counters owned by the controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerState {
    /// User intent; cooldown overrides it without clearing it
    pub running: bool,
    pub elapsed_seconds: u64,
    pub in_cooldown: bool,
    pub cooldown_remaining_seconds: u64,
    pub pulse_count: u64,
}

impl TimerState {
    /// Create a zeroed, idle timer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the controller phase from the flags
    pub fn phase(&self) -> Phase {
        if self.in_cooldown {
            Phase::Cooldown
        } else if self.running {
            Phase::Active
        } else {
            Phase::Idle
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase(),
            running: self.running,
            elapsed_seconds: self.elapsed_seconds,
            in_cooldown: self.in_cooldown,
            cooldown_remaining_seconds: self.cooldown_remaining_seconds,
            pulse_count: self.pulse_count,
        }
    }
}

/// Immutable read of the timer state, handed to sinks and API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub elapsed_seconds: u64,
    pub in_cooldown: bool,
    pub cooldown_remaining_seconds: u64,
    pub pulse_count: u64,
}

impl TimerSnapshot {
    /// Main stopwatch as `HH:MM:SS`
    pub fn main_display(&self) -> String {
        format_main_time(self.elapsed_seconds)
    }

    /// Cooldown countdown as `MM:SS`, only while the countdown is visible
    pub fn cooldown_display(&self) -> Option<String> {
        if self.in_cooldown {
            Some(format_cooldown_time(self.cooldown_remaining_seconds))
        } else {
            None
        }
    }
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        TimerState::new().snapshot()
    }
}

/// Format seconds as `HH:MM:SS`. Hours keep counting past 24.
pub fn format_main_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Format seconds as `MM:SS`
pub fn format_cooldown_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
