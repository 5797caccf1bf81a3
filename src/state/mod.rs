//! State management module
//!
//! This module contains the timer state, the controller that mutates it, and
//! the process-wide application state that owns the controller.

pub mod app_state;
pub mod controller;
pub mod events;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::{
    TimerController, ToggleOutcome, COOLDOWN_LENGTH_SECS, COOLDOWN_TRIGGER_SECS, PULSE_PERIOD_SECS,
};
pub use events::TimerEvent;
pub use timer_state::{format_cooldown_time, format_main_time, Phase, TimerSnapshot, TimerState};
