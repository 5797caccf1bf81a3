//! Pulse Timer - an interval timer with periodic pulses and forced cooldowns
//!
//! The core is [`state::TimerController`], a small synchronous state machine
//! fed by an injectable clock. Around it sit presentation sinks (terminal,
//! logs, channels) and an HTTP control surface.

pub mod api;
pub mod clock;
pub mod config;
pub mod sinks;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
