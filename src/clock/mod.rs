//! Clock subscription module
//!
//! The controller never sleeps or spawns timers itself. It switches one of two
//! mutually exclusive one-second tick sources on and off through [`TickClock`],
//! and whoever owns the real (or fake) clock delivers the ticks back.

pub mod channel;
pub mod manual;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use channel::ChannelClock;
pub use manual::{ClockCall, ManualClock};

/// The two tick sources the controller can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockMode {
    Main,
    Cooldown,
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockMode::Main => f.write_str("main"),
            ClockMode::Cooldown => f.write_str("cooldown"),
        }
    }
}

/// Start/stop handle for the periodic tick sources.
///
/// Both calls must take effect before they return: after `stop(mode)` no
/// further tick from `mode` may be delivered.
pub trait TickClock: Send {
    fn start(&mut self, mode: ClockMode);
    fn stop(&mut self, mode: ClockMode);
}
