//! Discrete timer events

use std::fmt;

use serde::{Deserialize, Serialize};

/// Events emitted by the controller; they carry no payload beyond their kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerEvent {
    Pulse,
    CooldownStarted,
    CooldownEnded,
}

impl TimerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerEvent::Pulse => "pulse",
            TimerEvent::CooldownStarted => "cooldown-started",
            TimerEvent::CooldownEnded => "cooldown-ended",
        }
    }
}

impl fmt::Display for TimerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_as_str() {
        for event in [TimerEvent::Pulse, TimerEvent::CooldownStarted, TimerEvent::CooldownEnded] {
            let json = serde_json::to_string(&event).unwrap();
            assert_eq!(json, format!("\"{}\"", event.as_str()));
        }
    }
}
