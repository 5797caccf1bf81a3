//! Sink that reports timer activity through tracing

use tracing::{debug, info};

use super::{PresentationSink, SinkError};
use crate::state::TimerSnapshot;

#[derive(Debug, Default)]
pub struct LogSink;

impl PresentationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    fn render(&mut self, snapshot: &TimerSnapshot) -> Result<(), SinkError> {
        debug!(
            phase = snapshot.phase.as_str(),
            elapsed = snapshot.elapsed_seconds,
            pulses = snapshot.pulse_count,
            cooldown_remaining = snapshot.cooldown_remaining_seconds,
            "Timer updated"
        );
        Ok(())
    }

    fn on_pulse(&mut self) -> Result<(), SinkError> {
        debug!("Pulse");
        Ok(())
    }

    fn on_cooldown_start(&mut self) -> Result<(), SinkError> {
        info!("Cooldown started, main timer suspended");
        Ok(())
    }

    fn on_cooldown_end(&mut self) -> Result<(), SinkError> {
        info!("Cooldown finished");
        Ok(())
    }
}
