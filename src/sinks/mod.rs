//! Presentation sinks
//!
//! Sinks receive a snapshot after every state change and a callback for every
//! discrete event. They produce side effects (terminal output, bells, channel
//! fan-out) but never change timer state. A sink failure is logged and
//! otherwise ignored; the timer keeps counting regardless.

pub mod channel;
pub mod cue;
pub mod log_sink;
pub mod terminal;

use thiserror::Error;
use tracing::warn;

use crate::state::{TimerEvent, TimerSnapshot};

pub use channel::{ChannelSink, TimerUpdate};
pub use log_sink::LogSink;
pub use terminal::TerminalSink;

/// Errors a sink may report back to the controller
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} is unavailable")]
    Unavailable(String),
}

/// Reactive receiver of timer snapshots and events
pub trait PresentationSink: Send {
    /// Short name used in log lines
    fn name(&self) -> &str;

    fn render(&mut self, snapshot: &TimerSnapshot) -> Result<(), SinkError>;

    fn on_pulse(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_cooldown_start(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    fn on_cooldown_end(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Called on every user toggle attempt, including ignored ones.
    /// Sinks whose audio output must be unlocked by a user gesture resume it here.
    fn on_user_interaction(&mut self) -> Result<(), SinkError> {
        Ok(())
    }

    /// Dispatch an event to the matching callback
    fn notify(&mut self, event: TimerEvent) -> Result<(), SinkError> {
        match event {
            TimerEvent::Pulse => self.on_pulse(),
            TimerEvent::CooldownStarted => self.on_cooldown_start(),
            TimerEvent::CooldownEnded => self.on_cooldown_end(),
        }
    }
}

/// Forwards every call to a list of sinks, skipping over failing ones
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn PresentationSink>>,
}

impl FanoutSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl PresentationSink + 'static) -> Self {
        self.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn PresentationSink>) {
        self.sinks.push(sink);
    }

    fn each<F>(&mut self, what: &str, mut call: F)
    where
        F: FnMut(&mut dyn PresentationSink) -> Result<(), SinkError>,
    {
        for sink in self.sinks.iter_mut() {
            if let Err(e) = call(sink.as_mut()) {
                warn!("Sink {} failed during {}: {}", sink.name(), what, e);
            }
        }
    }
}

impl PresentationSink for FanoutSink {
    fn name(&self) -> &str {
        "fanout"
    }

    fn render(&mut self, snapshot: &TimerSnapshot) -> Result<(), SinkError> {
        self.each("render", |sink| sink.render(snapshot));
        Ok(())
    }

    fn on_user_interaction(&mut self) -> Result<(), SinkError> {
        self.each("user interaction", |sink| sink.on_user_interaction());
        Ok(())
    }

    fn notify(&mut self, event: TimerEvent) -> Result<(), SinkError> {
        self.each(event.as_str(), |sink| sink.notify(event));
        Ok(())
    }
}
