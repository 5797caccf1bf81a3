//! Timer controller: the state machine behind the toggle button
//!
//! ```text
//!            toggle                 tick @ 180k
//!   Idle  <--------->  Active  ------------------>  Cooldown
//!                        ^                              |
//!                        +------ 120 ticks, running ----+
//! ```
//!
//! Toggling during cooldown is ignored. All time comes from outside: the
//! controller only switches tick sources through its [`TickClock`] and reacts
//! to [`TimerController::tick`].

use tracing::{debug, info, warn};

use super::{Phase, TimerEvent, TimerSnapshot, TimerState};
use crate::clock::{ClockMode, TickClock};
use crate::sinks::{PresentationSink, SinkError};

/// Active seconds between pulses
pub const PULSE_PERIOD_SECS: u64 = 6;
/// Active seconds between forced cooldowns
pub const COOLDOWN_TRIGGER_SECS: u64 = 180;
/// Length of a cooldown in seconds
pub const COOLDOWN_LENGTH_SECS: u64 = 120;

/// Result of a toggle request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Paused,
    /// Cooldown in progress, nothing changed
    Ignored,
}

impl ToggleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToggleOutcome::Started => "started",
            ToggleOutcome::Paused => "paused",
            ToggleOutcome::Ignored => "ignored",
        }
    }
}

/// Owns the single [`TimerState`] and routes every mutation through `toggle` and `tick`
pub struct TimerController {
    state: TimerState,
    clock: Box<dyn TickClock>,
    sink: Box<dyn PresentationSink>,
}

impl TimerController {
    /// Create an idle controller; nothing is rendered until the first mutation
    pub fn new(clock: impl TickClock + 'static, sink: impl PresentationSink + 'static) -> Self {
        Self {
            state: TimerState::new(),
            clock: Box::new(clock),
            sink: Box::new(sink),
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Push the current snapshot to the sink without changing anything
    pub fn render(&mut self) {
        let snapshot = self.state.snapshot();
        report("render", self.sink.render(&snapshot));
    }

    /// Start or pause the main timer. Ignored while a cooldown runs.
    pub fn toggle(&mut self) -> ToggleOutcome {
        report("user interaction", self.sink.on_user_interaction());

        if self.state.in_cooldown {
            debug!("Toggle ignored during cooldown");
            return ToggleOutcome::Ignored;
        }

        self.state.running = !self.state.running;
        let outcome = if self.state.running {
            self.clock.start(ClockMode::Main);
            info!("Timer started at {}s", self.state.elapsed_seconds);
            ToggleOutcome::Started
        } else {
            self.clock.stop(ClockMode::Main);
            info!("Timer paused at {}s", self.state.elapsed_seconds);
            ToggleOutcome::Paused
        };

        self.render();
        outcome
    }

    /// Advance by one second of whichever source is active.
    ///
    /// Returns the events emitted on this tick, in emission order. A tick
    /// arriving while idle (a late tick after a pause) changes nothing.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let events = match self.state.phase() {
            Phase::Idle => {
                debug!("Ignoring tick while idle");
                return Vec::new();
            }
            Phase::Active => self.advance_main(),
            Phase::Cooldown => self.advance_cooldown(),
        };

        self.render();
        events
    }

    fn advance_main(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        self.state.elapsed_seconds += 1;
        let elapsed = self.state.elapsed_seconds;

        // Pulse goes out before the cooldown switch on a shared tick
        if elapsed % PULSE_PERIOD_SECS == 0 {
            self.state.pulse_count += 1;
            self.emit(TimerEvent::Pulse, &mut events);
        }

        if elapsed % COOLDOWN_TRIGGER_SECS == 0 {
            self.clock.stop(ClockMode::Main);
            self.state.in_cooldown = true;
            self.state.cooldown_remaining_seconds = COOLDOWN_LENGTH_SECS;
            self.clock.start(ClockMode::Cooldown);
            info!("Cooldown for {}s after {}s of activity", COOLDOWN_LENGTH_SECS, elapsed);
            self.emit(TimerEvent::CooldownStarted, &mut events);
        }

        events
    }

    fn advance_cooldown(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        self.state.cooldown_remaining_seconds = self.state.cooldown_remaining_seconds.saturating_sub(1);

        if self.state.cooldown_remaining_seconds == 0 {
            self.clock.stop(ClockMode::Cooldown);
            self.state.in_cooldown = false;
            self.emit(TimerEvent::CooldownEnded, &mut events);

            if self.state.running {
                self.clock.start(ClockMode::Main);
                info!("Cooldown over, resuming at {}s", self.state.elapsed_seconds);
            } else {
                info!("Cooldown over, timer stays paused");
            }
        }

        events
    }

    fn emit(&mut self, event: TimerEvent, events: &mut Vec<TimerEvent>) {
        events.push(event);
        report(event.as_str(), self.sink.notify(event));
    }
}

fn report(what: &str, result: Result<(), SinkError>) {
    if let Err(e) = result {
        warn!("Presentation sink failed during {}: {}", what, e);
    }
}
