//! Manually advanced clock for deterministic tests and embedding

use std::sync::{Arc, Mutex, MutexGuard};

use super::{ClockMode, TickClock};

/// A recorded call against the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCall {
    Start(ClockMode),
    Stop(ClockMode),
}

#[derive(Debug, Default)]
struct ManualClockInner {
    active: Option<ClockMode>,
    calls: Vec<ClockCall>,
}

/// Fake clock that only records subscriptions.
///
/// Clones share state, so a test can hand one clone to the controller and keep
/// another to inspect which source should be ticking.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<ManualClockInner>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ManualClockInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Source that should currently be delivering ticks
    pub fn active(&self) -> Option<ClockMode> {
        self.lock().active
    }

    pub fn is_running(&self, mode: ClockMode) -> bool {
        self.active() == Some(mode)
    }

    /// Every start/stop call so far, in order
    pub fn calls(&self) -> Vec<ClockCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

impl TickClock for ManualClock {
    fn start(&mut self, mode: ClockMode) {
        let mut inner = self.lock();
        inner.active = Some(mode);
        inner.calls.push(ClockCall::Start(mode));
    }

    fn stop(&mut self, mode: ClockMode) {
        let mut inner = self.lock();
        if inner.active == Some(mode) {
            inner.active = None;
        }
        inner.calls.push(ClockCall::Stop(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let observer = ManualClock::new();
        let mut clock = observer.clone();

        clock.start(ClockMode::Main);
        assert!(observer.is_running(ClockMode::Main));

        clock.stop(ClockMode::Main);
        assert_eq!(observer.active(), None);
        assert_eq!(
            observer.calls(),
            vec![ClockCall::Start(ClockMode::Main), ClockCall::Stop(ClockMode::Main)]
        );
    }
}
