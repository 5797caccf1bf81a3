//! Clock backed by a watch channel, driven by the ticker task

use tokio::sync::watch;
use tracing::debug;

use super::{ClockMode, TickClock};

/// Publishes the currently subscribed tick source.
///
/// `None` means no source is active. The ticker task watches the receiver side
/// and restarts its one-second period on every change.
#[derive(Debug)]
pub struct ChannelClock {
    mode_tx: watch::Sender<Option<ClockMode>>,
}

impl ChannelClock {
    /// Create a clock with no active source
    pub fn new() -> Self {
        let (mode_tx, _) = watch::channel(None);
        Self { mode_tx }
    }

    /// Subscribe to mode changes
    pub fn subscribe(&self) -> watch::Receiver<Option<ClockMode>> {
        self.mode_tx.subscribe()
    }
}

impl Default for ChannelClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for ChannelClock {
    fn start(&mut self, mode: ClockMode) {
        debug!("Starting {} clock", mode);
        self.mode_tx.send_replace(Some(mode));
    }

    fn stop(&mut self, mode: ClockMode) {
        // Only clear the slot if it still belongs to this mode
        let stopped = self.mode_tx.send_if_modified(|current| {
            if *current == Some(mode) {
                *current = None;
                true
            } else {
                false
            }
        });
        if stopped {
            debug!("Stopped {} clock", mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_stop_update_receivers() {
        let mut clock = ChannelClock::new();
        let rx = clock.subscribe();
        assert_eq!(*rx.borrow(), None);

        clock.start(ClockMode::Main);
        assert_eq!(*rx.borrow(), Some(ClockMode::Main));

        clock.stop(ClockMode::Main);
        assert_eq!(*rx.borrow(), None);
    }

    #[test]
    fn stopping_inactive_mode_leaves_active_one() {
        let mut clock = ChannelClock::new();
        let rx = clock.subscribe();
        clock.start(ClockMode::Cooldown);
        clock.stop(ClockMode::Main);
        assert_eq!(*rx.borrow(), Some(ClockMode::Cooldown));
    }
}
