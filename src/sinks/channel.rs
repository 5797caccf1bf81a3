//! Sink that republishes timer activity on tokio channels

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use super::{PresentationSink, SinkError};
use crate::state::{TimerEvent, TimerSnapshot};

/// One item on the update stream consumed by SSE clients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum TimerUpdate {
    Event(TimerEvent),
    Snapshot(TimerSnapshot),
}

/// Publishes snapshots on a watch channel and every update on a broadcast channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    snapshot_tx: watch::Sender<TimerSnapshot>,
    update_tx: broadcast::Sender<TimerUpdate>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> Self {
        let (snapshot_tx, _) = watch::channel(TimerSnapshot::default());
        let (update_tx, _) = broadcast::channel(capacity);
        Self { snapshot_tx, update_tx }
    }

    /// The most recently rendered snapshot
    pub fn latest(&self) -> TimerSnapshot {
        *self.snapshot_tx.borrow()
    }

    pub fn subscribe_updates(&self) -> broadcast::Receiver<TimerUpdate> {
        self.update_tx.subscribe()
    }

    fn publish(&self, update: TimerUpdate) {
        // No subscribers is the normal state when nobody is watching
        let _ = self.update_tx.send(update);
    }
}

impl PresentationSink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    fn render(&mut self, snapshot: &TimerSnapshot) -> Result<(), SinkError> {
        self.snapshot_tx.send_replace(*snapshot);
        self.publish(TimerUpdate::Snapshot(*snapshot));
        Ok(())
    }

    fn notify(&mut self, event: TimerEvent) -> Result<(), SinkError> {
        self.publish(TimerUpdate::Event(event));
        Ok(())
    }
}
