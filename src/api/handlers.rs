//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

use crate::{
    sinks::{cue::CueInfo, TimerUpdate},
    state::{AppState, TimerSnapshot},
};
use super::responses::{DisplayResponse, HealthResponse, StatusResponse, ToggleResponse};

/// Handle POST /toggle - Start or pause the timer
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ToggleResponse>, StatusCode> {
    match state.toggle("http") {
        Ok((outcome, snapshot)) => {
            info!("Toggle endpoint called - {}", outcome.as_str());
            Ok(Json(ToggleResponse::from_outcome(outcome, snapshot)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.latest_snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        display: DisplayResponse::from(&timer),
        timer,
        cue: CueInfo::current(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream snapshots and events as Server-Sent Events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, StatusCode> {
    // Subscribe before reading the snapshot so nothing falls in between
    let rx = state.subscribe_updates();
    let initial = state.get_timer_snapshot().map_err(|e| {
        error!("Failed to get timer state: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let events = update_stream(initial, rx).map(sse_event);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// The current snapshot followed by every later update. Lagging clients skip
/// what they missed; the next snapshot brings them back in sync.
pub fn update_stream(
    initial: TimerSnapshot,
    rx: broadcast::Receiver<TimerUpdate>,
) -> impl Stream<Item = TimerUpdate> {
    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(update) => return Some((update, rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("SSE client lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    stream::once(async move { TimerUpdate::Snapshot(initial) }).chain(updates)
}

fn sse_event(update: TimerUpdate) -> Result<Event, axum::Error> {
    match update {
        TimerUpdate::Event(event) => Event::default().event(event.as_str()).json_data(event),
        TimerUpdate::Snapshot(snapshot) => Event::default().event("snapshot").json_data(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{TimerEvent, TimerState};

    #[tokio::test]
    async fn update_stream_starts_with_snapshot() {
        let (tx, rx) = broadcast::channel(8);
        let initial = TimerState { running: true, elapsed_seconds: 5, ..TimerState::new() }.snapshot();

        let stream = update_stream(initial, rx);
        tx.send(TimerUpdate::Event(TimerEvent::Pulse)).unwrap();
        drop(tx);

        let items: Vec<TimerUpdate> = stream.collect().await;
        assert_eq!(
            items,
            vec![TimerUpdate::Snapshot(initial), TimerUpdate::Event(TimerEvent::Pulse)]
        );
    }

    #[tokio::test]
    async fn lagged_client_keeps_receiving() {
        let (tx, rx) = broadcast::channel(2);
        let stream = update_stream(TimerSnapshot::default(), rx);
        for _ in 0..4 {
            tx.send(TimerUpdate::Event(TimerEvent::Pulse)).unwrap();
        }
        tx.send(TimerUpdate::Event(TimerEvent::CooldownStarted)).unwrap();
        drop(tx);

        let items: Vec<TimerUpdate> = stream.collect().await;
        assert_eq!(items.last(), Some(&TimerUpdate::Event(TimerEvent::CooldownStarted)));
        assert_eq!(items.len(), 3);
    }
}
