//! Keyboard toggle task

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

use crate::state::AppState;

/// Toggle the timer once for every line read from `input`
pub async fn keyboard_task<R>(state: Arc<AppState>, input: R)
where
    R: AsyncBufRead + Unpin,
{
    info!("Press Enter to start or pause the timer");

    let mut lines = input.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(_)) => {
                if let Err(e) = state.toggle("keyboard") {
                    warn!("Keyboard toggle failed: {}", e);
                }
            }
            Ok(None) => {
                info!("Keyboard input closed");
                break;
            }
            Err(e) => {
                warn!("Failed to read keyboard input: {}", e);
                break;
            }
        }
    }
}
