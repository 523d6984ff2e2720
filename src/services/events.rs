use std::sync::Arc;

use crate::models::LiveEvent;
use crate::state::AppState;

/// Fire-and-forget broadcast to SSE subscribers. A send error only means
/// nobody is listening right now.
pub fn publish(state: &Arc<AppState>, event: LiveEvent) {
    if state.events_tx.send(event).is_err() {
        tracing::debug!("no live-event subscribers");
    }
}
