use std::sync::Arc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::LiveEvent;
use crate::services::{dates, events};
use crate::state::AppState;

/// Deletes bookings whose event date has passed. Runs opportunistically at
/// the start of the admin booking-list fetch; expired bookings are inert, so
/// deferred cleanup is acceptable.
pub fn sweep_past_bookings(state: &Arc<AppState>) -> Result<usize, AppError> {
    let today = dates::today();

    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_past_bookings(&db, &today)?
    };

    if removed > 0 {
        tracing::info!(removed, "swept past bookings");
        events::publish(
            state,
            LiveEvent::new("bookings_swept", format!("{removed} past bookings removed")),
        );
    }

    Ok(removed)
}
