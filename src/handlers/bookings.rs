use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::errors::AppError;
use crate::services::admission::{self, BookingRequest};
use crate::state::AppState;

// GET /api/bookings
pub async fn get_booked_dates(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let dates = admission::booked_dates(&state)?;
    Ok(Json(serde_json::json!({ "bookedDates": dates })))
}

// POST /api/bookings
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (booking, booked_dates) = admission::submit_booking(&state, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "booking request received",
            "booking": booking,
            "bookedDates": booked_dates,
        })),
    ))
}
