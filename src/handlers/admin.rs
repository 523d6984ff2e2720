use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_auth;
use crate::models::Booking;
use crate::services::{auth, lifecycle, retention};
use crate::state::AppState;

// GET /api/admin/bookings
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    // Opportunistic cleanup; a failed sweep must not block the listing.
    if let Err(e) = retention::sweep_past_bookings(&state) {
        tracing::error!(error = %e, "retention sweep failed");
    }

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db)?
    };

    Ok(Json(bookings))
}

// POST /api/admin/bookings/:id/approve
#[derive(Deserialize)]
pub struct ApproveRequest {
    pub amount: Option<i64>,
}

pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ApproveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let outcome = lifecycle::approve(&state, &id, body.amount).await?;

    Ok(Json(serde_json::json!({
        "message": "booking approved",
        "booking": outcome.booking,
        "paymentLink": outcome.payment_link,
    })))
}

// POST /api/admin/bookings/:id/reject
pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let booking_id = lifecycle::reject(&state, &id).await?;

    Ok(Json(serde_json::json!({
        "message": "booking rejected",
        "bookingId": booking_id,
    })))
}

// DELETE /api/admin/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_booking(&db, &id)?
    };
    if !deleted {
        return Err(AppError::NotFound(format!("booking {id}")));
    }

    Ok(Json(serde_json::json!({
        "message": "booking deleted",
        "bookingId": id,
    })))
}

// PUT /api/admin/credentials
#[derive(Deserialize)]
pub struct UpdateCredentialsRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn update_credentials(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateCredentialsRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let claims = check_auth(&headers, &state.config.auth_secret)?;

    let db = state.db.lock().unwrap();
    let mut admin = queries::get_admin_by_id(&db, &claims.admin_id)?
        .ok_or_else(|| AppError::NotFound("admin account".to_string()))?;

    if let Some(name) = body.name {
        admin.name = name.trim().to_string();
    }
    if let Some(email) = body.email {
        let email = email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::Validation("email cannot be empty".to_string()));
        }
        admin.email = email;
    }
    if let Some(password) = body.password {
        if password.len() < 8 {
            return Err(AppError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }
        // A supplied password always gets a fresh hash; nothing re-hashes
        // implicitly on unrelated field changes.
        admin.password_hash = auth::hash_password(&password)?;
    }

    queries::update_admin(&db, &admin)?;

    Ok(Json(serde_json::json!({
        "message": "credentials updated",
        "admin": admin,
    })))
}
