use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::services::auth::{self, AdminClaims};
use crate::state::AppState;

/// Bearer-token check shared by the admin handlers. A missing header is
/// rejected outright; a present but bad or expired token is unauthorized.
pub fn check_auth(headers: &HeaderMap, secret: &str) -> Result<AdminClaims, AppError> {
    let Some(header) = headers.get("authorization").and_then(|v| v.to_str().ok()) else {
        return Err(AppError::MissingAuth);
    };
    let token = header.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
    auth::verify_token(token, secret)
}

// POST /api/admin/login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let email = body.email.trim().to_string();
    if email.is_empty() || body.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let admin = {
        let db = state.db.lock().unwrap();
        queries::get_admin_by_email(&db, &email)?
    };

    let Some(admin) = admin else {
        return Err(AppError::Unauthorized);
    };
    if !auth::verify_password(&admin.password_hash, &body.password) {
        return Err(AppError::Unauthorized);
    }

    let token = auth::issue_token(
        &admin.id,
        &state.config.auth_secret,
        state.config.token_ttl_hours,
    );

    Ok(Json(serde_json::json!({ "token": token, "admin": admin })))
}
