use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_auth;
use crate::models::{Contact, SocialLinks};
use crate::state::AppState;

// GET /api/contact
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Contact>, AppError> {
    let contact = {
        let db = state.db.lock().unwrap();
        queries::get_contact(&db)?
    };

    Ok(Json(contact.unwrap_or_else(|| Contact {
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        map_url: None,
        socials: SocialLinks::default(),
        updated_at: Utc::now().naive_utc(),
    })))
}

// PUT /api/admin/contact
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub map_url: Option<String>,
    #[serde(default)]
    pub socials: SocialLinks,
}

pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ContactInput>,
) -> Result<Json<Contact>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let contact = Contact {
        phone: body.phone.trim().to_string(),
        email: body.email.trim().to_string(),
        address: body.address.trim().to_string(),
        map_url: body.map_url,
        socials: body.socials,
        updated_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::save_contact(&db, &contact)?;
    }

    Ok(Json(contact))
}
