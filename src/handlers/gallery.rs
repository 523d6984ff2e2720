use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::auth::check_auth;
use crate::models::GalleryImage;
use crate::state::AppState;

// GET /api/gallery
pub async fn list_images(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GalleryImage>>, AppError> {
    let images = {
        let db = state.db.lock().unwrap();
        queries::get_gallery_images(&db)?
    };
    Ok(Json(images))
}

// POST /api/admin/gallery
#[derive(Deserialize)]
pub struct GalleryInput {
    #[serde(default)]
    pub url: String,
    pub caption: Option<String>,
    pub category: Option<String>,
}

pub async fn add_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<GalleryInput>,
) -> Result<impl IntoResponse, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let url = body.url.trim().to_string();
    if url.is_empty() {
        return Err(AppError::Validation("url is required".to_string()));
    }

    let image = GalleryImage {
        id: Uuid::new_v4().to_string(),
        url,
        caption: body.caption,
        category: body.category,
        created_at: Utc::now().naive_utc(),
    };

    {
        let db = state.db.lock().unwrap();
        queries::insert_gallery_image(&db, &image)?;
    }

    Ok((StatusCode::CREATED, Json(image)))
}

// DELETE /api/admin/gallery/:id
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_gallery_image(&db, &id)?
    };
    if !deleted {
        return Err(AppError::NotFound(format!("image {id}")));
    }

    Ok(Json(serde_json::json!({ "message": "image deleted", "id": id })))
}
