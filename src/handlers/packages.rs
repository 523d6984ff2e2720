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
use crate::models::{MenuSection, Package, PriceTier, PricingMode};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub pricing_mode: Option<PricingMode>,
    pub price: Option<i64>,
    #[serde(default)]
    pub price_tiers: Vec<PriceTier>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<String>,
    #[serde(default)]
    pub menu_sections: Vec<MenuSection>,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl PackageInput {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return Err(AppError::Validation(
                "name and category are required".to_string(),
            ));
        }
        Ok(())
    }
}

// GET /api/packages
pub async fn list_packages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Package>>, AppError> {
    let packages = {
        let db = state.db.lock().unwrap();
        queries::get_all_packages(&db)?
    };
    Ok(Json(packages))
}

// GET /api/packages/:id
pub async fn get_package(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Package>, AppError> {
    let package = {
        let db = state.db.lock().unwrap();
        queries::get_package_by_id(&db, &id)?
    };
    package
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("package {id}")))
}

// POST /api/admin/packages
pub async fn create_package(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<PackageInput>,
) -> Result<impl IntoResponse, AppError> {
    let claims = check_auth(&headers, &state.config.auth_secret)?;
    body.validate()?;

    let now = Utc::now().naive_utc();
    let package = Package {
        id: Uuid::new_v4().to_string(),
        name: body.name.trim().to_string(),
        category: body.category.trim().to_string(),
        description: body.description,
        pricing_mode: body.pricing_mode.unwrap_or(PricingMode::Fixed),
        price: body.price,
        price_tiers: body.price_tiers,
        inclusions: body.inclusions,
        exclusions: body.exclusions,
        menu_sections: body.menu_sections,
        terms: body.terms,
        images: body.images,
        created_by: Some(claims.admin_id),
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::save_package(&db, &package)?;
    }

    Ok((StatusCode::CREATED, Json(package)))
}

// PUT /api/admin/packages/:id
pub async fn update_package(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<PackageInput>,
) -> Result<Json<Package>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;
    body.validate()?;

    let db = state.db.lock().unwrap();
    let existing = queries::get_package_by_id(&db, &id)?
        .ok_or_else(|| AppError::NotFound(format!("package {id}")))?;

    let package = Package {
        id: existing.id,
        name: body.name.trim().to_string(),
        category: body.category.trim().to_string(),
        description: body.description,
        pricing_mode: body.pricing_mode.unwrap_or(existing.pricing_mode),
        price: body.price,
        price_tiers: body.price_tiers,
        inclusions: body.inclusions,
        exclusions: body.exclusions,
        menu_sections: body.menu_sections,
        terms: body.terms,
        images: body.images,
        created_by: existing.created_by,
        created_at: existing.created_at,
        updated_at: Utc::now().naive_utc(),
    };
    queries::save_package(&db, &package)?;

    Ok(Json(package))
}

// DELETE /api/admin/packages/:id
pub async fn delete_package(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.auth_secret)?;

    let deleted = {
        let db = state.db.lock().unwrap();
        queries::delete_package(&db, &id)?
    };
    if !deleted {
        return Err(AppError::NotFound(format!("package {id}")));
    }

    Ok(Json(serde_json::json!({ "message": "package deleted", "id": id })))
}
