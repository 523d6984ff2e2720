use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use venuebook::config::AppConfig;
use venuebook::db;
use venuebook::handlers;
use venuebook::services::auth;
use venuebook::services::mail::mailgun::MailgunProvider;
use venuebook::services::payments::razorpay::RazorpayProvider;
use venuebook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;
    auth::ensure_bootstrap_admin(&conn, &config)?;

    let payments = RazorpayProvider::new(
        config.razorpay_key_id.clone(),
        config.razorpay_key_secret.clone(),
    );
    let mailer = MailgunProvider::new(
        config.mailgun_domain.clone(),
        config.mailgun_api_key.clone(),
        config.mail_from.clone(),
    );

    let (events_tx, _) = broadcast::channel(256);

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        payments: Box::new(payments),
        mailer: Box::new(mailer),
        events_tx,
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/bookings", get(handlers::bookings::get_booked_dates))
        .route("/api/bookings", post(handlers::bookings::submit_booking))
        .route("/api/packages", get(handlers::packages::list_packages))
        .route("/api/packages/:id", get(handlers::packages::get_package))
        .route("/api/contact", get(handlers::contact::get_contact))
        .route("/api/gallery", get(handlers::gallery::list_images))
        .route(
            "/api/razorpay/webhook",
            post(handlers::webhook::razorpay_webhook),
        )
        .route("/api/admin/login", post(handlers::auth::login))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/bookings/:id/approve",
            post(handlers::admin::approve_booking),
        )
        .route(
            "/api/admin/bookings/:id/reject",
            post(handlers::admin::reject_booking),
        )
        .route(
            "/api/admin/bookings/:id",
            delete(handlers::admin::delete_booking),
        )
        .route(
            "/api/admin/packages",
            post(handlers::packages::create_package),
        )
        .route(
            "/api/admin/packages/:id",
            put(handlers::packages::update_package),
        )
        .route(
            "/api/admin/packages/:id",
            delete(handlers::packages::delete_package),
        )
        .route("/api/admin/contact", put(handlers::contact::update_contact))
        .route("/api/admin/gallery", post(handlers::gallery::add_image))
        .route(
            "/api/admin/gallery/:id",
            delete(handlers::gallery::delete_image),
        )
        .route(
            "/api/admin/credentials",
            put(handlers::admin::update_credentials),
        )
        .route("/api/events", get(handlers::events::events_stream))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
