use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::errors::AppError;
use crate::services::auth;
use crate::services::lifecycle::{self, PaymentCapture};
use crate::state::AppState;

#[derive(Deserialize)]
struct WebhookEvent {
    #[serde(default)]
    event: String,
    #[serde(default)]
    payload: WebhookPayload,
}

#[derive(Deserialize, Default)]
struct WebhookPayload {
    payment: Option<WebhookPayment>,
}

#[derive(Deserialize)]
struct WebhookPayment {
    entity: PaymentEntity,
}

#[derive(Deserialize)]
struct PaymentEntity {
    id: String,
    #[serde(default)]
    notes: serde_json::Value,
}

fn verify_webhook_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    let expected = hex::encode(mac.finalize().into_bytes());

    auth::constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

// POST /api/razorpay/webhook
//
// The signature covers the exact raw body, so the handler takes `Bytes` and
// only parses JSON after verification succeeds.
pub async fn razorpay_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    // Skip verification if no secret is configured (dev mode)
    if !state.config.razorpay_webhook_secret.is_empty() {
        let signature = headers
            .get("x-razorpay-signature")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !verify_webhook_signature(&state.config.razorpay_webhook_secret, &body, signature) {
            tracing::warn!("invalid webhook signature");
            return Err(AppError::SignatureInvalid);
        }
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable webhook payload, acknowledging");
            return Ok(Json(serde_json::json!({ "status": "ok" })));
        }
    };

    if event.event == "payment.captured" {
        if let Some(payment) = event.payload.payment {
            let entity = payment.entity;
            let booking_id = entity
                .notes
                .get("booking_id")
                .and_then(|v| v.as_str())
                .map(String::from);

            lifecycle::confirm_payment(
                &state,
                PaymentCapture {
                    booking_id,
                    payment_id: entity.id,
                },
            )
            .await?;
        }
    } else {
        tracing::debug!(event = %event.event, "ignoring webhook event");
    }

    Ok(Json(serde_json::json!({ "status": "ok" })))
}
