use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use super::{PaymentCustomer, PaymentLink, PaymentProvider};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct RazorpayProvider {
    key_id: String,
    key_secret: String,
    client: reqwest::Client,
}

impl RazorpayProvider {
    pub fn new(key_id: String, key_secret: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            key_id,
            key_secret,
            client,
        }
    }
}

#[derive(Deserialize)]
struct PaymentLinkResponse {
    id: String,
    short_url: String,
}

#[async_trait]
impl PaymentProvider for RazorpayProvider {
    async fn create_payment_link(
        &self,
        booking_id: &str,
        amount: i64,
        customer: &PaymentCustomer,
    ) -> anyhow::Result<PaymentLink> {
        let body = serde_json::json!({
            "amount": amount,
            "currency": "INR",
            "description": "Venue booking payment",
            "customer": {
                "name": customer.name,
                "email": customer.email,
                "contact": customer.phone,
            },
            "notify": { "sms": false, "email": false },
            "notes": { "booking_id": booking_id },
        });

        let response: PaymentLinkResponse = self
            .client
            .post("https://api.razorpay.com/v1/payment_links")
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .context("failed to reach Razorpay")?
            .error_for_status()
            .context("Razorpay API returned error")?
            .json()
            .await
            .context("failed to decode Razorpay response")?;

        Ok(PaymentLink {
            id: response.id,
            short_url: response.short_url,
        })
    }
}
