pub mod razorpay;

use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct PaymentCustomer {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub id: String,
    pub short_url: String,
}

#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Mints a payable link. `booking_id` rides along in the provider notes
    /// and comes back in the webhook payload as the correlation id.
    async fn create_payment_link(
        &self,
        booking_id: &str,
        amount: i64,
        customer: &PaymentCustomer,
    ) -> anyhow::Result<PaymentLink>;
}
