use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use super::MailProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct MailgunProvider {
    domain: String,
    api_key: String,
    from: String,
    client: reqwest::Client,
}

impl MailgunProvider {
    pub fn new(domain: String, api_key: String, from: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            domain,
            api_key,
            from,
            client,
        }
    }
}

#[async_trait]
impl MailProvider for MailgunProvider {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        // Empty API key = dev mode, mail is a no-op.
        if self.api_key.is_empty() {
            tracing::info!(to = %to, subject = %subject, "mail disabled, skipping send");
            return Ok(());
        }

        let url = format!("https://api.mailgun.net/v3/{}/messages", self.domain);

        self.client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.from.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await
            .context("failed to send mail")?
            .error_for_status()
            .context("Mailgun API returned error")?;

        Ok(())
    }
}
