pub mod mailgun;

use async_trait::async_trait;

#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}
