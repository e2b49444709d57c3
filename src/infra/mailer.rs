use crate::domain::ports::Mailer;
use crate::error::AppError;
use async_trait::async_trait;
use tracing::info;

/// Default mailer: writes guest notices to the log instead of a wire.
/// Deployments with a real provider swap this behind the same port.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError> {
        info!(recipient, subject, "sending mail: {}", body);
        Ok(())
    }
}
