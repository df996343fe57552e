//! Mail backend that writes messages to the application log.

use async_trait::async_trait;
use tracing::info;

use yamdb_core::result::AppResult;
use yamdb_core::traits::{MailMessage, Mailer};

/// Logs every message at `info` level instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    /// Create a log mailer.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            body = %message.body,
            "Outgoing mail"
        );
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "log"
    }
}
