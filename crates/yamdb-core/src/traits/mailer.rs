//! Mail delivery trait for pluggable mail backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A single outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Sender address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
}

impl MailMessage {
    /// Create a message addressed to a single recipient.
    pub fn new(
        subject: impl Into<String>,
        body: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            from: from.into(),
            to: vec![to.into()],
        }
    }
}

/// Trait for mail backends (log, file, in-memory, or a real transport).
///
/// Implementations must return a `Delivery` error when the message could
/// not be handed off; callers propagate it rather than swallowing it.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a message.
    async fn send(&self, message: &MailMessage) -> AppResult<()>;

    /// Short backend name for logging.
    fn backend_name(&self) -> &str;
}
