//! In-process outbox mail backend.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::{MailMessage, Mailer};

/// Collects messages in memory. Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryMailer {
    outbox: Arc<RwLock<Vec<MailMessage>>>,
    failing: Arc<AtomicBool>,
}

impl MemoryMailer {
    /// Create an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message sent so far, oldest first.
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.read().await.clone()
    }

    /// The most recent message addressed to `recipient`.
    pub async fn last_to(&self, recipient: &str) -> Option<MailMessage> {
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|m| m.to.iter().any(|to| to == recipient))
            .cloned()
    }

    /// Make subsequent sends fail with a delivery error (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            warn!(to = ?message.to, "Memory mailer configured to fail");
            return Err(AppError::delivery("Mail delivery failed"));
        }
        self.outbox.write().await.push(message.clone());
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
