//! Mail manager that dispatches to the configured backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use yamdb_core::config::mail::{MailBackend, MailConfig};
use yamdb_core::result::AppResult;
use yamdb_core::traits::{MailMessage, Mailer};

use crate::{FileMailer, LogMailer, MemoryMailer};

/// Mail manager that wraps the configured backend.
///
/// The backend is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct MailManager {
    /// The inner backend.
    inner: Arc<dyn Mailer>,
}

impl MailManager {
    /// Create a new mail manager from configuration.
    pub async fn new(config: &MailConfig) -> AppResult<Self> {
        let inner: Arc<dyn Mailer> = match config.backend {
            MailBackend::Log => {
                info!("Initializing log mail backend");
                Arc::new(LogMailer::new())
            }
            MailBackend::File => {
                info!(directory = %config.file_directory, "Initializing file mail backend");
                Arc::new(FileMailer::new(&config.file_directory).await?)
            }
            MailBackend::Memory => {
                info!("Initializing in-memory mail backend");
                Arc::new(MemoryMailer::new())
            }
        };
        Ok(Self { inner })
    }

    /// Create a mail manager from an existing backend (for testing).
    pub fn from_mailer(mailer: Arc<dyn Mailer>) -> Self {
        Self { inner: mailer }
    }
}

#[async_trait]
impl Mailer for MailManager {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        self.inner.send(message).await
    }

    fn backend_name(&self) -> &str {
        self.inner.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_selects_backend_from_config() {
        let config = MailConfig {
            backend: MailBackend::Memory,
            ..Default::default()
        };
        let manager = MailManager::new(&config).await.unwrap();
        assert_eq!(manager.backend_name(), "memory");

        let manager = MailManager::new(&MailConfig::default()).await.unwrap();
        assert_eq!(manager.backend_name(), "log");
    }

    #[tokio::test]
    async fn test_from_mailer_delegates() {
        let outbox = MemoryMailer::new();
        let manager = MailManager::from_mailer(Arc::new(outbox.clone()));
        manager
            .send(&MailMessage::new("s", "b", "f@x.com", "b@x.com"))
            .await
            .unwrap();
        assert_eq!(outbox.sent().await.len(), 1);
    }
}
