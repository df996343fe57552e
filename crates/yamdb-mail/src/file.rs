//! Mail backend that writes one file per message.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use yamdb_core::error::{AppError, ErrorKind};
use yamdb_core::result::AppResult;
use yamdb_core::traits::{MailMessage, Mailer};

/// Writes each message as a plain-text file under a directory.
#[derive(Debug, Clone)]
pub struct FileMailer {
    /// Output directory.
    directory: PathBuf,
}

impl FileMailer {
    /// Create a file mailer, creating the directory if needed.
    pub async fn new(directory: &str) -> AppResult<Self> {
        let directory = PathBuf::from(directory);
        fs::create_dir_all(&directory).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create mail directory: {}", directory.display()),
                e,
            )
        })?;
        Ok(Self { directory })
    }

    /// Directory messages are written to.
    pub fn directory(&self) -> &PathBuf {
        &self.directory
    }

    fn render(message: &MailMessage) -> String {
        format!(
            "Subject: {}\nFrom: {}\nTo: {}\nDate: {}\n\n{}\n",
            message.subject,
            message.from,
            message.to.join(", "),
            Utc::now().to_rfc2822(),
            message.body
        )
    }
}

#[async_trait]
impl Mailer for FileMailer {
    async fn send(&self, message: &MailMessage) -> AppResult<()> {
        let name = format!(
            "{}-{}.log",
            Utc::now().format("%Y%m%d-%H%M%S"),
            Uuid::new_v4().simple()
        );
        let path = self.directory.join(name);
        fs::write(&path, Self::render(message)).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Delivery,
                format!("Failed to write mail file: {}", path.display()),
                e,
            )
        })?;
        debug!(path = %path.display(), "Wrote mail file");
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "file"
    }
}
