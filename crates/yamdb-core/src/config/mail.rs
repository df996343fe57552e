//! Mail delivery configuration.

use serde::{Deserialize, Serialize};

/// Which mail backend delivers outgoing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailBackend {
    /// Write messages to the application log.
    Log,
    /// Write one file per message into `file_directory`.
    File,
    /// Keep messages in an in-process outbox.
    Memory,
}

/// Mail delivery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Backend used for delivery.
    #[serde(default = "default_backend")]
    pub backend: MailBackend,
    /// Sender address for confirmation codes.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Output directory for the file backend.
    #[serde(default = "default_directory")]
    pub file_directory: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            from_address: default_from(),
            file_directory: default_directory(),
        }
    }
}

fn default_backend() -> MailBackend {
    MailBackend::Log
}

fn default_from() -> String {
    "noreply@yamdb.local".to_string()
}

fn default_directory() -> String {
    "data/sent_emails".to_string()
}
