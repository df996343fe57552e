//! Seed data configuration.

use serde::{Deserialize, Serialize};

/// Where startup seed data is read from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding CSV exports; nothing is loaded when unset.
    #[serde(default)]
    pub seed_directory: Option<String>,
}
