//! Avatar address configuration.

use serde::{Deserialize, Serialize};

/// External avatar service the derived avatar URLs point at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Base URL; the email digest is appended as a path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Requested image size in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            size: default_size(),
        }
    }
}

fn default_base_url() -> String {
    "https://gravatar.com/avatar".to_string()
}

fn default_size() -> u32 {
    128
}
