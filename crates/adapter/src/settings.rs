//! Adapter configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Configuration for the Seedtag exchange endpoints.
///
/// Every field has a production default, so hosts normally construct this
/// with [`Default::default`]; tests point the adapter at local endpoints
/// by overriding them.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SeedtagConfig {
    /// Bidding endpoint.
    #[serde(default = "default_endpoint")]
    #[validate(url)]
    pub endpoint: String,

    /// Timeout-tracking endpoint.
    #[serde(default = "default_timeout_endpoint")]
    #[validate(url)]
    pub timeout_endpoint: String,
}

fn default_endpoint() -> String {
    "https://s.seedtag.com/c/hb/bid".to_string()
}

fn default_timeout_endpoint() -> String {
    "https://s.seedtag.com/se/hb/timeout".to_string()
}

impl Default for SeedtagConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_endpoint: default_timeout_endpoint(),
        }
    }
}
