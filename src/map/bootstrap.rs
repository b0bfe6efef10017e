use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::map::error::MapError;

pub const DEFAULT_SCRIPT_BASE: &str = "https://maps.googleapis.com/maps/api/js";
pub const READY_CALLBACK: &str = "google.maps.__ib__";

/// Parameters of the widget's bootstrap script request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_version() -> String { "weekly".to_string() }
fn default_base_url() -> String { DEFAULT_SCRIPT_BASE.to_string() }

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            version: default_version(),
            base_url: default_base_url(),
        }
    }
}

impl BootstrapConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Script URL loading `libraries` in one request.
    pub fn script_url(&self, libraries: &[String]) -> Result<Url, MapError> {
        let libraries = libraries.join(",");
        Url::parse_with_params(
            &self.base_url,
            [
                ("libraries", libraries.as_str()),
                ("key", self.api_key.as_str()),
                ("v", self.version.as_str()),
                ("callback", READY_CALLBACK),
            ],
        )
        .map_err(|e| MapError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}
