use std::time::Duration;

use tracing::warn;

use crate::map::bootstrap::BootstrapConfig;
use crate::map::error::MapError;

/// A loaded widget library set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetHandle {
    pub script_url: String,
    pub libraries: Vec<String>,
    pub script_bytes: usize,
}

/// Fetches the widget script. Called at most once per session.
pub trait WidgetLoader: Send + Sync {
    fn load(&self, libraries: &[String]) -> Result<WidgetHandle, MapError>;
}

/// Loads the widget's bootstrap script over HTTP.
pub struct HttpScriptLoader {
    config: BootstrapConfig,
    client: reqwest::blocking::Client,
}

impl HttpScriptLoader {
    pub fn new(config: BootstrapConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!("could not configure map script client, using defaults: {}", e);
                reqwest::blocking::Client::new()
            });
        Self { config, client }
    }
}

impl WidgetLoader for HttpScriptLoader {
    fn load(&self, libraries: &[String]) -> Result<WidgetHandle, MapError> {
        let url = self.config.script_url(libraries)?;
        let script_url = url.to_string();

        let load_error = |reason: String| MapError::ScriptLoad {
            url: script_url.clone(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| load_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(load_error(format!("HTTP {}", status)));
        }

        let body = response.bytes().map_err(|e| load_error(e.to_string()))?;

        Ok(WidgetHandle {
            script_url: script_url.clone(),
            libraries: libraries.to_vec(),
            script_bytes: body.len(),
        })
    }
}
