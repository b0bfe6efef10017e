use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::controller::controller::{ControllerConfig, SubmitPolicy};
use crate::evaluate::description::RenderPolicy;
use crate::map::bootstrap::BootstrapConfig;
use crate::map::map_model::MapOptions;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "schedule-selection",
    version,
    about = "Evaluate and replay schedule selection forms"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: schedule-selection.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a page snapshot once and print its selection state
    Evaluate {
        /// Page snapshot file (.json, otherwise YAML)
        #[arg(long)]
        page: String,

        /// When to render the summary: any or both values present
        #[arg(long, value_enum)]
        render_policy: Option<RenderPolicy>,

        /// When to submit the form
        #[arg(long, value_enum)]
        submit_policy: Option<SubmitPolicy>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
    },

    /// Replay a scripted sequence of page events
    Replay {
        /// Replay script file (.json, otherwise YAML)
        #[arg(long)]
        script: String,

        #[arg(long, value_enum)]
        render_policy: Option<RenderPolicy>,

        #[arg(long, value_enum)]
        submit_policy: Option<SubmitPolicy>,

        /// Append one JSON line per evaluation to this file
        #[arg(long)]
        trace: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
    },

    /// Print the map widget bootstrap URL
    MapUrl {
        /// Widget API key
        #[arg(long)]
        api_key: Option<String>,

        /// Libraries to request (repeatable)
        #[arg(long = "library", default_values_t = vec!["maps".to_string()])]
        libraries: Vec<String>,
    },

    /// Load the map widget script and show the configured map
    Map {
        /// Widget API key
        #[arg(long)]
        api_key: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `schedule-selection.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub selection: ControllerConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(flatten)]
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub options: MapOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceConfig {
    pub path: Option<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("schedule-selection.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("ignoring malformed config '{}': {}", config_path, e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// CLI flags win over the config file, which wins over defaults.
pub fn build_controller_config(
    render_policy: Option<RenderPolicy>,
    submit_policy: Option<SubmitPolicy>,
    config: &AppConfig,
) -> ControllerConfig {
    ControllerConfig {
        render_policy: render_policy.unwrap_or(config.selection.render_policy),
        submit_policy: submit_policy.unwrap_or(config.selection.submit_policy),
    }
}

pub fn build_bootstrap_config(api_key: Option<&str>, config: &AppConfig) -> BootstrapConfig {
    let mut bootstrap = config.map.bootstrap.clone();
    if let Some(key) = api_key {
        bootstrap.api_key = key.to_string();
    }
    bootstrap
}
