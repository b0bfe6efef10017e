use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::controller::controller::{ControllerEvent, PanelVisibility};
use crate::controller::error::SnapshotError;
use crate::controller::toast::Toast;
use crate::evaluate::description::SelectionMode;
use crate::form::form_model::Form;

// ============================================================================
// Page-level attributes and snapshots
// ============================================================================

/// The two string attributes the schedule container carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAttributes {
    /// `data-template-name`: picks the selection mode
    #[serde(default, rename = "data-template-name", alias = "template_name")]
    pub template_name: Option<String>,

    /// `data-empty`: `"True"` when the schedule table has no rows, `"False"` otherwise
    #[serde(default, rename = "data-empty", alias = "empty")]
    pub empty: Option<String>,
}

impl PageAttributes {
    pub fn new(template_name: Option<&str>, empty: Option<&str>) -> Self {
        Self {
            template_name: template_name.map(str::to_string),
            empty: empty.map(str::to_string),
        }
    }

    pub fn selection_mode(&self) -> SelectionMode {
        SelectionMode::from_template_name(self.template_name.as_deref())
    }

    /// True only for the exact string `"False"`, the way the page compares it.
    pub fn schedule_populated(&self) -> bool {
        self.empty.as_deref() == Some("False")
    }
}

/// Everything the controller needs to know about one rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub attributes: PageAttributes,

    pub form: Form,

    /// Initial state of the fill-in panel; absent when the page has none
    #[serde(default)]
    pub fill_panel: Option<PanelVisibility>,

    #[serde(default)]
    pub toasts: Vec<Toast>,
}

impl PageSnapshot {
    pub fn new(attributes: PageAttributes, form: Form) -> Self {
        Self {
            attributes,
            form,
            fill_panel: None,
            toasts: Vec::new(),
        }
    }
}

/// A page plus the ordered events to play against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub page: PageSnapshot,
    #[serde(default)]
    pub events: Vec<ControllerEvent>,
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

pub fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    context: &str,
) -> Result<T, SnapshotError> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| SnapshotError::Json {
                context: context.to_string(),
                source: e,
            })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).map_err(|e| SnapshotError::Yaml {
                context: context.to_string(),
                source: e,
            })
        }
    }
}

fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| SnapshotError::Io {
        path: display.clone(),
        source: e,
    })?;
    parse_document(&content, DocumentFormat::from_path(path), &display)
}

pub fn load_page(path: &Path) -> Result<PageSnapshot, SnapshotError> {
    load_document(path)
}

pub fn load_replay(path: &Path) -> Result<ReplayScript, SnapshotError> {
    load_document(path)
}
