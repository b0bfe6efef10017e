use serde::{Deserialize, Serialize};

use crate::controller::controller::{ControllerEvent, Evaluation, PanelVisibility};
use crate::evaluate::description::SelectionMode;

// ============================================================================
// Reports: what the CLI prints about a page or a replayed script
// ============================================================================

/// State of a selection form after one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionReport {
    pub form_id: String,
    pub mode: SelectionMode,
    pub description: String,
    pub complete: bool,

    /// Required fields that are still blank
    pub missing: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelVisibility>,

    pub submitted: bool,
}

/// One replayed event and what it caused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    pub index: usize,
    pub event: ControllerEvent,
    pub description: String,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelVisibility>,
    pub panel_toggled: bool,
    pub submitted: bool,
}

impl ReplayStep {
    pub fn from_evaluation(index: usize, event: ControllerEvent, evaluation: Evaluation) -> Self {
        Self {
            index,
            event,
            description: evaluation.description,
            complete: evaluation.complete,
            panel: evaluation.panel,
            panel_toggled: evaluation.panel_toggled,
            submitted: evaluation.submitted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub form_id: String,
    pub mode: SelectionMode,

    /// Summary rendered on page load, before any event
    pub initial_description: String,

    pub toasts_shown: usize,
    pub steps: Vec<ReplayStep>,
}

impl ReplayReport {
    pub fn submissions(&self) -> usize {
        self.steps.iter().filter(|s| s.submitted).count()
    }
}
