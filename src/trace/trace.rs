use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::controller::controller::{Evaluation, PanelVisibility};

/// One controller evaluation, as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub trigger: String,
    pub form_digest: String,

    pub complete: Option<bool>,
    pub description: Option<String>,
    pub panel: Option<PanelVisibility>,
    pub submitted: Option<bool>,
}

impl TraceEvent {
    pub fn now(step: u64, trigger: impl ToString, form_digest: impl Into<String>) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            step,
            trigger: trigger.to_string(),
            form_digest: form_digest.into(),
            complete: None,
            description: None,
            panel: None,
            submitted: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_evaluation(mut self, evaluation: &Evaluation) -> Self {
        self.complete = Some(evaluation.complete);
        self.description = Some(evaluation.description.clone());
        self.panel = evaluation.panel;
        self.submitted = Some(evaluation.submitted);
        self
    }
}
