use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    controller::page::{PageAttributes, PageSnapshot},
    evaluate::{
        completeness::is_complete,
        description::{RenderPolicy, SelectionMode},
        display::{DisplayTarget, update_selection_description},
    },
    form::{fingerprint::form_fingerprint, form_model::Form},
    trace::{logger::TraceLogger, trace::TraceEvent},
};

/// Visibility of the auxiliary fill-in panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelVisibility {
    Shown,
    Hidden,
}

/// When the controller submits the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Submit once every required field is filled
    #[default]
    WhenComplete,
    /// Also submit when the page reports a populated schedule (`data-empty="False"`)
    WhenCompleteOrPopulated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default)]
    pub render_policy: RenderPolicy,
    #[serde(default)]
    pub submit_policy: SubmitPolicy,
}

/// Something the page reports to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ControllerEvent {
    /// A field's value changed
    FieldChanged { name: String, value: String },
    /// The "update selection" button was clicked
    UpdateClicked,
    /// The "submit selection" button was clicked
    SubmitClicked,
}

impl ControllerEvent {
    pub fn field_changed(name: &str, value: &str) -> Self {
        ControllerEvent::FieldChanged {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn trigger_name(&self) -> String {
        match self {
            ControllerEvent::FieldChanged { name, .. } => format!("change:{}", name),
            ControllerEvent::UpdateClicked => "update".to_string(),
            ControllerEvent::SubmitClicked => "submit".to_string(),
        }
    }
}

/// Receives the form when the controller decides to submit it.
pub trait FormSubmitter {
    fn submit(&mut self, form: &Form);
}

/// Keeps a copy of every submitted form.
#[derive(Debug, Default)]
pub struct SubmissionLog {
    pub submitted: Vec<Form>,
}

impl FormSubmitter for SubmissionLog {
    fn submit(&mut self, form: &Form) {
        info!(form = %form.id, "submitting selection form");
        self.submitted.push(form.clone());
    }
}

/// Result of re-evaluating the form after one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub description: String,
    pub complete: bool,
    /// Panel state after the event; `None` when the page has no panel
    pub panel: Option<PanelVisibility>,
    pub panel_toggled: bool,
    pub submitted: bool,
}

/// Drives one selection form: keeps the summary current, toggles the
/// fill-in panel and submits once the selection is complete.
pub struct FormController<D: DisplayTarget, S: FormSubmitter> {
    form: Form,
    attributes: PageAttributes,
    mode: SelectionMode,
    config: ControllerConfig,
    panel: Option<PanelVisibility>,
    display: D,
    submitter: S,
    step: u64,
}

impl<D: DisplayTarget, S: FormSubmitter> FormController<D, S> {
    pub fn new(page: PageSnapshot, config: ControllerConfig, display: D, submitter: S) -> Self {
        let mode = page.attributes.selection_mode();
        FormController {
            form: page.form,
            attributes: page.attributes,
            mode,
            config,
            panel: page.fill_panel,
            display,
            submitter,
            step: 0,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Number of evaluations traced so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn panel(&self) -> Option<PanelVisibility> {
        self.panel
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Initial render on page load: the summary only, no submission.
    pub fn load(&mut self, tracer: &TraceLogger) -> String {
        let description = update_selection_description(
            &self.form,
            self.mode,
            self.config.render_policy,
            &mut self.display,
        );
        tracer.log(
            &TraceEvent::now(self.step, "load", form_fingerprint(&self.form))
                .with_description(description.clone()),
        );
        self.step += 1;
        description
    }

    /// Apply an event and re-evaluate the form.
    pub fn handle(&mut self, event: &ControllerEvent, tracer: &TraceLogger) -> Evaluation {
        if let ControllerEvent::FieldChanged { name, value } = event {
            if !self.form.set_value(name, value) {
                debug!(field = %name, "change for a field the form does not have");
            }
        }

        let evaluation = self.evaluate();

        tracer.log(
            &TraceEvent::now(self.step, event.trigger_name(), form_fingerprint(&self.form))
                .with_evaluation(&evaluation),
        );
        self.step += 1;

        evaluation
    }

    fn evaluate(&mut self) -> Evaluation {
        let description = update_selection_description(
            &self.form,
            self.mode,
            self.config.render_policy,
            &mut self.display,
        );
        let complete = is_complete(&self.form);
        let populated = self.attributes.schedule_populated();

        let mut panel_toggled = false;
        if let Some(current) = self.panel {
            let target = if populated {
                PanelVisibility::Hidden
            } else if complete {
                PanelVisibility::Shown
            } else {
                PanelVisibility::Hidden
            };
            panel_toggled = current != target;
            self.panel = Some(target);
        }

        let submitted = match self.config.submit_policy {
            SubmitPolicy::WhenComplete => complete,
            SubmitPolicy::WhenCompleteOrPopulated => complete || populated,
        };
        if submitted {
            self.submitter.submit(&self.form);
        }

        debug!(
            step = self.step,
            complete,
            submitted,
            panel = ?self.panel,
            "selection re-evaluated"
        );

        Evaluation {
            description,
            complete,
            panel: self.panel,
            panel_toggled,
            submitted,
        }
    }
}
