use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::form::view::FormView;

pub const TERM_FIELD: &str = "term";
pub const DATE_FIELD: &str = "date";
pub const STUDY_GROUP_FIELD: &str = "study_group";

/// Which field drives the first segment of the selection summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Selected option text of the `term` select.
    #[default]
    Term,
    /// Raw value of the `date` field.
    Date,
}

impl SelectionMode {
    /// Map a page's `data-template-name` to a mode. The schedule pages pick
    /// a date; every other template (or none) picks a term. `student-schedule`
    /// follows the dashboard page; the tutor page only knows `schedule`.
    pub fn from_template_name(name: Option<&str>) -> Self {
        match name {
            Some("schedule") | Some("student-schedule") => SelectionMode::Date,
            _ => SelectionMode::Term,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::Term => "Term",
            SelectionMode::Date => "Date",
        }
    }

    /// Resolve the primary value for this mode. Missing fields read as "".
    pub fn primary_value<V: FormView + ?Sized>(self, form: &V) -> &str {
        match self {
            SelectionMode::Term => form.selected_text_or_empty(TERM_FIELD),
            SelectionMode::Date => form.value_or_empty(DATE_FIELD),
        }
    }
}

/// When a summary is rendered and how it is terminated.
///
/// The selection pages disagree: most render as soon as either value is
/// present and end with `;`, the schedule-template page renders only when
/// both are present and ends with `.`. Both are kept selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    #[default]
    #[value(name = "any")]
    #[serde(alias = "any")]
    AnyPresent,
    #[value(name = "both")]
    #[serde(alias = "both")]
    BothPresent,
}

impl RenderPolicy {
    fn should_render(self, primary: &str, group: &str) -> bool {
        match self {
            RenderPolicy::AnyPresent => !primary.is_empty() || !group.is_empty(),
            RenderPolicy::BothPresent => !primary.is_empty() && !group.is_empty(),
        }
    }

    fn terminator(self) -> char {
        match self {
            RenderPolicy::AnyPresent => ';',
            RenderPolicy::BothPresent => '.',
        }
    }
}

/// Build the human-readable summary of the current selection, e.g.
/// `Term: Term 1; Study Group: Group A;`. Returns "" when the policy says
/// there is nothing to show.
pub fn describe_selection<V: FormView + ?Sized>(
    form: &V,
    mode: SelectionMode,
    policy: RenderPolicy,
) -> String {
    let primary = mode.primary_value(form);
    let group = form.selected_text_or_empty(STUDY_GROUP_FIELD);

    if !policy.should_render(primary, group) {
        return String::new();
    }

    format!(
        "{}: {}; Study Group: {}{}",
        mode.label(),
        primary,
        group,
        policy.terminator()
    )
}
