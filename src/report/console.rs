use crate::controller::controller::{ControllerEvent, PanelVisibility};
use crate::report::report_model::{ReplayReport, SelectionReport};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a single-page evaluation.
///
/// ```text
/// === Form: selection-schedule (Term) ===
/// Description: Term: Term 1; Study Group: ;
/// Complete:    no (missing: study_group)
/// Panel:       hidden
/// Submit:      no
/// ```
pub fn format_selection_report(report: &SelectionReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Form: {} ({:?}) ===\n",
        report.form_id, report.mode
    ));
    out.push_str(&format!("Description: {}\n", quote_empty(&report.description)));

    if report.complete {
        out.push_str("Complete:    yes\n");
    } else {
        out.push_str(&format!(
            "Complete:    no (missing: {})\n",
            report.missing.join(", ")
        ));
    }

    if let Some(panel) = report.panel {
        out.push_str(&format!("Panel:       {}\n", panel_label(panel)));
    }
    out.push_str(&format!("Submit:      {}\n", yes_no(report.submitted)));

    out
}

/// Format a replayed event script, one line per event.
///
/// ```text
/// === Replay: selection-schedule (Date) ===
/// load  Description: (empty)
/// [1] change date=2024-10-30  ->  Date: 2024-10-30; Study Group: ;
/// [2] change study_group=1  ->  Date: 2024-10-30; Study Group: Group A;  [complete] [submit]
/// === 2 events, 1 submission ===
/// ```
pub fn format_replay_report(report: &ReplayReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Replay: {} ({:?}) ===\n",
        report.form_id, report.mode
    ));
    if report.toasts_shown > 0 {
        out.push_str(&format!("toasts shown: {}\n", report.toasts_shown));
    }
    out.push_str(&format!(
        "load  Description: {}\n",
        quote_empty(&report.initial_description)
    ));

    for step in &report.steps {
        let mut line = format!(
            "[{}] {}  ->  {}",
            step.index,
            event_label(&step.event),
            quote_empty(&step.description)
        );
        if step.complete {
            line.push_str("  [complete]");
        }
        if step.panel_toggled {
            if let Some(panel) = step.panel {
                line.push_str(&format!(" [panel {}]", panel_label(panel)));
            }
        }
        if step.submitted {
            line.push_str(" [submit]");
        }
        out.push_str(&line);
        out.push('\n');
    }

    let submissions = report.submissions();
    out.push_str(&format!(
        "=== {} events, {} submission{} ===\n",
        report.steps.len(),
        submissions,
        if submissions == 1 { "" } else { "s" }
    ));

    out
}

fn event_label(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::FieldChanged { name, value } => format!("change {}={}", name, value),
        ControllerEvent::UpdateClicked => "click update".to_string(),
        ControllerEvent::SubmitClicked => "click submit".to_string(),
    }
}

fn panel_label(panel: PanelVisibility) -> &'static str {
    match panel {
        PanelVisibility::Shown => "shown",
        PanelVisibility::Hidden => "hidden",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn quote_empty(text: &str) -> &str {
    if text.is_empty() { "(empty)" } else { text }
}
