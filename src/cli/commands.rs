use std::path::Path;

use tracing::info;

use crate::cli::config::OutputFormat;
use crate::controller::controller::{
    ControllerConfig, ControllerEvent, FormController, SubmissionLog,
};
use crate::controller::page::{PageSnapshot, load_page, load_replay};
use crate::controller::toast::{LogToasts, show_toasts};
use crate::evaluate::completeness::missing_required;
use crate::evaluate::display::TextTarget;
use crate::map::bootstrap::BootstrapConfig;
use crate::map::loader::HttpScriptLoader;
use crate::map::map_model::MapOptions;
use crate::map::session::WidgetSession;
use crate::report::console::{format_replay_report, format_selection_report};
use crate::report::report_model::{ReplayReport, ReplayStep, SelectionReport};
use crate::trace::logger::TraceLogger;

// ============================================================================
// evaluate subcommand
// ============================================================================

pub fn cmd_evaluate(
    page_path: &str,
    config: ControllerConfig,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = load_page(Path::new(page_path))?;
    let report = evaluate_page(page, config);
    print_report(&report, format, format_selection_report)
}

/// Load the page, then re-evaluate once as the update button would.
pub fn evaluate_page(page: PageSnapshot, config: ControllerConfig) -> SelectionReport {
    let tracer = TraceLogger::disabled();
    let mut controller =
        FormController::new(page, config, TextTarget::new(), SubmissionLog::default());

    controller.load(&tracer);
    let evaluation = controller.handle(&ControllerEvent::UpdateClicked, &tracer);

    SelectionReport {
        form_id: controller.form().id.clone(),
        mode: controller.mode(),
        description: evaluation.description,
        complete: evaluation.complete,
        missing: missing_required(controller.form())
            .into_iter()
            .map(str::to_string)
            .collect(),
        panel: evaluation.panel,
        submitted: evaluation.submitted,
    }
}

// ============================================================================
// replay subcommand
// ============================================================================

pub fn cmd_replay(
    script_path: &str,
    config: ControllerConfig,
    trace_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let script = load_replay(Path::new(script_path))?;
    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    info!(
        events = script.events.len(),
        form = %script.page.form.id,
        "replaying selection events"
    );

    let report = replay_events(script.page, &script.events, config, &tracer);
    print_report(&report, format, format_replay_report)
}

/// Announce toasts, load the page and feed every event through a controller.
pub fn replay_events(
    page: PageSnapshot,
    events: &[ControllerEvent],
    config: ControllerConfig,
    tracer: &TraceLogger,
) -> ReplayReport {
    let mut toasts = LogToasts::default();
    let toasts_shown = show_toasts(&page.toasts, &mut toasts);

    let mut controller =
        FormController::new(page, config, TextTarget::new(), SubmissionLog::default());
    let initial_description = controller.load(tracer);

    let steps = events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let evaluation = controller.handle(event, tracer);
            ReplayStep::from_evaluation(i + 1, event.clone(), evaluation)
        })
        .collect();

    ReplayReport {
        form_id: controller.form().id.clone(),
        mode: controller.mode(),
        initial_description,
        toasts_shown,
        steps,
    }
}

// ============================================================================
// map-url / map subcommands
// ============================================================================

pub fn cmd_map_url(
    bootstrap: &BootstrapConfig,
    libraries: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let url = bootstrap.script_url(libraries)?;
    println!("{}", url);
    Ok(())
}

pub fn cmd_map(
    bootstrap: BootstrapConfig,
    options: &MapOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = WidgetSession::new(HttpScriptLoader::new(bootstrap));
    let map = session.show_map(options)?;

    println!(
        "Map ready: center {},{} zoom {} ({} markers)",
        map.options.center.lat,
        map.options.center.lng,
        map.options.zoom,
        map.options.markers.len()
    );
    for marker in &map.options.markers {
        println!(
            "  - {} @ {},{}",
            marker.title, marker.position.lat, marker.position.lng
        );
    }
    println!(
        "Script: {} ({} bytes)",
        map.handle.script_url, map.handle.script_bytes
    );

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn print_report<T: serde::Serialize>(
    report: &T,
    format: OutputFormat,
    console: fn(&T) -> String,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Console => print!("{}", console(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}
