#![allow(dead_code)]

use std::path::PathBuf;

use schedule_selection::controller::controller::PanelVisibility;
use schedule_selection::controller::page::{PageAttributes, PageSnapshot};
use schedule_selection::form::form_model::{Form, FormField, SelectOption};

pub fn term_select(required: bool) -> FormField {
    FormField::select(
        "term",
        vec![
            SelectOption::blank(),
            SelectOption::new("1", "Term 1"),
            SelectOption::new("2", "Term 2"),
        ],
        required,
    )
}

pub fn group_select(required: bool) -> FormField {
    FormField::select(
        "study_group",
        vec![
            SelectOption::blank(),
            SelectOption::new("1", "Group A"),
            SelectOption::new("2", "Group B"),
        ],
        required,
    )
}

/// The schedule-template selection form: term + study group, both required.
pub fn term_form() -> Form {
    Form::new("selection-shedule-templates")
        .with_field(term_select(true))
        .with_field(group_select(true))
}

/// The schedule selection form: a date input + study group, both required.
pub fn date_form() -> Form {
    Form::new("selection-schedule")
        .with_field(FormField::input("date", "", true))
        .with_field(group_select(true))
}

pub fn page(template: Option<&str>, empty: Option<&str>, form: Form) -> PageSnapshot {
    PageSnapshot::new(PageAttributes::new(template, empty), form)
}

pub fn page_with_panel(template: Option<&str>, empty: Option<&str>, form: Form) -> PageSnapshot {
    let mut snapshot = page(template, empty, form);
    snapshot.fill_panel = Some(PanelVisibility::Hidden);
    snapshot
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Fresh path under the system temp dir; any previous file is removed.
pub fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "schedule-selection-{}-{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}
