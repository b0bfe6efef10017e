mod common;

use common::{date_form, group_select, term_form, term_select};
use schedule_selection::evaluate::completeness::{is_complete, missing_required};
use schedule_selection::form::fingerprint::form_fingerprint;
use schedule_selection::form::form_model::{FieldControl, Form, FormField, SelectOption};
use schedule_selection::form::view::FormView;

// ============================================================================
// Field model
// ============================================================================

#[test]
fn select_defaults_to_first_option() {
    let field = term_select(true);
    assert_eq!(field.value(), "");
    assert_eq!(field.selected_text(), Some(""));
}

#[test]
fn select_set_value_picks_matching_option() {
    let mut field = term_select(true);
    field.set_value("2");
    assert_eq!(field.value(), "2");
    assert_eq!(field.selected_text(), Some("Term 2"));
}

#[test]
fn select_set_unknown_value_clears_selection() {
    let mut field = term_select(true);
    field.set_value("1");
    field.set_value("99");
    assert!(field.selected_option().is_none());
    assert_eq!(field.value(), "");
    assert_eq!(field.selected_text(), Some(""));
}

#[test]
fn select_index_out_of_range_clears_selection() {
    let mut field = group_select(false);
    field.select_index(1);
    assert_eq!(field.selected_text(), Some("Group A"));
    field.select_index(7);
    assert!(field.selected_option().is_none());
}

#[test]
fn select_without_options_reads_empty() {
    let field = FormField::select("term", vec![], true);
    assert_eq!(field.value(), "");
    assert_eq!(field.selected_text(), Some(""));
}

#[test]
fn input_has_value_but_no_selected_text() {
    let field = FormField::input("date", "2024-10-30", true);
    assert_eq!(field.value(), "2024-10-30");
    assert_eq!(field.selected_text(), None);
    assert!(!field.is_select());
}

#[test]
fn form_set_value_reports_missing_field() {
    let mut form = term_form();
    assert!(form.set_value("term", "1"));
    assert!(!form.set_value("room", "12"));
    assert_eq!(form.value_of("term"), Some("1"));
}

// ============================================================================
// FormView lookups
// ============================================================================

#[test]
fn view_missing_field_is_none_and_reads_empty() {
    let form = term_form();
    assert!(form.field("date").is_none());
    assert_eq!(form.value_of("date"), None);
    assert_eq!(form.value_or_empty("date"), "");
    assert_eq!(form.selected_text_or_empty("date"), "");
}

#[test]
fn view_selected_text_ignores_inputs() {
    let form = Form::new("f").with_field(FormField::input("term", "Term 1", true));
    assert_eq!(form.selected_text_of("term"), None);
    assert_eq!(form.value_of("term"), Some("Term 1"));
}

#[test]
fn view_over_field_slice() {
    let fields = vec![term_select(true), FormField::input("note", "", false)];
    let view: &[FormField] = &fields;
    assert_eq!(view.required_fields().count(), 1);
    assert_eq!(view.selected_text_of("term"), Some(""));
}

// ============================================================================
// Completeness
// ============================================================================

#[test]
fn form_without_required_fields_is_complete() {
    let form = Form::new("empty");
    assert!(is_complete(&form));

    let optional = Form::new("optional")
        .with_field(term_select(false))
        .with_field(FormField::input("note", "", false));
    assert!(is_complete(&optional));
}

#[test]
fn complete_only_when_every_required_field_filled() {
    let mut form = term_form();
    assert!(!is_complete(&form));

    form.set_value("term", "1");
    assert!(!is_complete(&form));
    assert_eq!(missing_required(&form), vec!["study_group"]);

    form.set_value("study_group", "1");
    assert!(is_complete(&form));
    assert!(missing_required(&form).is_empty());
}

#[test]
fn whitespace_only_required_value_is_incomplete() {
    let mut form = date_form();
    form.set_value("study_group", "2");
    form.set_value("date", "2024-10-30");
    assert!(is_complete(&form));

    form.set_value("date", "   \t");
    assert!(!is_complete(&form));
    assert_eq!(missing_required(&form), vec!["date"]);
}

#[test]
fn completeness_reads_option_value_not_text() {
    // Placeholder option with visible text but no value
    let field = FormField::select(
        "study_group",
        vec![
            SelectOption::new("", "-- choose --"),
            SelectOption::new("1", "Group A"),
        ],
        true,
    );
    let form = Form::new("f").with_field(field);
    assert!(!is_complete(&form));
}

#[test]
fn clearing_a_field_restores_incomplete() {
    let mut form = term_form();
    form.set_value("term", "1");
    form.set_value("study_group", "1");
    assert!(is_complete(&form));

    form.set_value("term", "");
    assert!(!is_complete(&form));
    assert_eq!(missing_required(&form), vec!["term"]);
}

// ============================================================================
// Serde snapshots
// ============================================================================

#[test]
fn field_deserializes_from_yaml() {
    let yaml = r#"
id: selection-schedule
fields:
  - name: date
    kind: input
    required: true
    value: "2024-10-30"
  - name: study_group
    kind: select
    options:
      - { value: "", text: "" }
      - { value: "3", text: "Group C" }
    selected: 1
  - name: term
    kind: select
    options:
      - { value: "1", text: "Term 1" }
"#;
    let form: Form = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(form.fields.len(), 3);
    assert!(form.fields[0].required);
    assert!(!form.fields[1].required);
    assert_eq!(form.selected_text_of("study_group"), Some("Group C"));
    // No explicit selection: first option
    assert_eq!(form.selected_text_of("term"), Some("Term 1"));
}

#[test]
fn explicit_null_selection_deserializes_as_none() {
    let json = r#"{"name": "term", "kind": "select", "options": [{"value": "1", "text": "Term 1"}], "selected": null}"#;
    let field: FormField = serde_json::from_str(json).unwrap();
    match &field.control {
        FieldControl::Select { selected, .. } => assert_eq!(*selected, None),
        other => panic!("expected select, got {:?}", other),
    }
    assert_eq!(field.selected_text(), Some(""));
}

// ============================================================================
// Fingerprint
// ============================================================================

#[test]
fn fingerprint_tracks_field_values() {
    let a = term_form();
    let b = term_form();
    assert_eq!(form_fingerprint(&a), form_fingerprint(&b));
    assert_eq!(form_fingerprint(&a).len(), 40);

    let mut c = term_form();
    c.set_value("term", "1");
    assert_ne!(form_fingerprint(&a), form_fingerprint(&c));
}

#[test]
fn fingerprint_distinguishes_required_flag() {
    let required = Form::new("f").with_field(FormField::input("date", "x", true));
    let optional = Form::new("f").with_field(FormField::input("date", "x", false));
    assert_ne!(form_fingerprint(&required), form_fingerprint(&optional));
}
