use crate::form::view::FormView;

/// True when every required field holds a non-blank value.
///
/// Selects are judged by the selected option's value, not its text, so a
/// blank placeholder option keeps the form incomplete. A form without
/// required fields is complete.
pub fn is_complete<V: FormView + ?Sized>(form: &V) -> bool {
    form.required_fields()
        .all(|field| !field.value().trim().is_empty())
}

/// Names of required fields that are still blank, in document order.
pub fn missing_required<V: FormView + ?Sized>(form: &V) -> Vec<&str> {
    form.required_fields()
        .filter(|field| field.value().trim().is_empty())
        .map(|field| field.name.as_str())
        .collect()
}
