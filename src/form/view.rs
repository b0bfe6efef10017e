use crate::form::form_model::{Form, FormField};

/// Read-only access to a form's fields.
///
/// Lookups return `Option` so an absent field is an ordinary case for the
/// caller rather than a fault. Callers that want the page's lenient
/// behaviour use the `*_or_empty` helpers, which read a missing field as "".
pub trait FormView {
    /// All fields in document order.
    fn fields(&self) -> &[FormField];

    fn field(&self, name: &str) -> Option<&FormField> {
        self.fields().iter().find(|f| f.name == name)
    }

    fn required_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields().iter().filter(|f| f.required)
    }

    /// Raw value of the first field with this name (input or select).
    fn value_of(&self, name: &str) -> Option<&str> {
        self.field(name).map(FormField::value)
    }

    /// Display text of the selected option of the select with this name.
    /// An input sharing the name does not count.
    fn selected_text_of(&self, name: &str) -> Option<&str> {
        self.fields()
            .iter()
            .filter(|f| f.name == name)
            .find_map(FormField::selected_text)
    }

    fn value_or_empty(&self, name: &str) -> &str {
        self.value_of(name).unwrap_or("")
    }

    fn selected_text_or_empty(&self, name: &str) -> &str {
        self.selected_text_of(name).unwrap_or("")
    }
}

impl FormView for Form {
    fn fields(&self) -> &[FormField] {
        &self.fields
    }
}

impl FormView for [FormField] {
    fn fields(&self) -> &[FormField] {
        self
    }
}
