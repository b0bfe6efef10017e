use serde::{Deserialize, Serialize};

// ============================================================================
// Form snapshot model: the field list a selection page exposes
// ============================================================================

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }

    /// The empty placeholder option rendered first by the selection pages.
    pub fn blank() -> Self {
        Self::new("", "")
    }
}

/// The control backing a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldControl {
    /// Text-like input (`text`, `date`, `hidden`, ...): the value is the text.
    Input {
        #[serde(default)]
        value: String,
    },

    /// Single-choice select. `selected: None` means no option is selected.
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
        #[serde(default = "default_selected")]
        selected: Option<usize>,
    },
}

// A freshly rendered select shows its first option.
fn default_selected() -> Option<usize> {
    Some(0)
}

/// A named field of a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub control: FieldControl,
}

impl FormField {
    pub fn input(name: impl Into<String>, value: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            control: FieldControl::Input {
                value: value.into(),
            },
        }
    }

    pub fn select(name: impl Into<String>, options: Vec<SelectOption>, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
            control: FieldControl::Select {
                options,
                selected: default_selected(),
            },
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self.control, FieldControl::Select { .. })
    }

    /// The option currently selected, if any.
    pub fn selected_option(&self) -> Option<&SelectOption> {
        match &self.control {
            FieldControl::Select { options, selected } => selected.and_then(|i| options.get(i)),
            FieldControl::Input { .. } => None,
        }
    }

    /// Submitted value: the input text, or the selected option's value.
    pub fn value(&self) -> &str {
        match &self.control {
            FieldControl::Input { value } => value,
            FieldControl::Select { .. } => self
                .selected_option()
                .map(|o| o.value.as_str())
                .unwrap_or(""),
        }
    }

    /// Display text of the selected option. `None` for inputs.
    pub fn selected_text(&self) -> Option<&str> {
        match &self.control {
            FieldControl::Input { .. } => None,
            FieldControl::Select { .. } => {
                Some(self.selected_option().map(|o| o.text.as_str()).unwrap_or(""))
            }
        }
    }

    /// Assign a value the way a browser does: inputs take the text verbatim,
    /// selects pick the first option carrying that value (or none).
    pub fn set_value(&mut self, new_value: &str) {
        match &mut self.control {
            FieldControl::Input { value } => *value = new_value.to_string(),
            FieldControl::Select { options, selected } => {
                *selected = options.iter().position(|o| o.value == new_value);
            }
        }
    }

    /// Select by option index. Out-of-range indexes clear the selection.
    pub fn select_index(&mut self, index: usize) {
        if let FieldControl::Select { options, selected } = &mut self.control {
            *selected = (index < options.len()).then_some(index);
        }
    }
}

/// A form as seen at one instant: an ordered list of named fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl Form {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Set a field's value by name. Returns false when no such field exists.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.set_value(value);
                true
            }
            None => false,
        }
    }
}
