use crate::evaluate::description::{RenderPolicy, SelectionMode, describe_selection};
use crate::form::view::FormView;

/// Somewhere the selection summary is shown (a label or container element).
pub trait DisplayTarget {
    fn text(&self) -> &str;

    /// Replace the whole content. Never appends.
    fn set_text(&mut self, text: &str);
}

/// In-memory display target, also used as the CLI's output buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTarget {
    text: String,
    writes: usize,
}

impl TextTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times the content was replaced.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DisplayTarget for TextTarget {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.writes += 1;
    }
}

/// Recompute the summary and overwrite `target` with it.
/// Returns the rendered text.
pub fn update_selection_description<V, D>(
    form: &V,
    mode: SelectionMode,
    policy: RenderPolicy,
    target: &mut D,
) -> String
where
    V: FormView + ?Sized,
    D: DisplayTarget + ?Sized,
{
    let description = describe_selection(form, mode, policy);
    target.set_text(&description);
    description
}
