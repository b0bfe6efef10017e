use sha1::{Digest, Sha1};

use crate::form::view::FormView;

/// Stable digest of a form's current field state.
///
/// Two snapshots with the same names, required flags and values hash
/// identically, so trace lines for an unchanged form can be correlated.
pub fn form_fingerprint<V: FormView + ?Sized>(form: &V) -> String {
    let mut hasher = Sha1::new();
    for field in form.fields() {
        hasher.update(field.name.as_bytes());
        hasher.update([0u8, field.required as u8]);
        hasher.update(field.value().as_bytes());
        hasher.update([0u8]);
        if let Some(text) = field.selected_text() {
            hasher.update(text.as_bytes());
        }
        hasher.update([0xffu8]);
    }
    format!("{:x}", hasher.finalize())
}
