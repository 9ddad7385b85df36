//! Presentation projection of a form

use super::{FormEngine, FormMode};
use crate::schema::InputKind;

/// One rendered input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub input_kind: InputKind,
    pub placeholder: String,
    pub required: bool,
    pub value: String,
    /// Error to display; only set once the field is touched
    pub error: Option<String>,
    pub disabled: bool,
}

/// Everything a toolkit needs to draw the form, in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub submit_label: String,
    pub show_cancel: bool,
    pub disabled: bool,
    pub fields: Vec<FieldView>,
}

impl FormView {
    pub(super) fn project(form: &FormEngine) -> Self {
        let title_noun = form.schema().names().title();
        let busy = form.is_busy();

        let (title, idle_label) = match form.mode() {
            FormMode::Create => (format!("Add New {title_noun}"), format!("Add {title_noun}")),
            FormMode::Edit => (format!("Edit {title_noun}"), format!("Update {title_noun}")),
        };
        let submit_label = if busy { "Saving...".to_string() } else { idle_label };

        let fields = form
            .schema()
            .iter()
            .map(|field| FieldView {
                name: field.name.clone(),
                label: field.label.clone(),
                input_kind: field.input_kind,
                placeholder: field.placeholder.clone(),
                required: field.required,
                value: form.value(&field.name).to_string(),
                error: form.visible_error(&field.name).map(str::to_string),
                disabled: busy,
            })
            .collect();

        Self {
            title,
            submit_label,
            show_cancel: form.is_cancellable(),
            disabled: busy,
            fields,
        }
    }
}
