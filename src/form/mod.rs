//! Schema-driven form engine
//!
//! Holds the state of one mounted form (values, per-field errors, touched
//! set) and applies input events to it. Validation runs on blur, and on every
//! change once a field has been blurred, so errors do not flash while the
//! user is still typing the first time. Submission validates everything.
//!
//! The engine never touches the network or the record collection; an accepted
//! submission hands the validated draft back to the caller.

mod view;

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::record::{Record, RecordDraft};
use crate::schema::FieldSchema;

pub use view::{FieldView, FormView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Starts empty and resets after each accepted submission
    Create,
    /// Starts from an existing record; the caller closes it on success
    Edit,
}

/// `ValidationFailed(field, message)`: local to the form, never sent anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Result of a submit event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Every field passed; the draft is ready for the gateway
    Accepted(RecordDraft),
    /// At least one field failed; errors are now visible on every invalid field
    Rejected(Vec<FieldError>),
    /// The form is busy and its controls are disabled
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub values: RecordDraft,
    pub errors: BTreeMap<String, Option<String>>,
    pub touched: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct FormEngine {
    schema: FieldSchema,
    mode: FormMode,
    state: FormState,
    busy: bool,
    cancellable: bool,
}

impl FormEngine {
    /// Empty form: every declared field maps to ""
    pub fn create(schema: FieldSchema) -> Self {
        let values = schema.empty_draft();
        Self {
            schema,
            mode: FormMode::Create,
            state: FormState {
                values,
                ..Default::default()
            },
            busy: false,
            cancellable: false,
        }
    }

    /// Form pre-filled with a copy of `record`'s attributes (id excluded)
    pub fn edit(schema: FieldSchema, record: &Record) -> Self {
        let mut values = schema.empty_draft();
        for (name, value) in record.attributes().iter() {
            values.set(name, value);
        }
        Self {
            schema,
            mode: FormMode::Edit,
            state: FormState {
                values,
                ..Default::default()
            },
            busy: false,
            cancellable: false,
        }
    }

    /// Shows a cancel control (edit mode only)
    pub fn with_cancel(mut self) -> Self {
        self.cancellable = true;
        self
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &RecordDraft {
        &self.state.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.state.values.value(name)
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.state.errors.get(name).and_then(|e| e.as_deref())
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.state.touched.contains(name)
    }

    /// Error shown to the user: only once the field has been touched
    pub fn visible_error(&self, name: &str) -> Option<&str> {
        if self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Disables (or re-enables) every control. State is kept either way.
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn is_cancellable(&self) -> bool {
        self.cancellable && self.mode == FormMode::Edit
    }

    /// Keystroke in `name`. Returns false when ignored because the form is busy.
    pub fn change(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.busy {
            return false;
        }
        let value = value.into();
        if self.state.touched.contains(name) {
            let error = self.schema.validate_field(name, &value);
            self.state.errors.insert(name.to_string(), error);
        }
        self.state.values.set(name, value);
        true
    }

    /// Focus left `name`: mark it touched and validate it.
    pub fn blur(&mut self, name: &str) -> bool {
        if self.busy {
            return false;
        }
        self.state.touched.insert(name.to_string());
        let error = self.schema.validate_field(name, self.state.values.value(name));
        self.state.errors.insert(name.to_string(), error);
        true
    }

    pub fn submit(&mut self) -> Submission {
        if self.busy {
            return Submission::Ignored;
        }

        let mut errors = BTreeMap::new();
        let mut failed = Vec::new();
        for field in self.schema.iter() {
            let error = field.validate(self.state.values.value(&field.name));
            if let Some(message) = &error {
                failed.push(FieldError {
                    field: field.name.clone(),
                    message: message.clone(),
                });
            }
            errors.insert(field.name.clone(), error);
            self.state.touched.insert(field.name.clone());
        }
        self.state.errors = errors;

        if !failed.is_empty() {
            debug!(failed = failed.len(), "form submission rejected");
            return Submission::Rejected(failed);
        }

        let draft = self.state.values.clone();
        if self.mode == FormMode::Create {
            self.reset();
        }
        Submission::Accepted(draft)
    }

    /// Back to the initial empty, untouched state
    pub fn reset(&mut self) {
        self.state = FormState {
            values: self.schema.empty_draft(),
            ..Default::default()
        };
    }

    pub fn view(&self) -> FormView {
        FormView::project(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{user_schema, validators};

    fn filled(form: &mut FormEngine, values: &[(&str, &str)]) {
        for (name, value) in values {
            form.change(name, *value);
        }
    }

    const VALID: [(&str, &str); 4] = [
        ("firstName", "Jo"),
        ("lastName", "Lee"),
        ("phone", "555-123-4567"),
        ("email", "jo@x.com"),
    ];

    #[test]
    fn test_create_starts_empty() {
        let form = FormEngine::create(user_schema());
        assert_eq!(form.mode(), FormMode::Create);
        assert!(form.schema().iter().all(|f| form.value(&f.name).is_empty()));
        assert!(form.state().touched.is_empty());
    }

    #[test]
    fn test_edit_copies_record_without_id() {
        let record = Record::new(
            "u2",
            RecordDraft::new()
                .with("firstName", "Ann")
                .with("lastName", "Bo")
                .with("nickname", "annie"),
        );
        let form = FormEngine::edit(user_schema(), &record);
        assert_eq!(form.value("firstName"), "Ann");
        assert_eq!(form.value("nickname"), "annie");
        assert_eq!(form.values().get("phone"), Some(""));
        assert_eq!(form.values().get("id"), None);
    }

    #[test]
    fn test_change_does_not_validate_untouched_field() {
        let mut form = FormEngine::create(user_schema());
        form.change("firstName", "A");
        assert_eq!(form.error("firstName"), None);
    }

    #[test]
    fn test_blur_then_change_revalidates_live() {
        let mut form = FormEngine::create(user_schema());
        form.change("firstName", "A");
        form.blur("firstName");
        assert_eq!(form.visible_error("firstName"), Some(validators::NAME_TOO_SHORT));

        form.change("firstName", "Al");
        assert_eq!(form.visible_error("firstName"), None);
    }

    #[test]
    fn test_submit_rejects_and_touches_everything() {
        let mut form = FormEngine::create(user_schema());
        form.change("firstName", "A");

        let outcome = form.submit();
        let Submission::Rejected(errors) = &outcome else {
            panic!("expected rejection, got {outcome:?}");
        };
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, "firstName");
        assert_eq!(errors[0].message, "Must be at least 2 characters");
        assert!(form.schema().iter().all(|f| form.is_touched(&f.name)));
        // values kept so the user can fix them
        assert_eq!(form.value("firstName"), "A");
    }

    #[test]
    fn test_submit_create_accepts_and_resets() {
        let mut form = FormEngine::create(user_schema());
        filled(&mut form, &VALID);

        let outcome = form.submit();
        let Submission::Accepted(draft) = &outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(draft.value("phone"), "555-123-4567");
        assert_eq!(form.value("firstName"), "");
        assert!(form.state().touched.is_empty());
        assert!(form.state().errors.is_empty());
    }

    #[test]
    fn test_submit_edit_keeps_state() {
        let record = Record::new("u2", VALID.into_iter().collect());
        let mut form = FormEngine::edit(user_schema(), &record);
        form.change("lastName", "Park");

        let Submission::Accepted(draft) = form.submit() else {
            panic!("expected acceptance");
        };
        assert_eq!(draft.value("lastName"), "Park");
        assert_eq!(form.value("lastName"), "Park");
        assert!(form.is_touched("lastName"));
    }

    #[test]
    fn test_busy_form_ignores_events_but_keeps_state() {
        let mut form = FormEngine::create(user_schema());
        filled(&mut form, &VALID);
        form.set_busy(true);

        assert!(!form.change("firstName", "Zed"));
        assert!(!form.blur("firstName"));
        assert_eq!(form.submit(), Submission::Ignored);
        assert_eq!(form.value("firstName"), "Jo");

        form.set_busy(false);
        assert!(matches!(form.submit(), Submission::Accepted(_)));
    }

    #[test]
    fn test_errors_replaced_wholesale_on_submit() {
        let mut form = FormEngine::create(user_schema());
        form.blur("nickname");
        let _ = form.submit();
        assert!(!form.state().errors.contains_key("nickname"));
        assert_eq!(form.state().errors.len(), 4);
    }

    #[test]
    fn test_cancel_only_in_edit_mode() {
        let create = FormEngine::create(user_schema()).with_cancel();
        assert!(!create.is_cancellable());

        let record = Record::new("u1", RecordDraft::new());
        let edit = FormEngine::edit(user_schema(), &record).with_cancel();
        assert!(edit.is_cancellable());
    }
}
