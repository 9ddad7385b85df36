//! Declarative field schema
//!
//! An ordered list of [`FieldDescriptor`]s drives every projection of a
//! resource: the form engine renders one input per descriptor, the table
//! renderer one column per descriptor, both in declared order. Neither side
//! looks at a field by name, so adding, removing or reordering descriptors is
//! the only change needed to reshape the UI.

pub mod users;
pub mod validators;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::record::RecordDraft;

pub use users::user_schema;

/// Pure, total field validator: `None` means the value is acceptable.
pub type ValidateFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Kind of input control rendered for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Tel,
    Email,
    Number,
    Date,
    Url,
    Password,
}

impl InputKind {
    /// Value of the HTML `type` attribute
    pub fn as_html(&self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Tel => "tel",
            InputKind::Email => "email",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Url => "url",
            InputKind::Password => "password",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_html())
    }
}

/// One attribute of the resource: how it is labelled, entered and validated.
#[derive(Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub input_kind: InputKind,
    pub placeholder: String,
    pub required: bool,
    /// Contributes to the record's display name
    pub summary: bool,
    validate: ValidateFn,
}

impl FieldDescriptor {
    /// Optional text field that accepts any value
    pub fn new(name: impl Into<String>, label: impl Into<String>, input_kind: InputKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            input_kind,
            placeholder: String::new(),
            required: false,
            summary: false,
            validate: Arc::new(|_| None),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn summary(mut self) -> Self {
        self.summary = true;
        self
    }

    pub fn validator<F>(mut self, validate: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.validate = Arc::new(validate);
        self
    }

    pub fn validate(&self, value: &str) -> Option<String> {
        (self.validate)(value)
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("input_kind", &self.input_kind)
            .field("required", &self.required)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// How the resource is named in titles and messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceNames {
    /// Lowercase singular, e.g. "user"
    pub singular: String,
    /// Lowercase plural, e.g. "users"
    pub plural: String,
}

impl ResourceNames {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// Capitalized singular, e.g. "User"
    pub fn title(&self) -> String {
        capitalize(&self.singular)
    }

    /// Capitalized plural, e.g. "Users"
    pub fn plural_title(&self) -> String {
        capitalize(&self.plural)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered, validated list of field descriptors for one resource.
///
/// Cheap to clone: descriptors are shared.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    names: ResourceNames,
    fields: Arc<[FieldDescriptor]>,
}

impl FieldSchema {
    pub fn new(names: ResourceNames, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyName);
            }
            if field.name == "id" {
                return Err(SchemaError::ReservedName(field.name.clone()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateName(field.name.clone()));
            }
        }

        Ok(Self {
            names,
            fields: fields.into(),
        })
    }

    pub fn names(&self) -> &ResourceNames {
        &self.names
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Draft with every declared field set to ""
    pub fn empty_draft(&self) -> RecordDraft {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), String::new()))
            .collect()
    }

    /// Runs the validator of `name`; undeclared names always pass.
    pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
        self.field(name).and_then(|f| f.validate(value))
    }

    /// Summary field values joined by a space, skipping blanks.
    /// `None` when no summary field has a value.
    pub fn display_name(&self, values: &RecordDraft) -> Option<String> {
        let parts: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.summary)
            .map(|f| values.value(&f.name).trim())
            .filter(|v| !v.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
