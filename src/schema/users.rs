//! The user resource
//!
//! To add a field, append a descriptor here. The form, table, cards and
//! validation pick it up without further changes, e.g.
//!
//! ```rust
//! use userdesk::schema::{FieldDescriptor, InputKind};
//!
//! let dob = FieldDescriptor::new("dob", "Date of Birth", InputKind::Date)
//!     .validator(|v| (v.len() > 10).then(|| "Use YYYY-MM-DD".to_string()));
//! assert!(dob.validate("1990-01-01").is_none());
//! ```

use super::validators;
use super::{FieldDescriptor, FieldSchema, InputKind, ResourceNames};

pub fn user_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("firstName", "First Name", InputKind::Text)
            .placeholder("Enter first name")
            .required()
            .summary()
            .validator(validators::person_name("First name")),
        FieldDescriptor::new("lastName", "Last Name", InputKind::Text)
            .placeholder("Enter last name")
            .required()
            .summary()
            .validator(validators::person_name("Last name")),
        FieldDescriptor::new("phone", "Phone Number", InputKind::Tel)
            .placeholder("Enter phone number")
            .required()
            .validator(validators::phone),
        FieldDescriptor::new("email", "Email Address", InputKind::Email)
            .placeholder("Enter email address")
            .required()
            .validator(validators::email),
    ]
}

/// Schema of the user collection
pub fn user_schema() -> FieldSchema {
    FieldSchema::new(ResourceNames::new("user", "users"), user_fields())
        .expect("user field names are unique and not reserved")
}
