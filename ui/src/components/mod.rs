pub mod confirm_dialog;
pub mod loader;
pub mod modal;
pub mod toast;
pub mod user_form;
pub mod user_table;
